//! `LOG_FORMAT` templates and event field capture.

use std::fmt::{self, Write as _};

use tracing::{
    field::{Field, Visit},
    Event, Subscriber,
};
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    registry::LookupSpan,
};

use crate::server::config::LogLevel;

/// `strftime` pattern used for `{timestamp}`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Timestamp,
    Name,
    Level,
    Target,
    Message,
}

/// Parsed log line template.
///
/// Recognised placeholders are `{timestamp}`, `{name}`, `{level}`, `{target}`
/// and `{message}`. Anything else, including unknown `{...}` tokens, is copied
/// to the output unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTemplate {
    source: String,
    segments: Vec<Segment>,
}

/// Values substituted into a [`LogTemplate`].
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub timestamp: &'a str,
    pub name: &'a str,
    pub level: LogLevel,
    pub target: &'a str,
    pub message: &'a str,
    pub fields: &'a [(&'static str, String)],
}

impl LogTemplate {
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];
            let Some(close) = after_open.find('}') else {
                literal.push_str(&rest[open..]);
                rest = "";
                break;
            };

            let token = &after_open[..close];
            let segment = match token {
                "timestamp" => Some(Segment::Timestamp),
                "name" => Some(Segment::Name),
                "level" => Some(Segment::Level),
                "target" => Some(Segment::Target),
                "message" => Some(Segment::Message),
                _ => None,
            };
            match segment {
                Some(segment) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                None => {
                    literal.push('{');
                    literal.push_str(token);
                    literal.push('}');
                }
            }
            rest = &after_open[close + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            source: source.to_string(),
            segments,
        }
    }

    /// The template exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render one line, newline-terminated. Extra event fields follow as `key=value`.
    pub fn render(&self, record: &LogRecord<'_>) -> String {
        let mut line = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Timestamp => line.push_str(record.timestamp),
                Segment::Name => line.push_str(record.name),
                Segment::Level => line.push_str(record.level.as_str()),
                Segment::Target => line.push_str(record.target),
                Segment::Message => line.push_str(record.message),
            }
        }
        for (key, value) in record.fields {
            line.push(' ');
            line.push_str(key);
            line.push('=');
            line.push_str(value);
        }
        line.push('\n');
        line
    }
}

impl fmt::Display for LogTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Collects the `message` and remaining fields of a `tracing` event.
#[derive(Debug, Default)]
pub struct EventFields {
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl EventFields {
    fn push(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            name if name.starts_with("log.") => {}
            name => self.fields.push((name, value)),
        }
    }
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }
}

/// `fmt` event formatter rendering every event through a [`LogTemplate`].
#[derive(Debug, Clone)]
pub struct TemplateFormat {
    name: String,
    template: LogTemplate,
}

impl TemplateFormat {
    pub fn new(name: impl Into<String>, template: LogTemplate) -> Self {
        Self {
            name: name.into(),
            template,
        }
    }

    pub fn template(&self) -> &LogTemplate {
        &self.template
    }
}

impl<S, N> FormatEvent<S, N> for TemplateFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = EventFields::default();
        event.record(&mut fields);
        let metadata = event.metadata();
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();

        writer.write_str(&self.template.render(&LogRecord {
            timestamp: &timestamp,
            name: &self.name,
            level: LogLevel::for_event(metadata.level()),
            target: metadata.target(),
            message: &fields.message,
            fields: &fields.fields,
        }))
    }
}
