//! Logger factory: console and rotating file `fmt` layers behind reloadable handles.

use std::{
    env,
    path::PathBuf,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, MakeWriter},
    layer::{Layered, SubscriberExt},
    reload,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::{
    lib::{
        fs::{ensure_log_dir, open_default_rotating_log, RotatingLog},
        log_format::{LogTemplate, TemplateFormat},
    },
    server::config::{
        parse_logging_section, LogLevel, LoggingConfig, RawAppConfig, DEFAULT_APP_NAME,
        DEFAULT_LOG_FORMAT,
    },
};

type SinkLayers = Vec<Box<dyn Layer<Registry> + Send + Sync>>;
type SinkSubscriber = Layered<reload::Layer<SinkLayers, Registry>, Registry>;

/// Subscriber driven by a [`LoggingPipeline`].
pub type PipelineSubscriber =
    Layered<reload::Layer<LevelFilter, SinkSubscriber>, SinkSubscriber>;

/// Kind of destination attached to the logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkKind {
    Console,
    RotatingFile(PathBuf),
}

struct PipelineState {
    name: String,
    level: LogLevel,
    format: String,
    sinks: Vec<SinkKind>,
    guards: Vec<WorkerGuard>,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
            level: LogLevel::default(),
            format: DEFAULT_LOG_FORMAT.to_string(),
            sinks: Vec::new(),
            guards: Vec::new(),
        }
    }
}

/// Reload handles for the sink list and level of one subscriber.
#[derive(Clone)]
pub struct LoggingPipeline {
    sinks: reload::Handle<SinkLayers, Registry>,
    level: reload::Handle<LevelFilter, SinkSubscriber>,
    state: Arc<Mutex<PipelineState>>,
}

/// Handle returned by [`setup_logging`].
#[derive(Clone)]
pub struct Logger {
    name: String,
    state: Arc<Mutex<PipelineState>>,
}

impl Logger {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        lock(&self.state).level
    }

    /// Template applied to every sink.
    pub fn format(&self) -> String {
        lock(&self.state).format.clone()
    }

    pub fn sinks(&self) -> Vec<SinkKind> {
        lock(&self.state).sinks.clone()
    }

    pub fn handler_count(&self) -> usize {
        lock(&self.state).sinks.len()
    }

    pub fn file_path(&self) -> Option<PathBuf> {
        self.sinks().into_iter().find_map(|sink| match sink {
            SinkKind::RotatingFile(path) => Some(path),
            SinkKind::Console => None,
        })
    }
}

impl LoggingPipeline {
    /// Pipeline with no sinks yet, plus the subscriber it controls.
    pub fn new() -> (Self, PipelineSubscriber) {
        let (sinks, sinks_handle) = reload::Layer::new(SinkLayers::new());
        let (level, level_handle) = reload::Layer::new(LogLevel::default().as_level_filter());
        let subscriber = tracing_subscriber::registry().with(sinks).with(level);

        let pipeline = Self {
            sinks: sinks_handle,
            level: level_handle,
            state: Arc::new(Mutex::new(PipelineState::default())),
        };
        (pipeline, subscriber)
    }

    /// Replace name, level, template and sinks. Never appends to the previous sink list.
    pub fn configure(&self, app_name: Option<&str>, settings: &LoggingConfig) -> Logger {
        let name = resolve_app_name(app_name);
        let format = TemplateFormat::new(name.clone(), LogTemplate::parse(&settings.format));

        let mut layers: SinkLayers = vec![sink_layer(format.clone(), std::io::stderr)];
        let mut kinds = vec![SinkKind::Console];
        let mut guards = Vec::new();
        if settings.file_enabled {
            if let Some((path, log)) = open_file_sink(&name, &settings.file_dir) {
                let (writer, guard) = tracing_appender::non_blocking(log);
                layers.push(sink_layer(format, writer));
                kinds.push(SinkKind::RotatingFile(path));
                guards.push(guard);
            }
        }

        // Reloading fails only once the subscriber has been dropped.
        let _ = self.sinks.reload(layers);
        let _ = self.level.reload(settings.level.as_level_filter());

        let previous_guards = {
            let mut state = lock(&self.state);
            state.name = name.clone();
            state.level = settings.level;
            state.format = settings.format.clone();
            state.sinks = kinds;
            std::mem::replace(&mut state.guards, guards)
        };
        // Flushes whatever the replaced file sink still had queued.
        drop(previous_guards);

        info!(
            target: "mcp_server_template::logging",
            "Logging configured with level {}",
            settings.level
        );

        Logger {
            name,
            state: Arc::clone(&self.state),
        }
    }

    /// Detach every sink and flush pending file writes.
    pub fn shutdown(&self) {
        let _ = self.sinks.reload(SinkLayers::new());
        let guards = {
            let mut state = lock(&self.state);
            state.sinks.clear();
            std::mem::take(&mut state.guards)
        };
        drop(guards);
    }
}

fn lock(state: &Mutex<PipelineState>) -> MutexGuard<'_, PipelineState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn sink_layer<W>(format: TemplateFormat, writer: W) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer::<Registry>()
        .event_format(format)
        .with_writer(writer)
        .boxed()
}

static GLOBAL_PIPELINE: OnceLock<LoggingPipeline> = OnceLock::new();

fn global_pipeline() -> &'static LoggingPipeline {
    GLOBAL_PIPELINE.get_or_init(|| {
        let (pipeline, subscriber) = LoggingPipeline::new();
        let _ = subscriber
            .with(EnvFilter::try_from_default_env().ok())
            .try_init();
        pipeline
    })
}

/// Configure the process logger.
///
/// The name is taken from `app_name`, else `APP_NAME`, else `mcp_server`.
/// Repeated calls replace the sinks instead of adding to them, so output is
/// never duplicated. The file sink is skipped with a warning when the log
/// directory cannot be created.
pub fn setup_logging(app_name: Option<&str>, settings: &LoggingConfig) -> Logger {
    global_pipeline().configure(app_name, settings)
}

/// [`setup_logging`] with the `LOG_*` settings read from the process environment.
pub fn setup_logging_from_env(app_name: Option<&str>) -> Logger {
    setup_logging(app_name, &logging_settings_from(|key| env::var(key).ok()))
}

/// Flush and detach the process logger's sinks before exit.
pub fn shutdown_logging() {
    if let Some(pipeline) = GLOBAL_PIPELINE.get() {
        pipeline.shutdown();
    }
}

fn logging_settings_from(lookup: impl Fn(&str) -> Option<String>) -> LoggingConfig {
    parse_logging_section(&RawAppConfig {
        log_level: lookup("LOG_LEVEL"),
        log_format: lookup("LOG_FORMAT"),
        log_file_enabled: lookup("LOG_FILE_ENABLED"),
        log_file_dir: lookup("LOG_FILE_DIR"),
        ..RawAppConfig::default()
    })
}

/// Resolve the logger name: argument, then `APP_NAME`, then the default.
pub fn resolve_app_name(app_name: Option<&str>) -> String {
    pick_app_name(app_name, env::var("APP_NAME").ok())
}

fn pick_app_name(app_name: Option<&str>, from_env: Option<String>) -> String {
    app_name
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
        .or_else(|| from_env.filter(|name| !name.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_APP_NAME.to_string())
}

fn open_file_sink(name: &str, file_dir: &str) -> Option<(PathBuf, RotatingLog)> {
    let log_dir = match env::current_dir() {
        Ok(cwd) => cwd.join(file_dir),
        Err(err) => {
            warn!(
                target: "mcp_server_template::logging",
                error = %err,
                "Could not resolve working directory; file logging disabled"
            );
            return None;
        }
    };

    if let Err(err) = ensure_log_dir(&log_dir) {
        warn!(
            target: "mcp_server_template::logging",
            error = %err,
            "Could not create log directory at {}",
            log_dir.display()
        );
        return None;
    }

    let path = log_dir.join(format!("{name}.log"));
    match open_default_rotating_log(&path) {
        Ok(log) => Some((path, log)),
        Err(err) => {
            warn!(
                target: "mcp_server_template::logging",
                error = %err,
                "Could not open log file; file logging disabled"
            );
            None
        }
    }
}

/// Runtime state logged once the server is about to serve.
#[derive(Debug)]
pub struct RuntimeModeTelemetry<'a> {
    pub app_name: &'a str,
    pub transport: &'a str,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub debug: bool,
    pub tools: &'a [String],
}

/// Emit runtime mode to `tracing`.
pub fn emit_runtime_mode(telemetry: &RuntimeModeTelemetry<'_>) {
    info!(
        target: "mcp_server_template::runtime",
        app_name = telemetry.app_name,
        transport = telemetry.transport,
        host = telemetry.host.unwrap_or(""),
        port = telemetry.port.unwrap_or_default(),
        debug = telemetry.debug,
        tools = ?telemetry.tools,
        "MCP server '{}' initialized and ready to start",
        telemetry.app_name
    );
}
