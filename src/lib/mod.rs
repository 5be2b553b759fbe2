//! Shared library modules providing error types, rotating log files, and the logger factory.

pub mod errors;
pub mod fs;
pub mod log_format;
pub mod telemetry;
