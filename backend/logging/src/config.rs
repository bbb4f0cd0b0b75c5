//! Logger configuration
//!
//! `Settings` is an immutable snapshot. Configuration calls build a new
//! snapshot and publish it atomically, so a log call racing with a
//! reconfiguration sees either the old or the new settings in full.

use crate::formatter::Formatter;
use crate::level::Level;
use crate::sink::Sink;

/// Called with exit code 1 after a fatal record is written.
pub type ExitHandler = fn(i32) -> !;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Minimum severity that is written.
    pub level: Level,
    pub formatter: Formatter,
    pub sink: Sink,
    /// Last successfully applied format string, verbatim. Empty until one is applied.
    pub format_uri: String,
    pub exit_handler: ExitHandler,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: Level::Info,
            formatter: Formatter::Text,
            sink: Sink::Stderr,
            format_uri: String::new(),
            exit_handler: std::process::exit,
        }
    }
}

impl Settings {
    pub fn with_level(self, level: Level) -> Self {
        Self { level, ..self }
    }

    pub fn with_formatter(self, formatter: Formatter) -> Self {
        Self { formatter, ..self }
    }

    pub fn with_sink(self, sink: Sink) -> Self {
        Self { sink, ..self }
    }
}
