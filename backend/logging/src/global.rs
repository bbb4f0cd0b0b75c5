//! Process-wide default logger
//!
//! Built on first use with default settings (level info, text formatter,
//! stderr). The free functions here mirror every `Logger` method and forward
//! to that one instance; code that can take a logger explicitly should use
//! [`base`] and pass the handle down instead.

use std::fmt;
use std::io::Write;
use std::sync::LazyLock;

use serde_json::Value;

use crate::config::Settings;
use crate::error::Result;
use crate::level::Level;
use crate::logger::Logger;

static DEFAULT: LazyLock<Logger> = LazyLock::new(|| Logger::new(Settings::default()));

/// The default logger handle.
pub fn base() -> Logger {
    DEFAULT.clone()
}

pub fn with(key: impl Into<String>, value: impl Into<Value>) -> Logger {
    DEFAULT.with(key, value)
}

pub fn level() -> Level {
    DEFAULT.level()
}

pub fn set_level(name: &str) -> Result<Level> {
    DEFAULT.set_level(name)
}

pub fn format() -> String {
    DEFAULT.format()
}

pub fn set_format(uri: &str) -> Result<()> {
    DEFAULT.set_format(uri)
}

pub fn set_output(writer: impl Write + Send + 'static) {
    DEFAULT.set_output(writer)
}

#[track_caller]
pub fn log(level: Level, args: fmt::Arguments<'_>) {
    DEFAULT.log(level, args)
}

macro_rules! leveled_functions {
    ($name:literal, $plain:ident, $line:ident, $formatted:ident) => {
        #[doc = concat!("Logs `msg` at level ", $name, " on the default logger.")]
        #[track_caller]
        pub fn $plain(msg: impl fmt::Display) {
            DEFAULT.$plain(msg)
        }

        #[doc = concat!("Logs `parts` separated by spaces at level ", $name, " on the default logger.")]
        #[track_caller]
        pub fn $line(parts: &[&dyn fmt::Display]) {
            DEFAULT.$line(parts)
        }

        #[doc = concat!("Logs preformatted arguments at level ", $name, " on the default logger.")]
        #[track_caller]
        pub fn $formatted(args: fmt::Arguments<'_>) {
            DEFAULT.$formatted(args)
        }
    };
}

leveled_functions!("debug", debug, debugln, debugf);
leveled_functions!("info", info, infoln, infof);
leveled_functions!("warn", warn, warnln, warnf);
leveled_functions!("error", error, errorln, errorf);

#[track_caller]
pub fn fatal(msg: impl fmt::Display) -> ! {
    DEFAULT.fatal(msg)
}

#[track_caller]
pub fn fatalln(parts: &[&dyn fmt::Display]) -> ! {
    DEFAULT.fatalln(parts)
}

#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    DEFAULT.fatalf(args)
}
