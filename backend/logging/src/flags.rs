//! Command-line and environment configuration
//!
//! [`LogFlags`] is a `clap` argument group adding `--log.level` and
//! `--log.format` to any binary. The same pair can be read from the
//! `LOG_LEVEL` and `LOG_FORMAT` environment variables.

use clap::Args;

use crate::error::Result;
use crate::level::Level;
use crate::logger::Logger;
use crate::selector::FormatUri;

pub const LEVEL_ENV: &str = "LOG_LEVEL";
pub const FORMAT_ENV: &str = "LOG_FORMAT";
pub const DEFAULT_FORMAT: &str = "logger:stderr";

#[derive(Debug, Clone, Args)]
pub struct LogFlags {
    /// Only log messages with the given severity or above. Valid levels:
    /// debug, info, warn, error, fatal, panic.
    #[arg(long = "log.level", value_name = "LEVEL", default_value_t = Level::Info)]
    pub level: Level,

    /// Set the log target and format. Example:
    /// "logger:syslog?appname=bob&local=7" or "logger:stdout?json=true".
    #[arg(long = "log.format", value_name = "URI", default_value = DEFAULT_FORMAT)]
    pub format: FormatUri,
}

impl LogFlags {
    /// Reads `LOG_LEVEL` and `LOG_FORMAT`, using the defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Like [`LogFlags::from_env`] with a custom variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let level: Level = match lookup(LEVEL_ENV) {
            Some(name) => name.parse()?,
            None => Level::default(),
        };
        let format: FormatUri = lookup(FORMAT_ENV)
            .as_deref()
            .unwrap_or(DEFAULT_FORMAT)
            .parse()?;
        Ok(Self { level, format })
    }

    /// Applies the level, then the format, to `logger`.
    pub fn apply(&self, logger: &Logger) -> Result<()> {
        logger.set_min_level(self.level);
        logger.apply_format(&self.format)
    }
}
