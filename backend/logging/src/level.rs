//! Severity levels
//!
//! Ordered from least to most severe. A logger emits a record only when the
//! record's level is at or above the configured minimum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    /// Terminates the process after the record is written.
    Fatal,
    /// Panics after the record is written.
    Panic,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Panic,
    ];

    /// Normalized lower-case name, the form `Display` renders.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
        }
    }

    pub fn enabled(&self, minimum: Level) -> bool {
        *self >= minimum
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(name: &str) -> Result<Self, LogError> {
        match name.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            "panic" => Ok(Level::Panic),
            _ => Err(LogError::InvalidLevel(name.to_string())),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = LogError;

    fn try_from(name: String) -> Result<Self, LogError> {
        name.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_level_name() {
        for level in Level::ALL {
            assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
        }
        assert_eq!("WARNING".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("Error".parse::<Level>().unwrap(), Level::Error);
    }

    #[test]
    fn rejects_unknown_names() {
        for name in ["", "trace", "verbose", "infoo", " info"] {
            let err = name.parse::<Level>().unwrap_err();
            assert!(matches!(err, LogError::InvalidLevel(ref n) if n == name));
        }
    }

    #[test]
    fn ordering_follows_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Error < Level::Fatal);
        assert!(Level::Warn.enabled(Level::Info));
        assert!(!Level::Debug.enabled(Level::Info));
    }

    #[test]
    fn converts_from_owned_names() {
        assert_eq!(Level::try_from("Fatal".to_string()).unwrap(), Level::Fatal);
        assert!(Level::try_from("loud".to_string()).is_err());
        assert_eq!(String::from(Level::Error), "error");
    }

    #[test]
    fn serde_uses_level_names() {
        assert_eq!(serde_json::to_string(&Level::Warn).unwrap(), "\"warn\"");
        let level: Level = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(level, Level::Warn);
        assert!(serde_json::from_str::<Level>("\"loud\"").is_err());
    }
}
