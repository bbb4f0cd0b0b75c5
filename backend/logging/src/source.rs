//! Caller annotation
//!
//! Every public logging entry point is `#[track_caller]`, so the location
//! recovered here is the application call site no matter how many forwarding
//! layers sit in between. A layer that drops the attribute shifts the
//! reported location into this crate.

use std::fmt;
use std::panic::Location;

/// Field name the call site is attached under.
pub const SOURCE_FIELD: &str = "source";

const UNKNOWN_FILE: &str = "<???>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source {
    file: &'static str,
    line: u32,
}

impl Source {
    /// Location of the innermost caller not marked `#[track_caller]`.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &'static Location<'static>) -> Self {
        let path = location.file();
        let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
        if file.is_empty() {
            return Self::unknown();
        }
        Self {
            file,
            line: location.line(),
        }
    }

    pub const fn unknown() -> Self {
        Self {
            file: UNKNOWN_FILE,
            line: 1,
        }
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
