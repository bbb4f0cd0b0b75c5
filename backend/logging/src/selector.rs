//! Format and output selection
//!
//! Parses configuration strings of the form
//!
//! ```text
//! logger:<target>[?json=true][&appname=<name>][&local=<facility>]
//! target ::= "stdout" | "stderr" | "syslog"
//! ```
//!
//! e.g. `logger:stdout`, `logger:stderr?json=true`,
//! `logger:syslog?appname=myapp&local=7`.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::config::Settings;
use crate::error::{LogError, Result};
use crate::formatter::Formatter;
use crate::sink::Sink;
use crate::syslog_sink;

pub const SCHEME: &str = "logger";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Stdout,
    Stderr,
    Syslog,
}

impl FromStr for Target {
    type Err = LogError;

    fn from_str(target: &str) -> Result<Self> {
        match target {
            "stdout" => Ok(Target::Stdout),
            "stderr" => Ok(Target::Stderr),
            "syslog" => Ok(Target::Syslog),
            other => Err(LogError::InvalidTarget(other.to_string())),
        }
    }
}

/// A parsed format string. `Display` returns the input text unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatUri {
    raw: String,
    pub target: Target,
    pub json: bool,
    pub appname: String,
    pub local: String,
}

impl FormatUri {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Builds the settings that result from applying this format on top of
    /// `current`. Nothing is changed when this fails.
    pub fn apply(&self, current: &Settings) -> Result<Settings> {
        let formatter = if self.json {
            Formatter::Json
        } else {
            Formatter::Text
        };
        let sink = match self.target {
            Target::Stdout => Sink::Stdout,
            Target::Stderr => Sink::Stderr,
            Target::Syslog => syslog_sink::connect(&self.appname, &self.local)?,
        };
        Ok(Settings {
            formatter,
            sink,
            format_uri: self.raw.clone(),
            ..current.clone()
        })
    }
}

impl FromStr for FormatUri {
    type Err = LogError;

    fn from_str(raw: &str) -> Result<Self> {
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                return Err(LogError::InvalidScheme(String::new()));
            }
            Err(err) => return Err(err.into()),
        };
        if url.scheme() != SCHEME {
            return Err(LogError::InvalidScheme(url.scheme().to_string()));
        }
        // `logger://stdout` carries the target as a host; only the opaque
        // form `logger:stdout` is accepted.
        let target = if url.cannot_be_a_base() { url.path() } else { "" };
        let target: Target = target.parse()?;

        // The first occurrence of a query key wins.
        let mut json = None;
        let mut appname = None;
        let mut local = None;
        for (key, value) in url.query_pairs() {
            let slot = match key.as_ref() {
                "json" => &mut json,
                "appname" => &mut appname,
                "local" => &mut local,
                _ => continue,
            };
            slot.get_or_insert_with(|| value.into_owned());
        }

        Ok(Self {
            raw: raw.to_string(),
            target,
            json: json.as_deref() == Some("true"),
            appname: appname.unwrap_or_default(),
            local: local.unwrap_or_default(),
        })
    }
}

impl fmt::Display for FormatUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
