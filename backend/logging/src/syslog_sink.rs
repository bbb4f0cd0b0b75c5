//! Syslog output
//!
//! Available on unix builds with the `syslog` feature. Everywhere else
//! selecting the syslog target fails with `LogError::UnsupportedFeature`.

use crate::error::{LogError, Result};
use crate::sink::Sink;

/// Whether this build can log to syslog.
pub const SUPPORTED: bool = cfg!(all(unix, feature = "syslog"));

#[cfg(all(unix, feature = "syslog"))]
pub use imp::{SyslogSink, parse_facility, severity};

/// Connects a syslog sink tagged with `appname` on facility `local`.
#[cfg(all(unix, feature = "syslog"))]
pub(crate) fn connect(appname: &str, local: &str) -> Result<Sink> {
    let sink = SyslogSink::connect(appname, local)?;
    Ok(Sink::Syslog(std::sync::Arc::new(sink)))
}

#[cfg(not(all(unix, feature = "syslog")))]
pub(crate) fn connect(_appname: &str, _local: &str) -> Result<Sink> {
    Err(LogError::UnsupportedFeature)
}

#[cfg(all(unix, feature = "syslog"))]
mod imp {
    use std::fmt;
    use std::io;
    use std::sync::{Mutex, PoisonError};

    use syslog::{Facility, Formatter3164, LoggerBackend, Severity};

    use super::*;
    use crate::level::Level;

    /// Maps the `local` query parameter to a facility. Accepts `0`..`7` and
    /// `local0`..`local7`.
    pub fn parse_facility(local: &str) -> Result<Facility> {
        let facility = match local.to_ascii_lowercase().as_str() {
            "" => return Err(LogError::SyslogInitFailed("missing local parameter".into())),
            "0" | "local0" => Facility::LOG_LOCAL0,
            "1" | "local1" => Facility::LOG_LOCAL1,
            "2" | "local2" => Facility::LOG_LOCAL2,
            "3" | "local3" => Facility::LOG_LOCAL3,
            "4" | "local4" => Facility::LOG_LOCAL4,
            "5" | "local5" => Facility::LOG_LOCAL5,
            "6" | "local6" => Facility::LOG_LOCAL6,
            "7" | "local7" => Facility::LOG_LOCAL7,
            _ => {
                return Err(LogError::SyslogInitFailed(format!(
                    "invalid local({local}) for syslog"
                )));
            }
        };
        Ok(facility)
    }

    /// Syslog severity a record at `level` is sent with.
    pub fn severity(level: Level) -> Severity {
        match level {
            Level::Debug => Severity::LOG_DEBUG,
            Level::Info => Severity::LOG_INFO,
            Level::Warn => Severity::LOG_WARNING,
            Level::Error => Severity::LOG_ERR,
            Level::Fatal => Severity::LOG_CRIT,
            Level::Panic => Severity::LOG_EMERG,
        }
    }

    pub struct SyslogSink {
        appname: String,
        facility: Facility,
        logger: Mutex<syslog::Logger<LoggerBackend, Formatter3164>>,
    }

    impl SyslogSink {
        pub fn connect(appname: &str, local: &str) -> Result<Self> {
            if appname.is_empty() {
                return Err(LogError::SyslogInitFailed("missing appname parameter".into()));
            }
            let facility = parse_facility(local)?;
            let formatter = Formatter3164 {
                facility,
                hostname: None,
                process: appname.to_string(),
                pid: std::process::id(),
            };
            let logger = syslog::unix(formatter)
                .map_err(|err| LogError::SyslogInitFailed(err.to_string()))?;

            tracing::debug!(target: "logfacade", appname, ?facility, "connected to syslog");
            Ok(Self {
                appname: appname.to_string(),
                facility,
                logger: Mutex::new(logger),
            })
        }

        /// Sends one formatted record at the syslog severity matching `level`.
        pub fn send(&self, level: Level, buf: &[u8]) -> io::Result<()> {
            let message = String::from_utf8_lossy(buf);
            let message = message.trim_end();
            let mut logger = self.logger.lock().unwrap_or_else(PoisonError::into_inner);
            let sent = match severity(level) {
                Severity::LOG_DEBUG => logger.debug(message),
                Severity::LOG_INFO => logger.info(message),
                Severity::LOG_NOTICE => logger.notice(message),
                Severity::LOG_WARNING => logger.warning(message),
                Severity::LOG_ERR => logger.err(message),
                Severity::LOG_CRIT => logger.crit(message),
                Severity::LOG_ALERT => logger.alert(message),
                Severity::LOG_EMERG => logger.emerg(message),
            };
            sent.map_err(|err| io::Error::other(err.to_string()))
        }
    }

    impl fmt::Debug for SyslogSink {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("SyslogSink")
                .field("appname", &self.appname)
                .field("facility", &self.facility)
                .finish()
        }
    }

}
