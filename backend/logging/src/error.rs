use thiserror::Error;

/// Errors returned by the logger configuration calls.
///
/// Logging calls themselves never fail; only level and format selection do.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("not a valid log level: {0:?}")]
    InvalidLevel(String),

    #[error("invalid scheme {0:?}, expected \"logger\"")]
    InvalidScheme(String),

    #[error("unsupported logger {0:?}")]
    InvalidTarget(String),

    #[error("malformed log format: {0}")]
    InvalidUri(#[from] url::ParseError),

    #[error("system does not support syslog")]
    UnsupportedFeature,

    #[error("syslog initialization failed: {0}")]
    SyslogInitFailed(String),
}

pub type Result<T> = std::result::Result<T, LogError>;
