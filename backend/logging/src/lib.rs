//! Leveled logging facade.
//!
//! Provides:
//! - Severity levels parsed from names (`debug` .. `panic`)
//! - Output and formatter selection from `logger:<target>?<query>` strings
//! - Automatic `source = "<file>:<line>"` tagging of every record
//! - Per-instance [`Logger`] handles with immutable attached fields
//! - A process-wide default logger behind free functions
//! - An `io::Write` adapter that logs server error output
//!
//! ```no_run
//! logfacade::set_level("debug")?;
//! logfacade::set_format("logger:stdout?json=true")?;
//!
//! let log = logfacade::with("component", "listener");
//! log.info("ready");
//! logfacade::warnf!(log => "slow accept: {}ms", 250);
//! # Ok::<(), logfacade::LogError>(())
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod error_log;
pub mod flags;
pub mod formatter;
pub mod global;
pub mod level;
pub mod logger;
mod macros;
pub mod selector;
pub mod sink;
pub mod source;
pub mod syslog_sink;

// Re-export most-used types at crate root.
pub use config::Settings;
pub use entry::Entry;
pub use error::{LogError, Result};
pub use error_log::{ErrorLogWriter, new_error_logger};
pub use flags::LogFlags;
pub use formatter::Formatter;
pub use global::{
    base, debug, debugf, debugln, error, errorf, errorln, fatal, fatalf, fatalln, format, info,
    infof, infoln, level, log, set_format, set_level, set_output, warn, warnf, warnln, with,
};
pub use level::Level;
pub use logger::Logger;
pub use selector::{FormatUri, Target};
pub use sink::Sink;
pub use source::Source;
