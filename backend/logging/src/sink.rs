//! Output sinks
//!
//! A sink receives fully formatted records. Writes are serialized per sink:
//! standard streams through their own locks, custom writers and syslog
//! through a mutex.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::level::Level;
#[cfg(all(unix, feature = "syslog"))]
use crate::syslog_sink::SyslogSink;

pub type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

#[derive(Clone, Default)]
pub enum Sink {
    Stdout,
    #[default]
    Stderr,
    Writer(SharedWriter),
    #[cfg(all(unix, feature = "syslog"))]
    Syslog(Arc<SyslogSink>),
}

impl Sink {
    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        Sink::Writer(Arc::new(Mutex::new(Box::new(writer))))
    }

    /// Writes one formatted record. `level` is only consulted by sinks that
    /// carry severity out of band.
    #[cfg_attr(not(all(unix, feature = "syslog")), allow(unused_variables))]
    pub fn write(&self, level: Level, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::Stdout => io::stdout().lock().write_all(buf),
            Sink::Stderr => io::stderr().lock().write_all(buf),
            Sink::Writer(writer) => {
                let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
                writer.write_all(buf)?;
                writer.flush()
            }
            #[cfg(all(unix, feature = "syslog"))]
            Sink::Syslog(syslog) => syslog.send(level, buf),
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Stdout => f.write_str("Stdout"),
            Sink::Stderr => f.write_str("Stderr"),
            Sink::Writer(_) => f.write_str("Writer(..)"),
            #[cfg(all(unix, feature = "syslog"))]
            Sink::Syslog(syslog) => f.debug_tuple("Syslog").field(syslog).finish(),
        }
    }
}
