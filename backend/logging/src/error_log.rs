//! Error-log adapter
//!
//! Servers and frameworks that want "somewhere to write error text" get an
//! [`ErrorLogWriter`]: every write becomes one error-level record on the
//! wrapped logger. Writes always succeed and report the full length.
//!
//! For frameworks that report through `tracing`, [`layer`] plugs the same
//! writer into a `tracing_subscriber` registry.

use std::io;

use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;

use crate::logger::Logger;

#[derive(Debug, Clone)]
pub struct ErrorLogWriter {
    logger: Logger,
}

impl ErrorLogWriter {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

/// Error-log writer bound to the default logger.
pub fn new_error_logger() -> ErrorLogWriter {
    ErrorLogWriter::new(crate::base())
}

impl io::Write for ErrorLogWriter {
    /// Logs `buf` as one error record with trailing line breaks trimmed.
    ///
    /// The `source` field is the caller of `write`. Writes that arrive through
    /// a default method such as `write_all` or `write_fmt` report a location
    /// inside the standard library instead.
    #[track_caller]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        self.logger.error(text.trim_end_matches(['\r', '\n']));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for ErrorLogWriter {
    type Writer = ErrorLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// A `tracing` layer that forwards error events to `logger` at level error.
pub fn layer<S>(logger: Logger) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_target(true)
        .with_writer(ErrorLogWriter::new(logger))
        .with_filter(LevelFilter::ERROR)
}
