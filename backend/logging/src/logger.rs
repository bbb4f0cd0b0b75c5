//! Logger facade
//!
//! `Logger` is a cheap handle: a shared configuration plus an immutable entry
//! of attached fields. Every severity comes in three shapes (`info`,
//! `infoln`, `infof`) that all funnel into [`Logger::log`], which annotates
//! the record with the caller's `source` before formatting and writing it.

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use chrono::Local;
use serde_json::Value;

use crate::config::{ExitHandler, Settings};
use crate::entry::Entry;
use crate::error::Result;
use crate::formatter::Record;
use crate::level::Level;
use crate::selector::FormatUri;
use crate::sink::Sink;
use crate::source::{SOURCE_FIELD, Source};

struct Core {
    settings: ArcSwap<Settings>,
    // Serializes reconfiguration. Log calls never take it.
    update: Mutex<()>,
}

#[derive(Clone)]
pub struct Logger {
    core: Arc<Core>,
    entry: Entry,
}

macro_rules! leveled_methods {
    ($level:expr, $name:literal, $plain:ident, $line:ident, $formatted:ident) => {
        #[doc = concat!("Logs `msg` at level ", $name, ".")]
        #[track_caller]
        pub fn $plain(&self, msg: impl fmt::Display) {
            self.log($level, format_args!("{msg}"));
        }

        #[doc = concat!("Logs `parts` separated by spaces at level ", $name, ".")]
        #[track_caller]
        pub fn $line(&self, parts: &[&dyn fmt::Display]) {
            self.log($level, format_args!("{}", Spaced(parts)));
        }

        #[doc = concat!("Logs preformatted arguments at level ", $name, ".")]
        #[track_caller]
        pub fn $formatted(&self, args: fmt::Arguments<'_>) {
            self.log($level, args);
        }
    };
}

impl Logger {
    /// Creates a logger with its own configuration, independent of the
    /// process-wide default.
    pub fn new(settings: Settings) -> Self {
        Self {
            core: Arc::new(Core {
                settings: ArcSwap::from_pointee(settings),
                update: Mutex::new(()),
            }),
            entry: Entry::new(),
        }
    }

    /// Returns a logger whose records carry `key = value` in addition to this
    /// logger's fields. `self` is left unchanged; both share configuration.
    pub fn with(&self, key: impl Into<String>, value: impl Into<Value>) -> Logger {
        Logger {
            core: Arc::clone(&self.core),
            entry: self.entry.with_field(key, value),
        }
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Current configuration snapshot.
    pub fn settings(&self) -> Arc<Settings> {
        self.core.settings.load_full()
    }

    pub fn level(&self) -> Level {
        self.core.settings.load().level
    }

    /// Parses `name` and makes it the minimum severity.
    pub fn set_level(&self, name: &str) -> Result<Level> {
        let level: Level = name.parse()?;
        self.set_min_level(level);
        Ok(level)
    }

    pub fn set_min_level(&self, level: Level) {
        self.replace(|current| current.clone().with_level(level));
    }

    /// The last format string successfully applied, verbatim.
    pub fn format(&self) -> String {
        self.core.settings.load().format_uri.clone()
    }

    /// Parses and applies a `logger:<target>?<query>` string. On error the
    /// previous formatter, sink and format string stay in effect.
    pub fn set_format(&self, uri: &str) -> Result<()> {
        let uri: FormatUri = uri.parse()?;
        self.apply_format(&uri)
    }

    pub fn apply_format(&self, uri: &FormatUri) -> Result<()> {
        self.update(|current| uri.apply(current))
    }

    /// Sends output to `writer` instead of the current sink.
    pub fn set_output(&self, writer: impl Write + Send + 'static) {
        let sink = Sink::writer(writer);
        self.replace(|current| current.clone().with_sink(sink));
    }

    pub fn set_exit_handler(&self, exit_handler: ExitHandler) {
        self.replace(|current| Settings {
            exit_handler,
            ..current.clone()
        });
    }

    fn replace(&self, build: impl FnOnce(&Settings) -> Settings) {
        let _ = self.update(|current| Ok(build(current)));
    }

    fn update(&self, build: impl FnOnce(&Settings) -> Result<Settings>) -> Result<()> {
        let _guard = self.core.update.lock().unwrap_or_else(PoisonError::into_inner);
        let next = build(&self.core.settings.load())?;
        tracing::debug!(
            target: "logfacade",
            min_level = %next.level,
            formatter = ?next.formatter,
            sink = ?next.sink,
            format = %next.format_uri,
            "logger settings updated"
        );
        self.core.settings.store(Arc::new(next));
        Ok(())
    }

    /// Writes one record at `level`. `Fatal` terminates the process and
    /// `Panic` panics once the record is written.
    #[track_caller]
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        match level {
            Level::Fatal => self.fatalf(args),
            Level::Panic => self.panicf(args),
            _ => self.write(&self.core.settings.load(), level, Source::caller(), args),
        }
    }

    leveled_methods!(Level::Debug, "debug", debug, debugln, debugf);
    leveled_methods!(Level::Info, "info", info, infoln, infof);
    leveled_methods!(Level::Warn, "warn", warn, warnln, warnf);
    leveled_methods!(Level::Error, "error", error, errorln, errorf);

    /// Logs `msg` at level fatal, then exits.
    #[track_caller]
    pub fn fatal(&self, msg: impl fmt::Display) -> ! {
        self.fatalf(format_args!("{msg}"))
    }

    /// Logs `parts` separated by spaces at level fatal, then exits.
    #[track_caller]
    pub fn fatalln(&self, parts: &[&dyn fmt::Display]) -> ! {
        self.fatalf(format_args!("{}", Spaced(parts)))
    }

    /// Logs preformatted arguments at level fatal, then exits.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        let settings = self.core.settings.load_full();
        self.write(&settings, Level::Fatal, Source::caller(), args);
        (settings.exit_handler)(1)
    }

    #[track_caller]
    fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.write(&self.core.settings.load(), Level::Panic, Source::caller(), args);
        panic!("{args}")
    }

    fn write(&self, settings: &Settings, level: Level, source: Source, args: fmt::Arguments<'_>) {
        if !level.enabled(settings.level) {
            return;
        }
        let entry = self.entry.with_field(SOURCE_FIELD, source.to_string());
        let message = args.to_string();
        let record = Record {
            time: Local::now(),
            level,
            message: &message,
            fields: entry.fields(),
        };
        // Sink failures are the sink's business; logging never fails the caller.
        let _ = settings.sink.write(level, &settings.formatter.format(&record));
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("settings", &self.settings())
            .field("fields", self.entry.fields())
            .finish()
    }
}

/// Displays a list of values separated by single spaces.
pub(crate) struct Spaced<'a>(pub(crate) &'a [&'a dyn fmt::Display]);

impl fmt::Display for Spaced<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            part.fmt(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};
    use std::thread;

    use super::*;
    use crate::error::LogError;
    use crate::formatter::Formatter;
    use crate::sink::testing::Capture;

    fn capture_logger(formatter: Formatter) -> (Logger, Capture) {
        let capture = Capture::default();
        let settings = Settings::default()
            .with_formatter(formatter)
            .with_sink(Sink::writer(capture.clone()));
        (Logger::new(settings), capture)
    }

    fn exit_by_panicking(code: i32) -> ! {
        panic!("exit({code})")
    }

    #[test]
    fn source_points_at_call_site() {
        let (logger, capture) = capture_logger(Formatter::Json);
        let line = line!() + 1;
        logger.info("hello");

        let records = capture.json_lines();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["msg"], "hello");
        assert_eq!(records[0]["level"], "info");
        assert_eq!(records[0]["source"], format!("logger.rs:{line}"));
    }

    #[test]
    fn every_shape_reports_its_own_line() {
        let (logger, capture) = capture_logger(Formatter::Json);
        logger.set_min_level(Level::Debug);

        let first = line!() + 1;
        logger.debug("a");
        logger.warnln(&[&"b", &2]);
        logger.errorf(format_args!("c{}", 3));
        logger.log(Level::Info, format_args!("d"));

        let records = capture.json_lines();
        let sources: Vec<_> = records.iter().map(|r| r["source"].clone()).collect();
        let expected: Vec<_> = (0..4).map(|i| format!("logger.rs:{}", first + i)).collect();
        assert_eq!(sources, expected);
        assert_eq!(records[1]["msg"], "b 2");
        assert_eq!(records[2]["msg"], "c3");
    }

    #[test]
    fn records_below_minimum_are_dropped() {
        let (logger, capture) = capture_logger(Formatter::Text);
        logger.debug("hidden");
        logger.info("shown");
        logger.set_min_level(Level::Error);
        logger.warn("hidden too");
        logger.error("shown too");

        let lines = capture.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("level=info msg=shown"));
        assert!(lines[1].contains("level=error msg=\"shown too\""));
    }

    #[test]
    fn set_level_round_trips_normalized_names() {
        let (logger, _) = capture_logger(Formatter::Text);
        for name in ["debug", "INFO", "warning", "Error", "fatal", "panic"] {
            let level = logger.set_level(name).unwrap();
            assert_eq!(logger.level(), level);
            let normalized = name.to_ascii_lowercase().replace("warning", "warn");
            assert_eq!(logger.level().to_string(), normalized);
        }
    }

    #[test]
    fn set_level_rejects_unknown_names() {
        let (logger, _) = capture_logger(Formatter::Text);
        logger.set_min_level(Level::Warn);
        let err = logger.set_level("chatty").unwrap_err();
        assert!(matches!(err, LogError::InvalidLevel(_)));
        assert_eq!(logger.level(), Level::Warn);
    }

    #[test]
    fn with_does_not_touch_the_receiver() {
        let (base, capture) = capture_logger(Formatter::Json);
        let derived = base.with("k", "v");

        derived.info("derived");
        base.info("base");

        let records = capture.json_lines();
        assert_eq!(records[0]["k"], "v");
        assert!(records[1].get("k").is_none());
        assert!(base.entry().get("k").is_none());
    }

    #[test]
    fn concurrent_derivations_are_isolated() {
        let (base, capture) = capture_logger(Formatter::Json);
        let base = base.with("service", "api");

        thread::scope(|scope| {
            for worker in 0..8 {
                let base = &base;
                scope.spawn(move || {
                    let logger = base.with(format!("k{worker}"), worker);
                    for _ in 0..25 {
                        logger.infof(format_args!("{worker}"));
                    }
                });
            }
        });

        let records = capture.json_lines();
        assert_eq!(records.len(), 200);
        for record in records {
            let worker = record["msg"].as_str().unwrap();
            let keys: Vec<_> = record
                .as_object()
                .unwrap()
                .keys()
                .filter(|k| k.starts_with('k'))
                .cloned()
                .collect();
            assert_eq!(keys, vec![format!("k{worker}")]);
            assert_eq!(record["service"], "api");
        }
        assert!(base.entry().get("k0").is_none());
    }

    #[test]
    fn failed_set_format_keeps_previous_configuration() {
        let (logger, capture) = capture_logger(Formatter::Json);
        logger.set_format("logger:stdout?json=true").unwrap();
        logger.set_output(capture.clone());

        assert!(matches!(logger.set_format("logger:foo?json=false"), Err(LogError::InvalidTarget(_))));
        assert!(matches!(logger.set_format("syslog:stdout"), Err(LogError::InvalidScheme(_))));
        assert_eq!(logger.format(), "logger:stdout?json=true");
        assert_eq!(logger.settings().formatter, Formatter::Json);

        logger.info("still json");
        assert_eq!(capture.json_lines()[0]["msg"], "still json");
    }

    #[test]
    fn set_format_selects_stream_and_formatter() {
        let (logger, _) = capture_logger(Formatter::Text);
        logger.set_format("logger:stdout?json=true").unwrap();
        let settings = logger.settings();
        assert!(matches!(settings.sink, Sink::Stdout));
        assert_eq!(settings.formatter, Formatter::Json);

        logger.set_format("logger:stderr").unwrap();
        let settings = logger.settings();
        assert!(matches!(settings.sink, Sink::Stderr));
        assert_eq!(settings.formatter, Formatter::Text);
        assert_eq!(logger.format(), "logger:stderr");
    }

    #[test]
    fn format_without_json_switches_back_to_text() {
        let (logger, capture) = capture_logger(Formatter::Text);
        for raw in ["logger:stdout", "logger:stdout?json=false", "logger:stdout?appname=x"] {
            logger.set_format("logger:stdout?json=true").unwrap();
            logger.set_format(raw).unwrap();
            assert_eq!(logger.settings().formatter, Formatter::Text, "{raw}");
        }

        logger.set_output(capture.clone());
        logger.info("plain");
        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("time=\""), "{}", lines[0]);
        assert!(serde_json::from_str::<serde_json::Value>(&lines[0]).is_err());
    }

    #[test]
    fn text_records_keep_builtin_keys_unique() {
        let (logger, capture) = capture_logger(Formatter::Text);
        logger.with("level", "spoofed").with("msg", "other").error("real");

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].matches(" level=").count(), 1);
        assert!(lines[0].contains(" level=error msg=real "));
        assert!(lines[0].contains(" fields.level=spoofed"));
        assert!(lines[0].contains(" fields.msg=other"));
    }

    #[test]
    fn fatal_writes_then_exits() {
        let (logger, capture) = capture_logger(Formatter::Json);
        logger.set_exit_handler(exit_by_panicking);

        let result = panic::catch_unwind(AssertUnwindSafe(|| logger.fatal("shutting down")));
        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("exit(1)"));

        let records = capture.json_lines();
        assert_eq!(records[0]["level"], "fatal");
        assert_eq!(records[0]["msg"], "shutting down");
    }

    #[test]
    fn fatal_exits_even_when_filtered() {
        let (logger, capture) = capture_logger(Formatter::Text);
        logger.set_exit_handler(exit_by_panicking);
        logger.set_min_level(Level::Panic);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            logger.log(Level::Fatal, format_args!("quiet"))
        }));
        assert!(result.is_err());
        assert!(capture.contents().is_empty());
    }

    #[test]
    fn panic_level_panics_with_message() {
        let (logger, capture) = capture_logger(Formatter::Text);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            logger.log(Level::Panic, format_args!("bad {}", "state"))
        }));
        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("bad state"));
        assert!(capture.contents().contains("level=panic msg=\"bad state\""));
    }
}
