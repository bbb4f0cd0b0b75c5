//! Record formatters
//!
//! `Text` renders logfmt-style lines (`time=... level=info msg=... k=v`) with
//! a full RFC 3339 timestamp and no colors. `Json` renders one object per
//! line with one key per field.

use std::borrow::Cow;
use std::fmt::Write as _;

use chrono::{DateTime, Local, SecondsFormat};
use serde_json::{Map, Value};

use crate::entry::Fields;
use crate::level::Level;

const TIME_KEY: &str = "time";
const LEVEL_KEY: &str = "level";
const MESSAGE_KEY: &str = "msg";

/// One log call, ready to be rendered.
#[derive(Debug)]
pub struct Record<'a> {
    pub time: DateTime<Local>,
    pub level: Level,
    pub message: &'a str,
    pub fields: &'a Fields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Formatter {
    #[default]
    Text,
    Json,
}

impl Formatter {
    /// Renders `record` as one newline-terminated line.
    pub fn format(&self, record: &Record<'_>) -> Vec<u8> {
        match self {
            Formatter::Text => format_text(record).into_bytes(),
            Formatter::Json => format_json(record).into_bytes(),
        }
    }
}

fn timestamp(time: &DateTime<Local>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn format_text(record: &Record<'_>) -> String {
    let mut out = String::with_capacity(128);
    append_pair(&mut out, TIME_KEY, &timestamp(&record.time));
    append_pair(&mut out, LEVEL_KEY, record.level.as_str());
    if !record.message.is_empty() {
        append_pair(&mut out, MESSAGE_KEY, record.message);
    }
    for (key, value) in record.fields {
        let key = field_key(key);
        match value {
            Value::String(s) => append_pair(&mut out, &key, s),
            other => append_pair(&mut out, &key, &other.to_string()),
        }
    }
    out.push('\n');
    out
}

/// Fields named like a built-in key are moved aside to `fields.<key>`.
fn field_key(key: &str) -> Cow<'_, str> {
    match key {
        TIME_KEY | LEVEL_KEY | MESSAGE_KEY => Cow::Owned(format!("fields.{key}")),
        _ => Cow::Borrowed(key),
    }
}

fn append_pair(out: &mut String, key: &str, value: &str) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(key);
    out.push('=');
    if needs_quoting(value) {
        let _ = write!(out, "{value:?}");
    } else {
        out.push_str(value);
    }
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || !value.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '/' | '@' | '^' | '+')
        })
}

fn format_json(record: &Record<'_>) -> String {
    let mut data = Map::with_capacity(record.fields.len() + 3);
    for (key, value) in record.fields {
        data.insert(field_key(key).into_owned(), value.clone());
    }
    data.insert(TIME_KEY.to_string(), Value::from(timestamp(&record.time)));
    data.insert(LEVEL_KEY.to_string(), Value::from(record.level.as_str()));
    data.insert(MESSAGE_KEY.to_string(), Value::from(record.message));

    let mut line = Value::Object(data).to_string();
    line.push('\n');
    line
}
