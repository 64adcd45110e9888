use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt;
use strum::Display;

/// Record severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// A single key/value attribute attached to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub key: String,
    pub value: String,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// A structured log record.
///
/// Built by the producing call site and moved into the pipeline; nothing
/// mutates it after it is enqueued except the consumer prepending the
/// `level` attribute right before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// When the producer created the record (not when it was rendered)
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Rendered cause chain, outermost first
    pub error: Option<String>,
    pub attrs: Vec<Attr>,
}

impl LogRecord {
    pub fn new(
        level: LogLevel,
        message: impl Into<String>,
        error: Option<&dyn Error>,
        attrs: Vec<Attr>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            error: error.map(render_error_chain),
            attrs,
        }
    }

    /// Value of the first attribute with the given key.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }

    /// Space-separated `key=value` rendering of all attributes.
    pub fn attrs_display(&self) -> String {
        self.attrs
            .iter()
            .map(Attr::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn render_error_chain(error: &dyn Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }

    rendered
}
