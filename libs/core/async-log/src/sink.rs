use std::sync::{Arc, Mutex};

use crate::record::{LogLevel, LogRecord};

/// Final destination of a log record.
///
/// `render` is only ever called from the single pipeline consumer, so
/// implementations do not need to handle reentrant calls.
pub trait LogSink: Send + Sync + 'static {
    fn render(&self, record: LogRecord);
}

/// Renders records through the process-wide `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn render(&self, record: LogRecord) {
        let attrs = record.attrs_display();
        let error = record.error.as_deref();
        let logged_at = record.timestamp.to_rfc3339();
        let message = record.message.as_str();

        match record.level {
            LogLevel::Debug => {
                tracing::debug!(
                    target: "async_log",
                    %logged_at,
                    attrs = %attrs,
                    error,
                    "{}",
                    message
                )
            }
            LogLevel::Info => {
                tracing::info!(
                    target: "async_log",
                    %logged_at,
                    attrs = %attrs,
                    error,
                    "{}",
                    message
                )
            }
            LogLevel::Warn => {
                tracing::warn!(
                    target: "async_log",
                    %logged_at,
                    attrs = %attrs,
                    error,
                    "{}",
                    message
                )
            }
            LogLevel::Error => {
                tracing::error!(
                    target: "async_log",
                    %logged_at,
                    attrs = %attrs,
                    error,
                    "{}",
                    message
                )
            }
        }
    }
}

/// Keeps rendered records in memory. Used by tests and local tooling.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record rendered so far, in render order.
    pub fn records(&self) -> Vec<LogRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.records.lock() {
            Ok(records) => records.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Messages of every rendered record, in render order.
    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }
}

impl LogSink for MemorySink {
    fn render(&self, record: LogRecord) {
        match self.records.lock() {
            Ok(mut records) => records.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
    }
}
