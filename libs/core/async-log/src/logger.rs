use std::error::Error;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{debug, info, warn};

use crate::record::{Attr, LogLevel, LogRecord};
use crate::sink::{LogSink, TracingSink};

/// Lifecycle of a pipeline instance.
///
/// `Idle → Running → Stopped`. A consumer that exits because its
/// cancellation fired leaves the pipeline `Idle` again: records are still
/// accepted until the queue fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No consumer is draining the queue
    Idle,
    /// A consumer loop is draining the queue
    Running,
    /// `stop()` was called; terminal
    Stopped,
}

struct Inner {
    sender: mpsc::Sender<LogRecord>,
    /// Held by the consumer for as long as it runs; taken by `stop()`.
    receiver: Mutex<Option<mpsc::Receiver<LogRecord>>>,
    stop_tx: watch::Sender<bool>,
    stopped: AtomicBool,
    running: AtomicBool,
    dropped: AtomicU64,
    capacity: usize,
    sink: Box<dyn LogSink>,
}

/// Handle to a bounded, single-consumer log pipeline.
///
/// Cloning is cheap and every clone feeds the same queue, so the handle is
/// passed by value into each component that logs.
#[derive(Clone)]
pub struct AsyncLogger {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for AsyncLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncLogger")
            .field("capacity", &self.inner.capacity)
            .field("state", &self.state())
            .field("dropped", &self.dropped())
            .finish()
    }
}

impl AsyncLogger {
    /// Create a pipeline that renders through `tracing`.
    pub fn new(buffer_size: usize) -> Self {
        Self::with_sink(buffer_size, TracingSink)
    }

    /// Create a pipeline with a custom sink.
    ///
    /// A `buffer_size` of zero is raised to one.
    pub fn with_sink<S: LogSink>(buffer_size: usize, sink: S) -> Self {
        let capacity = buffer_size.max(1);
        let (sender, receiver) = mpsc::channel(capacity);
        let (stop_tx, _) = watch::channel(false);

        Self {
            inner: Arc::new(Inner {
                sender,
                receiver: Mutex::new(Some(receiver)),
                stop_tx,
                stopped: AtomicBool::new(false),
                running: AtomicBool::new(false),
                dropped: AtomicU64::new(0),
                capacity,
                sink: Box::new(sink),
            }),
        }
    }

    /// Run the consumer loop until `cancellation` resolves or `stop()` is
    /// called.
    ///
    /// Only one consumer runs at a time; a second concurrent call returns
    /// immediately. Records left in the queue when the loop exits are not
    /// rendered.
    pub async fn run<F>(&self, cancellation: F)
    where
        F: Future<Output = ()>,
    {
        if self.is_stopped() {
            warn!("Async logger already stopped, consumer not started");
            return;
        }

        let Ok(mut guard) = self.inner.receiver.try_lock() else {
            warn!("Async logger consumer already running");
            return;
        };

        let Some(receiver) = guard.as_mut() else {
            return;
        };

        let mut stop_rx = self.inner.stop_tx.subscribe();
        // stop() may have landed between the flag check and subscribe()
        if *stop_rx.borrow() {
            return;
        }

        self.inner.running.store(true, Ordering::SeqCst);
        debug!(capacity = self.inner.capacity, "Async logger consumer started");

        tokio::pin!(cancellation);

        loop {
            tokio::select! {
                biased;

                _ = &mut cancellation => {
                    debug!("Async logger cancelled");
                    break;
                }
                _ = stop_rx.changed() => {
                    debug!("Async logger received stop signal");
                    break;
                }
                record = receiver.recv() => match record {
                    Some(record) => self.forward(record),
                    None => break,
                },
            }
        }

        self.inner.running.store(false, Ordering::SeqCst);
        debug!("Async logger consumer exited");
    }

    /// Stop accepting records, terminate the consumer and release the queue.
    ///
    /// The first call does the work; every later or concurrent call only
    /// waits for the consumer to be gone and returns.
    pub async fn stop(&self) {
        if self
            .inner
            .stopped
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            let _ = self.inner.receiver.lock().await;
            return;
        }

        self.inner.stop_tx.send_replace(true);

        // The consumer holds this lock for its whole lifetime.
        let mut guard = self.inner.receiver.lock().await;
        if let Some(mut receiver) = guard.take() {
            receiver.close();
            let undelivered = receiver.len();
            drop(receiver);

            if undelivered > 0 {
                warn!(undelivered, "Async logger stopped with undelivered records");
            }
        }

        info!(dropped = self.dropped(), "Async logger stopped");
    }

    /// Enqueue a record without blocking.
    ///
    /// Never fails: when the pipeline is stopped or the queue is full the
    /// record is dropped and a warning goes straight to `tracing`.
    pub fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        error: Option<&dyn Error>,
        attrs: Vec<Attr>,
    ) {
        if self.inner.stopped.load(Ordering::SeqCst) {
            let message = message.into();
            self.note_drop();
            warn!(msg = %message, "async logger stopped, message dropped");
            return;
        }

        let record = LogRecord::new(level, message, error, attrs);

        match self.inner.sender.try_send(record) {
            Ok(()) => {}
            Err(TrySendError::Full(record)) => {
                self.note_drop();
                warn!(msg = %record.message, "async logger buffer full, message dropped");
            }
            Err(TrySendError::Closed(record)) => {
                self.note_drop();
                warn!(msg = %record.message, "async logger stopped, message dropped");
            }
        }
    }

    pub fn debug(&self, message: impl Into<String>, attrs: Vec<Attr>) {
        self.log(LogLevel::Debug, message, None, attrs);
    }

    pub fn info(&self, message: impl Into<String>, attrs: Vec<Attr>) {
        self.log(LogLevel::Info, message, None, attrs);
    }

    pub fn warn(&self, message: impl Into<String>, attrs: Vec<Attr>) {
        self.log(LogLevel::Warn, message, None, attrs);
    }

    pub fn warn_with_error(
        &self,
        message: impl Into<String>,
        error: Option<&dyn Error>,
        attrs: Vec<Attr>,
    ) {
        self.log(LogLevel::Warn, message, error, attrs);
    }

    pub fn error(&self, message: impl Into<String>, error: Option<&dyn Error>, attrs: Vec<Attr>) {
        self.log(LogLevel::Error, message, error, attrs);
    }

    pub fn state(&self) -> PipelineState {
        if self.is_stopped() {
            PipelineState::Stopped
        } else if self.inner.running.load(Ordering::SeqCst) {
            PipelineState::Running
        } else {
            PipelineState::Idle
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::SeqCst)
    }

    /// Number of records discarded because the queue was full or closed.
    pub fn dropped(&self) -> u64 {
        self.inner.dropped.load(Ordering::Relaxed)
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    fn note_drop(&self) {
        self.inner.dropped.fetch_add(1, Ordering::Relaxed);
    }

    fn forward(&self, mut record: LogRecord) {
        record.attrs.insert(0, Attr::new("level", record.level));
        self.inner.sink.render(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use std::time::Duration;

    #[tokio::test]
    async fn test_new_pipeline_is_idle() {
        let logger = AsyncLogger::with_sink(4, MemorySink::new());
        assert_eq!(logger.state(), PipelineState::Idle);
        assert_eq!(logger.capacity(), 4);
        assert_eq!(logger.dropped(), 0);
    }

    #[tokio::test]
    async fn test_zero_buffer_is_clamped() {
        let logger = AsyncLogger::with_sink(0, MemorySink::new());
        assert_eq!(logger.capacity(), 1);
    }

    #[tokio::test]
    async fn test_forward_prepends_level_attribute() {
        let sink = MemorySink::new();
        let logger = AsyncLogger::with_sink(4, sink.clone());

        logger.forward(LogRecord::new(
            LogLevel::Warn,
            "disk almost full",
            None,
            vec![Attr::new("disk", "/var")],
        ));

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attrs[0], Attr::new("level", "WARN"));
        assert_eq!(records[0].attrs[1], Attr::new("disk", "/var"));
    }

    #[tokio::test]
    async fn test_second_consumer_returns_immediately() {
        let logger = AsyncLogger::with_sink(4, MemorySink::new());

        let first = {
            let logger = logger.clone();
            tokio::spawn(async move { logger.run(std::future::pending()).await })
        };

        tokio::time::timeout(Duration::from_secs(1), async {
            while logger.state() != PipelineState::Running {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("consumer should start");

        tokio::time::timeout(Duration::from_secs(1), logger.run(std::future::pending()))
            .await
            .expect("second consumer must not block");

        logger.stop().await;
        first.await.unwrap();
        assert_eq!(logger.state(), PipelineState::Stopped);
    }
}
