//! Async log pipeline.
//!
//! Decouples any number of log producers from a single renderer:
//!
//! ```text
//!  producers ──try_send──▶ ┌──────────────┐        ┌──────────┐
//!  (handlers, services)    │ bounded mpsc │ ─────▶ │ consumer │ ──▶ LogSink
//!  never block, never fail └──────────────┘  FIFO  └──────────┘
//! ```
//!
//! - [`AsyncLogger::log`] returns immediately in every queue state. When the
//!   queue is full the newest record is dropped and a warning is emitted
//!   directly through `tracing` (never through the pipeline itself).
//! - [`AsyncLogger::run`] is the consumer loop. It exits when the supplied
//!   cancellation future resolves or when [`AsyncLogger::stop`] is called.
//!   Records still queued at that point are discarded.
//! - [`AsyncLogger::stop`] is once-only: repeated or concurrent calls are
//!   no-ops.
//!
//! # Usage
//!
//! ```rust,no_run
//! use async_log::{AsyncLogger, Attr};
//!
//! # async fn example() {
//! let logger = AsyncLogger::new(1024);
//!
//! let consumer = {
//!     let logger = logger.clone();
//!     tokio::spawn(async move { logger.run(std::future::pending()).await })
//! };
//!
//! logger.info("Task created", vec![Attr::new("task.id", "42")]);
//!
//! logger.stop().await;
//! consumer.await.ok();
//! # }
//! ```

mod logger;
mod record;
mod sink;

pub use logger::{AsyncLogger, PipelineState};
pub use record::{Attr, LogLevel, LogRecord};
pub use sink::{LogSink, MemorySink, TracingSink};
