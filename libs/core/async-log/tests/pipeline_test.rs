//! Pipeline behaviour tests
//!
//! These drive a real consumer task against a `MemorySink` and check the
//! producer-facing guarantees: FIFO rendering, drop-newest on a full queue,
//! non-blocking logging after stop, and idempotent shutdown.

use async_log::{AsyncLogger, Attr, LogLevel, MemorySink, PipelineState};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::timeout;

#[derive(Debug, Error)]
#[error("storage: save task")]
struct SaveError(#[source] std::io::Error);

fn spawn_consumer(logger: &AsyncLogger) -> JoinHandle<()> {
    let logger = logger.clone();
    tokio::spawn(async move { logger.run(std::future::pending()).await })
}

async fn wait_for_records(sink: &MemorySink, expected: usize) {
    timeout(Duration::from_secs(2), async {
        while sink.len() < expected {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("records should be rendered");
}

#[tokio::test]
async fn test_records_are_rendered_in_enqueue_order() {
    let sink = MemorySink::new();
    let logger = AsyncLogger::with_sink(64, sink.clone());
    let consumer = spawn_consumer(&logger);

    for i in 0..20 {
        logger.info(format!("message {}", i), vec![Attr::new("seq", i)]);
    }

    wait_for_records(&sink, 20).await;

    let expected: Vec<String> = (0..20).map(|i| format!("message {}", i)).collect();
    assert_eq!(sink.messages(), expected);

    logger.stop().await;
    consumer.await.unwrap();
}

#[tokio::test]
async fn test_rendered_record_carries_level_attrs_and_cause() {
    let sink = MemorySink::new();
    let logger = AsyncLogger::with_sink(8, sink.clone());
    let consumer = spawn_consumer(&logger);

    let err = SaveError(std::io::Error::other("disk unplugged"));
    logger.error(
        "Service: Failed to save task",
        Some(&err),
        vec![Attr::new("task.id", "t-1")],
    );

    wait_for_records(&sink, 1).await;
    let record = &sink.records()[0];

    assert_eq!(record.level, LogLevel::Error);
    assert_eq!(record.attr("level"), Some("ERROR"));
    assert_eq!(record.attrs[0].key, "level");
    assert_eq!(record.attr("task.id"), Some("t-1"));
    assert_eq!(
        record.error.as_deref(),
        Some("storage: save task: disk unplugged")
    );

    logger.stop().await;
    consumer.await.unwrap();
}

#[tokio::test]
async fn test_convenience_wrappers_map_to_levels() {
    let sink = MemorySink::new();
    let logger = AsyncLogger::with_sink(8, sink.clone());
    let consumer = spawn_consumer(&logger);

    logger.debug("d", vec![]);
    logger.info("i", vec![]);
    logger.warn("w", vec![]);
    logger.warn_with_error("we", Some(&std::io::Error::other("slow")), vec![]);
    logger.error("e", None, vec![]);

    wait_for_records(&sink, 5).await;
    let levels: Vec<LogLevel> = sink.records().iter().map(|r| r.level).collect();
    assert_eq!(
        levels,
        vec![
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Warn,
            LogLevel::Error
        ]
    );
    assert_eq!(sink.records()[3].error.as_deref(), Some("slow"));

    logger.stop().await;
    consumer.await.unwrap();
}

#[tokio::test]
async fn test_full_queue_drops_newest_without_blocking() {
    let sink = MemorySink::new();
    let logger = AsyncLogger::with_sink(2, sink.clone());

    // No consumer yet, so the queue fills up.
    logger.info("first", vec![]);
    logger.info("second", vec![]);

    let started = Instant::now();
    logger.info("third", vec![]);
    assert!(started.elapsed() < Duration::from_millis(100));
    assert_eq!(logger.dropped(), 1);

    let consumer = spawn_consumer(&logger);
    wait_for_records(&sink, 2).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(sink.messages(), vec!["first", "second"]);

    logger.stop().await;
    consumer.await.unwrap();
}

#[tokio::test]
async fn test_many_producers_never_block() {
    let sink = MemorySink::new();
    let logger = AsyncLogger::with_sink(8, sink.clone());

    let producers: Vec<_> = (0..16)
        .map(|p| {
            let logger = logger.clone();
            tokio::spawn(async move {
                for i in 0..50 {
                    logger.info(format!("producer {} message {}", p, i), vec![]);
                }
            })
        })
        .collect();

    timeout(Duration::from_secs(2), async {
        for producer in producers {
            producer.await.unwrap();
        }
    })
    .await
    .expect("producers must not block on a full queue");

    // Nothing drained the queue: exactly `capacity` records were kept.
    assert_eq!(logger.dropped(), 16 * 50 - 8);
    logger.stop().await;
}

#[tokio::test]
async fn test_log_after_stop_is_dropped_silently() {
    let sink = MemorySink::new();
    let logger = AsyncLogger::with_sink(4, sink.clone());
    let consumer = spawn_consumer(&logger);

    logger.stop().await;
    consumer.await.unwrap();

    let started = Instant::now();
    logger.info("too late", vec![]);
    logger.error("also too late", Some(&std::io::Error::other("x")), vec![]);
    assert!(started.elapsed() < Duration::from_millis(100));

    assert_eq!(logger.dropped(), 2);
    assert!(sink.is_empty());
    assert_eq!(logger.state(), PipelineState::Stopped);
}

#[tokio::test]
async fn test_stop_twice_does_not_panic() {
    let logger = AsyncLogger::with_sink(4, MemorySink::new());
    let consumer = spawn_consumer(&logger);

    logger.stop().await;
    logger.stop().await;

    consumer.await.unwrap();
    assert!(logger.is_stopped());
}

#[tokio::test]
async fn test_concurrent_stops_all_return_after_consumer_exit() {
    let logger = AsyncLogger::with_sink(4, MemorySink::new());
    let consumer = spawn_consumer(&logger);

    let stoppers: Vec<_> = (0..8)
        .map(|_| {
            let logger = logger.clone();
            tokio::spawn(async move { logger.stop().await })
        })
        .collect();

    for stopper in stoppers {
        stopper.await.unwrap();
    }

    timeout(Duration::from_secs(1), consumer)
        .await
        .expect("consumer should have exited")
        .unwrap();
    assert_eq!(logger.state(), PipelineState::Stopped);
}

#[tokio::test]
async fn test_stop_without_consumer_releases_queue() {
    let sink = MemorySink::new();
    let logger = AsyncLogger::with_sink(4, sink.clone());
    logger.info("never rendered", vec![]);

    timeout(Duration::from_secs(1), logger.stop())
        .await
        .expect("stop must not wait for a consumer that never started");

    // A consumer started after stop exits immediately.
    timeout(Duration::from_secs(1), logger.run(std::future::pending()))
        .await
        .expect("run after stop should return");
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_cancellation_exits_consumer_loop() {
    let sink = MemorySink::new();
    let logger = AsyncLogger::with_sink(4, sink.clone());
    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

    let consumer = {
        let logger = logger.clone();
        tokio::spawn(async move {
            logger
                .run(async move {
                    let _ = cancel_rx.await;
                })
                .await
        })
    };

    logger.info("before cancel", vec![]);
    wait_for_records(&sink, 1).await;

    cancel_tx.send(()).unwrap();
    timeout(Duration::from_secs(1), consumer)
        .await
        .expect("consumer should exit on cancellation")
        .unwrap();

    // Not stopped: records are accepted again but nobody renders them.
    assert_eq!(logger.state(), PipelineState::Idle);
    logger.info("after cancel", vec![]);
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(sink.messages(), vec!["before cancel"]);

    logger.stop().await;
}
