// Single-worker pipeline properties: FIFO processing, completion ordering,
// shutdown semantics, and the barrier timing scenario.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::RecordingObserver;
use spindle::{
    spawn_worker, spawn_worker_with_observer, DispatchConfig, Dispatcher, MailboxError, Message,
    SpinObserver,
};

fn fast_config() -> DispatchConfig {
    DispatchConfig::default().with_spin_delay(Duration::from_millis(1))
}

#[tokio::test]
async fn work_items_are_processed_in_send_order() {
    let observer = Arc::new(RecordingObserver::default());
    let worker =
        spawn_worker_with_observer(&fast_config(), Some(observer.clone() as Arc<dyn SpinObserver>));

    for id in 0..50 {
        worker.send(Message::work(id)).await.unwrap();
    }
    let (complete, handle) = Message::complete();
    worker.send(complete).await.unwrap();
    handle.wait_timeout(Duration::from_secs(10)).await.unwrap();

    let expected: Vec<u64> = (0..50).collect();
    assert_eq!(observer.processed_ids(), expected);

    worker.shutdown();
}

#[tokio::test]
async fn completion_resolves_only_after_all_work() {
    let observer = Arc::new(RecordingObserver::default());
    let worker =
        spawn_worker_with_observer(&fast_config(), Some(observer.clone() as Arc<dyn SpinObserver>));

    let total = 100;
    for id in 0..total {
        worker.send(Message::work(id)).await.unwrap();
    }
    let (complete, handle) = Message::complete();
    worker.send(complete).await.unwrap();
    handle.wait_timeout(Duration::from_secs(10)).await.unwrap();

    // Every item preceding the barrier must have been processed at the moment
    // the barrier resolved; nothing was sent after, so equality holds.
    assert_eq!(observer.count(), total as usize);

    worker.shutdown();
}

#[tokio::test]
async fn barrier_survives_multiple_runs_on_one_worker() {
    let worker = spawn_worker(&fast_config());

    for _ in 0..3 {
        for id in 0..10 {
            worker.send(Message::work(id)).await.unwrap();
        }
        let (complete, handle) = Message::complete();
        worker.send(complete).await.unwrap();
        handle.wait_timeout(Duration::from_secs(5)).await.unwrap();
    }

    worker.shutdown();
}

#[tokio::test]
async fn shutdown_is_idempotent() {
    let worker = spawn_worker(&fast_config());

    worker.shutdown();
    worker.shutdown();

    assert_eq!(
        worker.send(Message::work(0)).await,
        Err(MailboxError::Closed)
    );
    assert_eq!(
        worker.send(Message::work(1)).await,
        Err(MailboxError::Closed)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn ten_items_take_at_least_the_summed_delay() {
    let config = DispatchConfig::default()
        .with_run_length(10)
        .with_spin_delay(Duration::from_millis(10));
    let dispatcher = Dispatcher::new(config);

    let report = dispatcher.run_sequential_ordered().await.unwrap();

    assert!(report.synchronized);
    assert!(
        report.elapsed >= Duration::from_millis(100),
        "elapsed {:?} below the 10 x 10ms floor",
        report.elapsed
    );
    // Generous scheduling slack; the point is the lower bound above.
    assert!(
        report.elapsed < Duration::from_secs(2),
        "elapsed {:?} far above the expected ~100ms",
        report.elapsed
    );
}
