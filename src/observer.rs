use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// Snapshot emitted after each processed work item. Display-only: nothing in
/// the core depends on an observer being installed.
#[derive(Debug, Clone)]
pub struct WorkEvent {
    pub id: u64,
    /// Wall-clock time spent on this item by its worker.
    pub elapsed: Duration,
    /// Path of the worker that processed the item.
    pub worker: String,
    /// Name of the OS thread the worker loop ran on.
    pub thread: String,
}

/// Per-item observation sink injected into workers by the dispatcher.
#[async_trait]
pub trait SpinObserver: Send + Sync {
    async fn on_item_processed(&self, event: WorkEvent);
}

/// Observer that reports every processed item through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

#[async_trait]
impl SpinObserver for TracingObserver {
    async fn on_item_processed(&self, event: WorkEvent) {
        info!(
            id = event.id,
            elapsed_us = event.elapsed.as_micros() as u64,
            worker = %event.worker,
            thread = %event.thread,
            "work item processed"
        );
    }
}
