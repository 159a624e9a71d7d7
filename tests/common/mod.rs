use async_trait::async_trait;
use std::sync::Mutex;

use spindle::{SpinObserver, WorkEvent};

/// Observer that records every processed item, in processing order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<WorkEvent>>,
}

#[async_trait]
impl SpinObserver for RecordingObserver {
    async fn on_item_processed(&self, event: WorkEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<WorkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn processed_ids(&self) -> Vec<u64> {
        self.events.lock().unwrap().iter().map(|e| e.id).collect()
    }

    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}
