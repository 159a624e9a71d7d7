use crate::barrier::CompletionHandle;

/// One unit of billable work. Created by the dispatcher, consumed exactly
/// once by whichever worker receives it, discarded after processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem {
    pub id: u64,
}

/// Control message terminating a dispatch run: everything sent before it has
/// been accepted, and `handle` must be resolved once the receiver (and, for a
/// router, all its delegates) has finished that work.
#[derive(Debug, Clone)]
pub struct CompletionNotice {
    pub handle: CompletionHandle,
}

/// The unit exchanged with an actor's mailbox.
#[derive(Debug, Clone)]
pub enum Message {
    Work(WorkItem),
    Complete(CompletionNotice),
}

impl Message {
    /// Shorthand for a work message.
    pub fn work(id: u64) -> Self {
        Message::Work(WorkItem { id })
    }

    /// Builds a completion message together with the awaiter half of its
    /// barrier.
    pub fn complete() -> (Self, CompletionHandle) {
        let handle = CompletionHandle::new();
        let message = Message::Complete(CompletionNotice {
            handle: handle.clone(),
        });
        (message, handle)
    }
}
