use std::time::Duration;
use thiserror::Error;

/// Errors related to mailbox operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MailboxError {
    #[error("mailbox is full (capacity: {capacity})")]
    Full { capacity: usize },
    #[error("mailbox is closed")]
    Closed,
}

/// Errors related to the completion barrier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// A handle was resolved twice. Each handle is created for exactly one
    /// resolution, so this indicates a fan-out bookkeeping bug.
    #[error("completion handle resolved twice")]
    DoubleResolution,
    #[error("completion wait timed out after {0:?}")]
    TimedOut(Duration),
}

/// Driver-level rollup for a dispatch run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("mailbox error during dispatch: {0}")]
    Mailbox(#[from] MailboxError),
    #[error("completion barrier error: {0}")]
    Completion(#[from] CompletionError),
}
