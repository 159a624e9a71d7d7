// Spindle — an actor-based dispatch benchmark.
//
// This crate compares three strategies for pushing a bounded stream of
// uniform "spin" work items through message-passing workers: a single
// sequential worker with fire-and-forget sends, a single worker behind an
// ordered barrier-terminated pipeline, and a router fanning out to a fixed
// worker pool with completion aggregation.
//
// The core is the actor/mailbox abstraction plus the completion-barrier
// protocol that tells a caller, exactly once, when all dispatched work has
// finished across one or many workers.

pub mod actor;
pub mod barrier;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod mailbox;
pub mod message;
pub mod observer;
pub mod router;

// Re-export commonly used types
pub use actor::{spawn_worker, spawn_worker_with_observer, ActorHandle};
pub use barrier::CompletionHandle;
pub use config::{BackpressureStrategy, DispatchConfig};
pub use dispatch::{Dispatcher, RunReport, Strategy};
pub use error::{CompletionError, DispatchError, MailboxError};
pub use message::{CompletionNotice, Message, WorkItem};
pub use observer::{SpinObserver, TracingObserver, WorkEvent};
pub use router::spawn_router;
