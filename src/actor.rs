use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, trace};

use crate::config::{BackpressureStrategy, DispatchConfig};
use crate::error::MailboxError;
use crate::mailbox::Mailbox;
use crate::message::Message;
use crate::observer::{SpinObserver, WorkEvent};

static NEXT_ACTOR_ID: AtomicU64 = AtomicU64::new(0);

pub(crate) fn next_actor_path(kind: &str) -> String {
    format!("spindle://{kind}-{}", NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
}

/// Cloneable sender half of an actor.
///
/// The handle only exposes the mailbox: it can enqueue messages and close the
/// mailbox, never observe the actor's internal state. All clones refer to the
/// same actor; once any of them calls [`shutdown`](Self::shutdown), every
/// subsequent `send` fails with [`MailboxError::Closed`].
#[derive(Debug, Clone)]
pub struct ActorHandle {
    mailbox: Arc<Mailbox>,
    default_strategy: BackpressureStrategy,
}

impl ActorHandle {
    pub(crate) fn new(mailbox: Arc<Mailbox>, default_strategy: BackpressureStrategy) -> Self {
        Self {
            mailbox,
            default_strategy,
        }
    }

    /// Enqueues a message using the handle's default backpressure strategy.
    /// Blocks the caller while the mailbox is full under
    /// [`BackpressureStrategy::Block`].
    pub async fn send(&self, msg: Message) -> Result<(), MailboxError> {
        self.mailbox.push(msg, self.default_strategy.clone()).await
    }

    /// Enqueues a message with an explicit backpressure strategy.
    pub async fn send_with_strategy(
        &self,
        msg: Message,
        strategy: BackpressureStrategy,
    ) -> Result<(), MailboxError> {
        self.mailbox.push(msg, strategy).await
    }

    /// Closes the actor's mailbox. Queued messages are discarded and the
    /// receive loop exits. Idempotent.
    pub fn shutdown(&self) {
        self.mailbox.close();
    }

    pub fn is_alive(&self) -> bool {
        !self.mailbox.is_closed()
    }

    pub fn path(&self) -> &str {
        self.mailbox.path()
    }
}

/// Spawns a worker actor and returns its handle.
pub fn spawn_worker(config: &DispatchConfig) -> ActorHandle {
    spawn_worker_with_observer(config, None)
}

/// Spawns a worker actor with an optional per-item observer.
pub fn spawn_worker_with_observer(
    config: &DispatchConfig,
    observer: Option<Arc<dyn SpinObserver>>,
) -> ActorHandle {
    let path = next_actor_path("worker");
    let mailbox = Arc::new(Mailbox::new(config.mailbox_capacity, path));
    let handle = ActorHandle::new(mailbox.clone(), config.backpressure.clone());
    tokio::spawn(worker_loop(mailbox, config.spin_delay, observer));
    handle
}

/// The worker's receive loop: dequeue one message at a time, spin on work,
/// resolve barriers on completion notices. The loop stays alive across runs
/// until the mailbox closes.
async fn worker_loop(
    mailbox: Arc<Mailbox>,
    spin_delay: Duration,
    observer: Option<Arc<dyn SpinObserver>>,
) {
    debug!(path = mailbox.path(), "worker started");
    while let Some(msg) = mailbox.pop().await {
        match msg {
            Message::Work(item) => {
                let started = Instant::now();
                tokio::time::sleep(spin_delay).await;
                trace!(path = mailbox.path(), id = item.id, "work item processed");
                if let Some(observer) = &observer {
                    let thread = std::thread::current()
                        .name()
                        .unwrap_or("unnamed")
                        .to_string();
                    observer
                        .on_item_processed(WorkEvent {
                            id: item.id,
                            elapsed: started.elapsed(),
                            worker: mailbox.path().to_string(),
                            thread,
                        })
                        .await;
                }
            }
            Message::Complete(notice) => {
                // Log-and-continue: a bad control message must not kill the
                // loop for the rest of the run.
                if let Err(e) = notice.handle.resolve() {
                    error!(path = mailbox.path(), error = %e, "completion handle already resolved");
                }
            }
        }
    }
    debug!(path = mailbox.path(), "worker stopped");
}
