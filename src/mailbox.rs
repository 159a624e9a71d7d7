use flume::{Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

use crate::config::BackpressureStrategy;
use crate::error::MailboxError;
use crate::message::Message;

/// Bounded multi-producer, single-consumer FIFO queue owned by one actor.
///
/// Multiple senders may push concurrently; only the owning actor's loop ever
/// pops. Messages are popped in the exact order they were successfully
/// enqueued. Closing the mailbox discards whatever is still queued and makes
/// every subsequent push fail with [`MailboxError::Closed`].
#[derive(Debug)]
pub struct Mailbox {
    sender: Sender<Message>,
    receiver: Receiver<Message>,
    path: String,
    capacity: usize,
    closed: AtomicBool,
    /// Wakes the consumer blocked in `pop` when the mailbox closes.
    closed_notify: Notify,
}

impl Mailbox {
    pub fn new(capacity: usize, path: impl Into<String>) -> Self {
        let (sender, receiver) = flume::bounded(capacity);
        Self {
            sender,
            receiver,
            path: path.into(),
            capacity,
            closed: AtomicBool::new(false),
            closed_notify: Notify::new(),
        }
    }

    /// Enqueues a message, applying the given backpressure strategy.
    pub async fn push(
        &self,
        msg: Message,
        strategy: BackpressureStrategy,
    ) -> Result<(), MailboxError> {
        if self.is_closed() {
            return Err(MailboxError::Closed);
        }
        match strategy {
            BackpressureStrategy::Block => {
                self.sender
                    .send_async(msg)
                    .await
                    .map_err(|_| MailboxError::Closed)?;
                // A close may have raced with a parked send: draining the
                // queue frees capacity and lets the send complete into a
                // mailbox nobody will pop. Discard the stray and report the
                // failure to the caller.
                if self.is_closed() {
                    while self.receiver.try_recv().is_ok() {}
                    return Err(MailboxError::Closed);
                }
                Ok(())
            }
            BackpressureStrategy::Error => match self.sender.try_send(msg) {
                Ok(()) => Ok(()),
                Err(flume::TrySendError::Full(_)) => Err(MailboxError::Full {
                    capacity: self.capacity,
                }),
                Err(flume::TrySendError::Disconnected(_)) => Err(MailboxError::Closed),
            },
        }
    }

    /// Dequeues the next message, waiting if the mailbox is empty. Returns
    /// `None` once the mailbox is closed; anything still queued at that point
    /// is discarded rather than drained.
    pub async fn pop(&self) -> Option<Message> {
        // Register for the close wake-up before checking the flag so a close
        // racing with us cannot strand the consumer.
        let closed = self.closed_notify.notified();
        if self.is_closed() {
            return None;
        }
        tokio::select! {
            biased;
            _ = closed => None,
            msg = self.receiver.recv_async() => msg.ok(),
        }
    }

    /// Closes the mailbox and discards queued messages. Idempotent.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        while self.receiver.try_recv().is_ok() {}
        self.closed_notify.notify_waiters();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Path of the actor this mailbox belongs to.
    pub fn path(&self) -> &str {
        &self.path
    }
}
