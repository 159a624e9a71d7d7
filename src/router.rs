use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, trace};

use crate::actor::{next_actor_path, ActorHandle};
use crate::barrier::CompletionHandle;
use crate::config::DispatchConfig;
use crate::error::DispatchError;
use crate::mailbox::Mailbox;
use crate::message::{CompletionNotice, Message};

/// Spawns a router actor over a fixed pool of child workers.
///
/// The router presents a single [`ActorHandle`]: work messages are forwarded
/// unmodified to the children in pure round-robin order, and a completion
/// notice is fanned out as one fresh barrier per child, aggregated, and only
/// then acknowledged. The router processes no work items itself.
///
/// Shutting the router down does not shut down its children; the topology
/// owner tears those down separately.
pub fn spawn_router(children: Vec<ActorHandle>, config: &DispatchConfig) -> ActorHandle {
    assert!(!children.is_empty(), "router requires at least one child");
    let path = next_actor_path("router");
    let mailbox = Arc::new(Mailbox::new(config.mailbox_capacity, path));
    let handle = ActorHandle::new(mailbox.clone(), config.backpressure.clone());
    tokio::spawn(router_loop(mailbox, children, config.completion_timeout));
    handle
}

async fn router_loop(
    mailbox: Arc<Mailbox>,
    children: Vec<ActorHandle>,
    completion_timeout: Duration,
) {
    debug!(
        path = mailbox.path(),
        pool_size = children.len(),
        "router started"
    );
    // Round-robin cursor. Private to this loop; no other execution context
    // ever touches it.
    let mut next: u64 = 0;
    while let Some(msg) = mailbox.pop().await {
        match msg {
            Message::Work(item) => {
                let child = &children[(next % children.len() as u64) as usize];
                if let Err(e) = child.send(Message::Work(item)).await {
                    error!(
                        path = mailbox.path(),
                        child = child.path(),
                        id = item.id,
                        error = %e,
                        "failed to forward work item"
                    );
                }
                next += 1;
            }
            Message::Complete(notice) => {
                trace!(path = mailbox.path(), "fanning out completion request");
                match aggregate_completions(&children, completion_timeout).await {
                    Ok(()) => {
                        if let Err(e) = notice.handle.resolve() {
                            error!(path = mailbox.path(), error = %e, "completion handle already resolved");
                        }
                    }
                    Err(e) => {
                        // Leave the incoming handle pending: the caller's own
                        // bounded wait reports the failure instead of a hang.
                        error!(path = mailbox.path(), error = %e, "completion aggregation failed");
                    }
                }
            }
        }
    }
    debug!(path = mailbox.path(), "router stopped");
}

/// Sends one fresh completion barrier to every child, in pool order, and
/// waits for all of them. Because each child's mailbox is FIFO and all work
/// seen before the incoming notice has already been forwarded, each delegated
/// barrier lands strictly after that child's share of the work.
async fn aggregate_completions(
    children: &[ActorHandle],
    timeout: Duration,
) -> Result<(), DispatchError> {
    let mut handles = Vec::with_capacity(children.len());
    for child in children {
        let handle = CompletionHandle::new();
        child
            .send(Message::Complete(CompletionNotice {
                handle: handle.clone(),
            }))
            .await?;
        handles.push(handle);
    }

    let waits = handles.iter().map(|handle| handle.wait_timeout(timeout));
    for result in join_all(waits).await {
        result?;
    }
    Ok(())
}
