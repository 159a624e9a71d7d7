use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::actor::{spawn_worker_with_observer, ActorHandle};
use crate::config::DispatchConfig;
use crate::error::DispatchError;
use crate::message::Message;
use crate::observer::SpinObserver;
use crate::router::spawn_router;

/// The three dispatch strategies under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One worker, fire-and-forget sends, no completion barrier. The naive
    /// baseline: the run is declared done as soon as the sends are issued.
    SequentialUnordered,
    /// One worker fed through an ordered pipeline terminated by a barrier.
    SequentialOrdered,
    /// A router fanning out to a fixed worker pool, with barrier aggregation.
    Distributed,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::SequentialUnordered => write!(f, "sequential-unordered"),
            Strategy::SequentialOrdered => write!(f, "sequential-ordered"),
            Strategy::Distributed => write!(f, "distributed"),
        }
    }
}

/// Outcome of one benchmark run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub strategy: Strategy,
    pub items: usize,
    pub elapsed: Duration,
    /// Whether `elapsed` covers actual processing. The unordered strategy
    /// reports only the send phase ("unsynchronized completion") and is
    /// marked false.
    pub synchronized: bool,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} items in {:?}{}",
            self.strategy,
            self.items,
            self.elapsed,
            if self.synchronized {
                ""
            } else {
                " (send phase only, completion not awaited)"
            }
        )
    }
}

/// Orchestrates one dispatch run: builds the topology for the chosen
/// strategy, sends the message sequence, awaits the barrier where the
/// strategy has one, and tears the topology down.
pub struct Dispatcher {
    config: DispatchConfig,
    observer: Option<Arc<dyn SpinObserver>>,
}

impl Dispatcher {
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            config,
            observer: None,
        }
    }

    /// Installs a per-item observer, handed to every worker spawned for a
    /// run. Purely for display; runs behave identically without one.
    pub fn with_observer(mut self, observer: Arc<dyn SpinObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub async fn run(&self, strategy: Strategy) -> Result<RunReport, DispatchError> {
        match strategy {
            Strategy::SequentialUnordered => self.run_sequential_unordered().await,
            Strategy::SequentialOrdered => self.run_sequential_ordered().await,
            Strategy::Distributed => self.run_distributed().await,
        }
    }

    /// Naive baseline: every send is scheduled as its own task with no
    /// ordering between them and no barrier. Elapsed time is snapshotted as
    /// soon as the sends are issued, so it does not cover processing; this
    /// asymmetry is deliberate and reported via `synchronized: false`.
    pub async fn run_sequential_unordered(&self) -> Result<RunReport, DispatchError> {
        let worker = spawn_worker_with_observer(&self.config, self.observer.clone());
        debug!(worker = worker.path(), "unordered run started");

        let started = Instant::now();
        let mut sends = Vec::with_capacity(self.config.run_length);
        for id in 0..self.config.run_length as u64 {
            let handle = worker.clone();
            sends.push(tokio::spawn(async move {
                handle.send(Message::work(id)).await
            }));
        }
        let elapsed = started.elapsed();

        // Join the send tasks before teardown so none of them races into a
        // closed mailbox; the elapsed figure above is already locked in.
        for send in sends {
            let _ = send.await;
        }

        // The elapsed figure ignores processing, but the work itself still
        // happens: drain the worker through a teardown barrier so shutdown
        // does not discard the queued items.
        let (complete, drained) = Message::complete();
        if worker.send(complete).await.is_ok() {
            if let Err(e) = drained.wait_timeout(self.config.completion_timeout).await {
                debug!(worker = worker.path(), error = %e, "teardown drain incomplete");
            }
        }
        worker.shutdown();

        let report = RunReport {
            strategy: Strategy::SequentialUnordered,
            items: self.config.run_length,
            elapsed,
            synchronized: false,
        };
        info!(%report, "run finished");
        Ok(report)
    }

    /// Ordered pipeline through a single worker, terminated by a completion
    /// barrier the driver awaits.
    pub async fn run_sequential_ordered(&self) -> Result<RunReport, DispatchError> {
        let worker = spawn_worker_with_observer(&self.config, self.observer.clone());
        debug!(worker = worker.path(), "ordered run started");

        let started = Instant::now();
        let result = self.drive(&worker).await;
        let elapsed = started.elapsed();

        worker.shutdown();
        result?;

        let report = RunReport {
            strategy: Strategy::SequentialOrdered,
            items: self.config.run_length,
            elapsed,
            synchronized: true,
        };
        info!(%report, "run finished");
        Ok(report)
    }

    /// Router over a fixed worker pool; the router aggregates its children's
    /// barriers before acknowledging the driver's.
    pub async fn run_distributed(&self) -> Result<RunReport, DispatchError> {
        let workers: Vec<ActorHandle> = (0..self.config.pool_size)
            .map(|_| spawn_worker_with_observer(&self.config, self.observer.clone()))
            .collect();
        let router = spawn_router(workers.clone(), &self.config);
        debug!(
            router = router.path(),
            pool_size = workers.len(),
            "distributed run started"
        );

        let started = Instant::now();
        let result = self.drive(&router).await;
        let elapsed = started.elapsed();

        router.shutdown();
        for worker in &workers {
            worker.shutdown();
        }
        result?;

        let report = RunReport {
            strategy: Strategy::Distributed,
            items: self.config.run_length,
            elapsed,
            synchronized: true,
        };
        info!(%report, "run finished");
        Ok(report)
    }

    /// Sends the full work sequence followed by one completion message, then
    /// awaits its barrier within the configured timeout.
    async fn drive(&self, target: &ActorHandle) -> Result<(), DispatchError> {
        for id in 0..self.config.run_length as u64 {
            target.send(Message::work(id)).await?;
        }
        let (complete, handle) = Message::complete();
        target.send(complete).await?;
        handle.wait_timeout(self.config.completion_timeout).await?;
        Ok(())
    }
}
