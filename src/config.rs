use std::time::Duration;

/// Fixed minimum processing time per work item.
pub const DEFAULT_SPIN_DELAY: Duration = Duration::from_millis(10);
/// Number of workers behind a router.
pub const DEFAULT_POOL_SIZE: usize = 4;
/// Work items per benchmark run.
pub const DEFAULT_RUN_LENGTH: usize = 1000;
pub const DEFAULT_MAILBOX_CAPACITY: usize = 1024;
pub const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

/// Defines the behavior when `send` is called on a full mailbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackpressureStrategy {
    /// The send asynchronously waits until space becomes available.
    Block,
    /// The send immediately returns `MailboxError::Full`.
    Error,
}

/// Tunables for a dispatch run. Everything is defaulted; there is no
/// configuration file.
#[derive(Clone, Debug)]
pub struct DispatchConfig {
    /// Number of work items sent per run (one completion message follows).
    pub run_length: usize,
    /// Number of workers behind the router in the distributed strategy.
    pub pool_size: usize,
    /// Synthetic processing time attributed to each work item.
    pub spin_delay: Duration,
    /// Capacity of every actor mailbox in the topology.
    pub mailbox_capacity: usize,
    /// Strategy applied when a mailbox is full.
    pub backpressure: BackpressureStrategy,
    /// Upper bound on any wait for a completion barrier.
    pub completion_timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            run_length: DEFAULT_RUN_LENGTH,
            pool_size: DEFAULT_POOL_SIZE,
            spin_delay: DEFAULT_SPIN_DELAY,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            backpressure: BackpressureStrategy::Block,
            completion_timeout: DEFAULT_COMPLETION_TIMEOUT,
        }
    }
}

impl DispatchConfig {
    pub fn with_run_length(mut self, run_length: usize) -> Self {
        self.run_length = run_length;
        self
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_spin_delay(mut self, spin_delay: Duration) -> Self {
        self.spin_delay = spin_delay;
        self
    }

    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }

    pub fn with_backpressure(mut self, strategy: BackpressureStrategy) -> Self {
        self.backpressure = strategy;
        self
    }

    pub fn with_completion_timeout(mut self, timeout: Duration) -> Self {
        self.completion_timeout = timeout;
        self
    }
}
