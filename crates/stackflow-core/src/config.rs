//! Orchestrator configuration

use std::time::Duration;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_TAIL_INTERVAL: Duration = Duration::from_secs(2);

/// Timing parameters for orchestrated operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Delay between describe calls while a change-set is being created
    pub poll_interval: Duration,

    /// Delay between event fetches while tailing a stack
    pub tail_interval: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            tail_interval: DEFAULT_TAIL_INTERVAL,
        }
    }
}

impl OrchestratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_tail_interval(mut self, interval: Duration) -> Self {
        self.tail_interval = interval;
        self
    }
}
