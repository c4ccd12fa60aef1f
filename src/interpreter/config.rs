//! Run configuration

use super::constants::{DEFAULT_SNAPSHOT_MEMORY_LIMIT, DEFAULT_STEP_LIMIT};

/// Budgets for one trace run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceConfig {
    /// Maximum number of lines visited, structural lines included
    pub step_limit: usize,
    /// Maximum estimated bytes of recorded snapshots
    pub snapshot_memory_limit: usize,
}

impl TraceConfig {
    pub fn with_step_limit(mut self, step_limit: usize) -> Self {
        self.step_limit = step_limit;
        self
    }

    pub fn with_snapshot_memory_limit(mut self, limit: usize) -> Self {
        self.snapshot_memory_limit = limit;
        self
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            step_limit: DEFAULT_STEP_LIMIT,
            snapshot_memory_limit: DEFAULT_SNAPSHOT_MEMORY_LIMIT,
        }
    }
}
