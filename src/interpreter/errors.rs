//! Internal halt reasons for the executor
//!
//! The tracer has no error surface: bad tokens are dropped, unknown lines
//! are skipped, unbound names read as `0`. The only way a run stops early is
//! by exhausting a budget, and even that is reported as a
//! [`Termination`](crate::snapshot::Termination) on the finished trace
//! rather than as an error.
//!
//! [`Halt`] is the value the executor's step functions return through `?`
//! to unwind out of the run loop when a budget is exhausted.

use std::fmt;

/// Reasons the executor stops before the end of the program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// The step budget guarding against infinite loops ran out
    StepLimitReached { steps: usize },

    /// Snapshot history would exceed its memory budget
    SnapshotLimitExceeded { current: usize, limit: usize },
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Halt::StepLimitReached { steps } => {
                write!(f, "Step limit reached after {} steps", steps)
            }
            Halt::SnapshotLimitExceeded { current, limit } => write!(
                f,
                "Snapshot memory limit exceeded: {} bytes used of {}",
                current, limit
            ),
        }
    }
}

impl std::error::Error for Halt {}
