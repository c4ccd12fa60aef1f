//! Read-only navigation over a finished [`Trace`].
//!
//! Stepping forward or backward is pure index arithmetic; nothing is
//! re-executed and the trace is never modified.

use super::{Snapshot, Trace};
use std::fmt;

/// Why a cursor move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    AtStart,
    AtEnd,
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorError::AtStart => write!(f, "Already at the beginning of the trace"),
            CursorError::AtEnd => write!(f, "Already at the end of the trace"),
            CursorError::OutOfRange { index, len } => {
                write!(f, "Step {} is outside the trace (0..{})", index, len)
            }
        }
    }
}

impl std::error::Error for CursorError {}

/// A position within a trace
#[derive(Debug, Clone)]
pub struct TraceCursor {
    trace: Trace,
    position: usize,
}

impl TraceCursor {
    pub fn new(trace: Trace) -> Self {
        TraceCursor { trace, position: 0 }
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Snapshot at the current position
    pub fn current(&self) -> Option<&Snapshot> {
        self.trace.get(self.position)
    }

    /// Snapshot just before the current one, for change highlighting
    pub fn previous(&self) -> Option<&Snapshot> {
        self.position.checked_sub(1).and_then(|i| self.trace.get(i))
    }

    pub fn is_at_start(&self) -> bool {
        self.position == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.trace.len()
    }

    pub fn step_forward(&mut self) -> Result<(), CursorError> {
        if self.is_at_end() {
            return Err(CursorError::AtEnd);
        }
        self.position += 1;
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), CursorError> {
        if self.is_at_start() {
            return Err(CursorError::AtStart);
        }
        self.position -= 1;
        Ok(())
    }

    /// Step forward up to `n` times; returns how many steps were taken
    pub fn step_forward_by(&mut self, n: usize) -> usize {
        let target = (self.position + n).min(self.trace.len().saturating_sub(1));
        let stepped = target - self.position;
        self.position = target;
        stepped
    }

    pub fn rewind_to_start(&mut self) {
        self.position = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.trace.len().saturating_sub(1);
    }

    pub fn seek(&mut self, index: usize) -> Result<(), CursorError> {
        if index >= self.trace.len() {
            return Err(CursorError::OutOfRange {
                index,
                len: self.trace.len(),
            });
        }
        self.position = index;
        Ok(())
    }
}
