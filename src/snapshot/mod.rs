// Snapshot recording and the immutable trace

pub mod cursor;
pub mod table;

use crate::interpreter::errors::Halt;
use crate::memory::{store::VariableStore, value::Value};
use std::fmt;

pub use cursor::{CursorError, TraceCursor};
pub use table::{TraceRow, TraceTable};

/// Captured `PRINT` output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputLog {
    pub lines: Vec<OutputLine>,
}

impl OutputLog {
    pub fn new() -> Self {
        OutputLog { lines: Vec::new() }
    }

    /// Append one printed value's textual form
    pub fn print(&mut self, text: String, line: usize) {
        self.lines.push(OutputLine { text, line });
    }

    /// Get all printed lines as a vector of strings
    pub fn get_output(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A line of printed output with the index of the `PRINT` that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct OutputLine {
    pub text: String,
    pub line: usize,
}

/// Whether an indexed access read or wrote the element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

/// One indexed access (`items[i]`) performed while executing a line.
///
/// Sequence-valued variables are kept out of the trace table's scalar
/// columns; these events are how a view shows what happened to them.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccess {
    pub name: String,
    pub index: usize,
    pub value: Value,
    pub kind: AccessKind,
}

impl fmt::Display for ArrayAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.kind {
            AccessKind::Read => "->",
            AccessKind::Write => "<-",
        };
        write!(f, "{}[{}] {} {}", self.name, self.index, arrow, self.value)
    }
}

/// Snapshot of execution state after one executed line
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Index of the line that produced this snapshot; `None` before the
    /// first line runs
    pub line: Option<usize>,
    pub variables: VariableStore,
    pub output: OutputLog,
    pub accesses: Vec<ArrayAccess>,
}

impl Snapshot {
    /// The "not started" snapshot every trace begins with
    pub fn initial() -> Self {
        Snapshot {
            line: None,
            variables: VariableStore::new(),
            output: OutputLog::new(),
            accesses: Vec::new(),
        }
    }

    pub fn is_initial(&self) -> bool {
        self.line.is_none()
    }

    /// Value of `name` at this instant
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough: text bytes plus a fixed overhead per output line and access
        let output_size: usize = self.output.lines.iter().map(|l| l.text.len() + 32).sum();
        let access_size = self.accesses.len() * 64;

        std::mem::size_of::<Snapshot>()
            + self.variables.estimated_size()
            + output_size
            + access_size
    }
}

/// Why trace generation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The program counter ran off the end of the program
    Completed,
    /// The step budget ran out; the program may still have had work to do
    StepLimit { steps: usize },
    /// Recording stopped because the snapshot memory budget was reached
    SnapshotLimit { limit: usize },
}

impl Termination {
    pub fn is_complete(&self) -> bool {
        matches!(self, Termination::Completed)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Completed => write!(f, "Program completed"),
            Termination::StepLimit { steps } => {
                write!(f, "Stopped after {} steps (step limit reached)", steps)
            }
            Termination::SnapshotLimit { limit } => {
                write!(f, "Stopped recording at the {} byte snapshot budget", limit)
            }
        }
    }
}

/// Collects snapshots during one run under a memory budget
#[derive(Debug)]
pub(crate) struct TraceRecorder {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl TraceRecorder {
    pub fn new(max_memory: usize) -> Self {
        TraceRecorder {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to the trace. The first snapshot is always accepted.
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), Halt> {
        let snapshot_size = snapshot.estimated_size();

        if !self.snapshots.is_empty() && self.current_memory + snapshot_size > self.max_memory {
            return Err(Halt::SnapshotLimitExceeded {
                current: self.current_memory,
                limit: self.max_memory,
            });
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Seal the recording into an immutable [`Trace`]
    pub fn finish(self, termination: Termination) -> Trace {
        Trace {
            snapshots: self.snapshots,
            termination,
        }
    }
}

/// The ordered snapshots of one run.
///
/// Immutable once produced: the only access is by shared reference, so
/// fetching any snapshot in any order always yields the same data.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    snapshots: Vec<Snapshot>,
    termination: Termination,
}

impl Trace {
    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Everything printed by the end of the trace
    pub fn final_output(&self) -> Vec<String> {
        self.last().map(|s| s.output.get_output()).unwrap_or_default()
    }

    /// Snapshots produced by source line `line`, in execution order
    pub fn snapshots_for_line(&self, line: usize) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter().filter(move |s| s.line == Some(line))
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_budget() {
        let snapshot = Snapshot::initial();
        let size = snapshot.estimated_size();
        let mut recorder = TraceRecorder::new(size * 2);

        assert!(recorder.push(snapshot.clone()).is_ok());
        assert!(recorder.push(snapshot.clone()).is_ok());
        assert_eq!(
            recorder.push(snapshot),
            Err(Halt::SnapshotLimitExceeded {
                current: size * 2,
                limit: size * 2,
            })
        );
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_recorder_keeps_initial_snapshot() {
        let mut recorder = TraceRecorder::new(0);
        assert!(recorder.push(Snapshot::initial()).is_ok());
        assert!(recorder.push(Snapshot::initial()).is_err());
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_output_log() {
        let mut log = OutputLog::new();
        log.print("5".to_string(), 3);
        log.print("Go!".to_string(), 6);
        assert_eq!(log.get_output(), vec!["5".to_string(), "Go!".to_string()]);
        assert_eq!(log.lines[1].line, 6);
    }

    #[test]
    fn test_access_display() {
        let read = ArrayAccess {
            name: "items".to_string(),
            index: 2,
            value: Value::Number(8.0),
            kind: AccessKind::Read,
        };
        assert_eq!(read.to_string(), "items[2] -> 8");
    }
}
