//! Trace table projection
//!
//! Turns a [`Trace`] into the rows and columns of a classic trace table:
//! one row per snapshot, one column per scalar variable, plus the indexed
//! accesses and any output the step produced.
//!
//! # Display Eligibility
//!
//! A variable gets a column only if it never held a sequence anywhere in the
//! trace. Sequence-valued variables are still present in every snapshot,
//! but they show up in the table through their [`ArrayAccess`] events
//! instead. Columns are ordered by first assignment.

use super::{ArrayAccess, Snapshot, Trace};
use crate::memory::value::Value;
use rustc_hash::FxHashSet;

/// Names of variables that held a sequence at any point in the trace
pub fn array_names(trace: &Trace) -> FxHashSet<String> {
    trace
        .iter()
        .flat_map(|s| s.variables.iter())
        .filter(|(_, value)| value.is_array())
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Cell comparison for change marking. A `NaN` that stays `NaN` is
/// unchanged.
fn same_value(now: &Value, before: &Value) -> bool {
    match (now, before) {
        (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
        _ => now == before,
    }
}

/// Variable names eligible for scalar-column display, in first-assignment
/// order
pub fn scalar_columns(trace: &Trace) -> Vec<String> {
    let arrays = array_names(trace);

    // The final snapshot's store remembers every name ever bound, in order
    let Some(last) = trace.last() else {
        return Vec::new();
    };

    last.variables
        .names()
        .iter()
        .filter(|name| !arrays.contains(name.as_str()))
        .cloned()
        .collect()
}

/// One scalar cell of a row
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    /// Textual value, `None` while the variable is still unbound
    pub value: Option<String>,
    /// Whether this step changed the value (first binding counts)
    pub changed: bool,
}

/// One row of the trace table
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRow {
    /// Position in the trace
    pub step: usize,
    /// 0-based source line, `None` for the initial row
    pub line: Option<usize>,
    pub cells: Vec<TableCell>,
    pub accesses: Vec<ArrayAccess>,
    /// Output printed by this step
    pub output: Vec<String>,
}

/// A trace laid out as a table
#[derive(Debug, Clone, PartialEq)]
pub struct TraceTable {
    pub columns: Vec<String>,
    pub rows: Vec<TraceRow>,
}

impl TraceTable {
    pub fn from_trace(trace: &Trace) -> Self {
        let columns = scalar_columns(trace);
        let mut rows = Vec::with_capacity(trace.len());
        let mut previous: Option<&Snapshot> = None;

        for (step, snapshot) in trace.iter().enumerate() {
            let cells = columns
                .iter()
                .map(|name| {
                    let now = snapshot.variable(name);
                    let before = previous.and_then(|p| p.variable(name));
                    let changed = match (now, before) {
                        (Some(now), Some(before)) => !same_value(now, before),
                        (Some(_), None) => true,
                        (None, _) => false,
                    };
                    TableCell {
                        value: now.map(ToString::to_string),
                        changed,
                    }
                })
                .collect();

            let printed_before = previous.map_or(0, |p| p.output.len());
            let output = snapshot.output.lines[printed_before.min(snapshot.output.len())..]
                .iter()
                .map(|l| l.text.clone())
                .collect();

            rows.push(TraceRow {
                step,
                line: snapshot.line,
                cells,
                accesses: snapshot.accesses.clone(),
                output,
            });
            previous = Some(snapshot);
        }

        TraceTable { columns, rows }
    }

    /// Plain-text rendering. Cells are filled only where the value changed,
    /// the way trace tables are written by hand.
    pub fn render_text(&self) -> String {
        let mut header = vec!["Step".to_string(), "Line".to_string()];
        header.extend(self.columns.iter().cloned());
        header.push("Array access".to_string());
        header.push("Output".to_string());

        let body: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                let mut cells = vec![
                    row.step.to_string(),
                    row.line.map_or_else(|| "-".to_string(), |l| (l + 1).to_string()),
                ];
                cells.extend(row.cells.iter().map(|c| {
                    if c.changed {
                        c.value.clone().unwrap_or_default()
                    } else {
                        String::new()
                    }
                }));
                cells.push(
                    row.accesses
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", "),
                );
                cells.push(row.output.join(" "));
                cells
            })
            .collect();

        let widths: Vec<usize> = (0..header.len())
            .map(|col| {
                std::iter::once(&header)
                    .chain(body.iter())
                    .map(|r| r[col].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let format_row = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:<width$}", c, width = *w))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = format_row(&header);
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        out.push('\n');
        for row in &body {
            out.push_str(&format_row(row));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::trace_source;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_arrays_excluded_from_columns() {
        let trace = trace_source("total = 0\nitems = [1, 2]\nx = 5\nx = [9]\ntotal = items[1]");
        assert_eq!(scalar_columns(&trace), vec!["total".to_string()]);
        let arrays = array_names(&trace);
        assert!(arrays.contains("items") && arrays.contains("x"));
    }

    #[test]
    fn test_rows_track_changes() {
        let trace = trace_source("a = 1\nb = 2\na = 1\nPRINT a + b");
        let table = TraceTable::from_trace(&trace);

        assert_eq!(table.columns, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(table.rows.len(), 5);
        assert_eq!(table.rows[0].line, None);
        assert_eq!(table.rows[0].cells[0].value, None);
        assert!(table.rows[1].cells[0].changed);
        // Re-assigning the same value is not a change
        assert!(!table.rows[3].cells[0].changed);
        assert_eq!(table.rows[4].output, vec!["3".to_string()]);
    }

    #[test]
    fn test_nan_unchanged_across_steps() {
        let trace = trace_source("x = 0 / 0\ny = 1\nx = 0 / 0\nx = 2");
        let table = TraceTable::from_trace(&trace);

        assert_eq!(table.columns, vec!["x".to_string(), "y".to_string()]);
        assert!(table.rows[1].cells[0].changed);
        assert_eq!(table.rows[1].cells[0].value.as_deref(), Some("NaN"));
        assert!(!table.rows[2].cells[0].changed);
        assert!(!table.rows[3].cells[0].changed);
        assert!(table.rows[4].cells[0].changed);
    }

    #[test]
    fn test_render_text() {
        let trace = trace_source("n = 2\nxs = [7]\nPRINT xs[0]");
        let text = TraceTable::from_trace(&trace).render_text();
        let rows: Vec<Vec<&str>> = text
            .lines()
            .map(|l| l.split('|').map(str::trim).collect())
            .collect();

        assert_eq!(rows[0], vec!["Step", "Line", "n", "Array access", "Output"]);
        assert_eq!(rows[2], vec!["0", "-", "", "", ""]);
        assert_eq!(rows[3], vec!["1", "1", "2", "", ""]);
        assert_eq!(rows[4], vec!["2", "2", "", "", ""]);
        assert_eq!(rows[5], vec!["3", "3", "", "xs[0] -> 7", "7"]);
    }
}
