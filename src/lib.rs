//! # Introduction
//!
//! tracetable executes small pseudocode programs line by line and records a
//! snapshot of every variable after each line that does something. The
//! resulting trace is laid out as a classic trace table, either printed as
//! text or stepped through forward and backward in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Line classifier + expression parser → Program
//!        → Interpreter → Trace → Table / TUI
//! ```
//!
//! 1. [`parser`]: tokenises expressions, builds expression trees and
//!    classifies each source line into a statement shape.
//! 2. [`interpreter`]: walks the lines with an explicit program counter and
//!    records a [`snapshot::Snapshot`] after every observable line.
//! 3. [`memory`]: dynamically typed [`memory::value::Value`]s and the
//!    [`memory::store::VariableStore`] they are bound in.
//! 4. [`snapshot`]: the immutable [`snapshot::Trace`], a read-only
//!    [`snapshot::TraceCursor`] and the [`snapshot::TraceTable`] projection.
//! 5. [`presets`]: built-in teaching programs.
//! 6. [`ui`]: ratatui-based viewer; not part of the stable library API.
//!
//! ## Language
//!
//! Statements: assignment (`x = e`, `xs[i] = e`), `PRINT e`,
//! `IF e THEN` / `ELSEIF e THEN` / `ELSE` / `ENDIF`, `WHILE e` / `ENDWHILE`.
//! Expressions: numbers, strings, `true`/`false`, array literals, indexing,
//! `+ - * / %`, comparisons, `AND`/`OR`/`NOT`.
//!
//! ```
//! let source = "n = 2\nWHILE n > 0\n  PRINT n\n  n = n - 1\nENDWHILE";
//! let trace = tracetable::interpreter::trace_source(source);
//! assert_eq!(trace.final_output(), vec!["2", "1"]);
//! ```

pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod presets;
pub mod snapshot;
pub mod ui;
