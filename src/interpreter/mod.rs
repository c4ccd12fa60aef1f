//! Pseudocode execution engine
//!
//! This module turns a parsed [`Program`] into a [`Trace`]:
//! - [`engine`]: the line executor and its run loop
//! - [`expressions`]: expression evaluation against a variable store
//! - [`jumps`]: depth-tracking searches for matching block lines
//! - [`errors`]: reasons a run stops early
//! - [`config`]: step and snapshot budgets
//!
//! # Execution Model
//!
//! Execution is a program counter over the flat line list. Block structure is
//! resolved at run time by scanning for the matching `ENDIF`/`ENDWHILE`, and
//! `ELSEIF`/`ELSE` lines only run when a false condition jumped to them.
//! Every line that does something observable records one snapshot.

pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod expressions;
pub mod jumps;
pub mod ops;

mod branches;
mod loops;
mod statements;

pub use config::TraceConfig;
pub use engine::Interpreter;

use crate::parser::ast::Program;
use crate::snapshot::Trace;

/// Execute `program` under `config` and return its trace.
pub fn trace_program(program: &Program, config: &TraceConfig) -> Trace {
    Interpreter::new(program, config).run()
}

/// Parse and execute `source` with the default budgets.
pub fn trace_source(source: &str) -> Trace {
    let program = Program::parse(source);
    trace_program(&program, &TraceConfig::default())
}
