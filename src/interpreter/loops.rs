//! `WHILE` / `ENDWHILE` execution.
//!
//! The guard is re-evaluated every time control reaches the `WHILE` line, so a
//! loop that runs N times records N + 1 guard snapshots. `ENDWHILE` itself is
//! never recorded; it only jumps back to its `WHILE`.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::Halt;
use crate::interpreter::jumps::{find_matching_endwhile, find_matching_while};
use crate::parser::ast::Expr;

impl Interpreter<'_> {
    pub(crate) fn execute_while(&mut self, condition: Option<&Expr>) -> Result<(), Halt> {
        let holds = self.evaluate_condition(condition);
        self.take_snapshot(self.pc)?;

        if holds {
            self.pc += 1;
        } else {
            let lines = self.program.lines();
            self.pc = find_matching_endwhile(lines, self.pc).map_or(lines.len(), |end| end + 1);
        }
        Ok(())
    }

    pub(crate) fn execute_endwhile(&mut self) {
        match find_matching_while(self.program.lines(), self.pc) {
            Some(start) => self.pc = start,
            None => {
                tracing::debug!(line = self.pc, "ENDWHILE without WHILE");
                self.pc += 1;
            }
        }
    }
}
