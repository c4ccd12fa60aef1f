//! `IF` / `ELSEIF` / `ELSE` execution.
//!
//! A false condition jumps to the next branch of the chain and arms it in the
//! jump-target set. An `ELSEIF`/`ELSE` line runs only when armed; reaching it
//! by falling out of the previous branch's body skips to the `ENDIF` instead.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::Halt;
use crate::interpreter::jumps::{find_matching_endif, find_next_branch, BranchTarget};
use crate::parser::ast::Expr;

impl Interpreter<'_> {
    pub(crate) fn execute_if(&mut self, condition: Option<&Expr>) -> Result<(), Halt> {
        let taken = self.evaluate_condition(condition);
        self.take_snapshot(self.pc)?;

        if taken {
            self.pc += 1;
            return Ok(());
        }

        match find_next_branch(self.program.lines(), self.pc) {
            BranchTarget::Branch(target) => {
                self.jump_targets.insert(target);
                self.pc = target;
            }
            BranchTarget::PastEnd(target) => self.pc = target,
        }
        Ok(())
    }

    pub(crate) fn execute_elseif(&mut self, condition: Option<&Expr>) -> Result<(), Halt> {
        if !self.jump_targets.remove(&self.pc) {
            self.skip_to_endif();
            return Ok(());
        }
        self.execute_if(condition)
    }

    pub(crate) fn execute_else(&mut self) -> Result<(), Halt> {
        if !self.jump_targets.remove(&self.pc) {
            self.skip_to_endif();
            return Ok(());
        }
        self.take_snapshot(self.pc)?;
        self.pc += 1;
        Ok(())
    }

    /// A previous branch of this chain already ran
    fn skip_to_endif(&mut self) {
        let lines = self.program.lines();
        self.pc = find_matching_endif(lines, self.pc).map_or(lines.len(), |end| end + 1);
    }
}
