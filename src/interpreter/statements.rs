use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::Halt;
use crate::memory::store::as_index;
use crate::parser::ast::{AssignTarget, Expr};
use crate::snapshot::{AccessKind, ArrayAccess};

impl Interpreter<'_> {
    pub(crate) fn execute_print(&mut self, expr: &Expr) -> Result<(), Halt> {
        let value = self.evaluate(expr);
        self.output.print(value.to_string(), self.pc);
        self.take_snapshot(self.pc)?;
        self.pc += 1;
        Ok(())
    }

    pub(crate) fn execute_assignment(
        &mut self,
        target: &AssignTarget,
        value: &Expr,
    ) -> Result<(), Halt> {
        match target {
            AssignTarget::Name(name) => {
                let value = self.evaluate(value);
                self.store.assign(name, value);
            }
            AssignTarget::Index { name, index } => {
                let index_val = self.evaluate(index);
                let value = self.evaluate(value);

                let position = as_index(&index_val);
                if !self.store.assign_index(name, &index_val, value.clone()) {
                    tracing::debug!(
                        line = self.pc,
                        name = name.as_str(),
                        index = %index_val,
                        target = self.store.get(name).map_or("unbound", |v| v.kind()),
                        "indexed write ignored"
                    );
                } else if let Some(position) = position {
                    self.pending_accesses.push(ArrayAccess {
                        name: name.clone(),
                        index: position,
                        value,
                        kind: AccessKind::Write,
                    });
                }
            }
        }

        self.take_snapshot(self.pc)?;
        self.pc += 1;
        Ok(())
    }
}
