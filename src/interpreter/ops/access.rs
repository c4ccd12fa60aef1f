use crate::interpreter::expressions::Evaluator;
use crate::memory::{store::as_index, value::Value};
use crate::parser::ast::Expr;
use crate::snapshot::{AccessKind, ArrayAccess};

impl Evaluator<'_> {
    /// Evaluate `name[index]`.
    ///
    /// Falls back to the default value (`0`) when `name` is not a sequence
    /// or the index does not name an element. Successful reads are recorded.
    pub(crate) fn evaluate_index(&mut self, name: &str, index: &Expr) -> Value {
        let index_val = self.evaluate(index);

        let element = self.store.get_index(name, &index_val);
        let (Some(value), Some(position)) = (element, as_index(&index_val)) else {
            tracing::trace!(name, index = %index_val, "indexed read out of reach reads as 0");
            return Value::default();
        };

        let value = value.clone();
        self.accesses.push(ArrayAccess {
            name: name.to_string(),
            index: position,
            value: value.clone(),
            kind: AccessKind::Read,
        });
        value
    }
}
