use crate::interpreter::expressions::Evaluator;
use crate::memory::value::Value;
use crate::parser::ast::{Expr, UnOp};

impl Evaluator<'_> {
    pub(crate) fn evaluate_unary_op(&mut self, op: UnOp, operand: &Expr) -> Value {
        let value = self.evaluate(operand);

        match op {
            UnOp::Neg => Value::Number(-value.to_number()),
            UnOp::Not => Value::Bool(!value.is_truthy()),
        }
    }
}
