use crate::interpreter::expressions::Evaluator;
use crate::memory::value::Value;
use crate::parser::ast::{BinOp, Expr};
use std::cmp::Ordering;

impl Evaluator<'_> {
    /// `AND`/`OR` short-circuit; every other operator evaluates both sides
    /// left to right.
    pub(crate) fn evaluate_binary_op(&mut self, op: BinOp, left: &Expr, right: &Expr) -> Value {
        match op {
            BinOp::And => {
                if !self.evaluate(left).is_truthy() {
                    return Value::Bool(false);
                }
                Value::Bool(self.evaluate(right).is_truthy())
            }
            BinOp::Or => {
                if self.evaluate(left).is_truthy() {
                    return Value::Bool(true);
                }
                Value::Bool(self.evaluate(right).is_truthy())
            }
            _ => {
                let left_val = self.evaluate(left);
                let right_val = self.evaluate(right);
                apply_binary(op, &left_val, &right_val)
            }
        }
    }
}

/// Apply a binary operator to two already-evaluated values.
///
/// `+` concatenates textual forms if either side is a string and adds
/// numerically otherwise. The remaining arithmetic operators always coerce
/// to numbers.
pub fn apply_binary(op: BinOp, left: &Value, right: &Value) -> Value {
    match op {
        BinOp::Add => match (left, right) {
            (Value::Str(_), _) | (_, Value::Str(_)) => Value::Str(format!("{}{}", left, right)),
            _ => Value::Number(left.to_number() + right.to_number()),
        },
        BinOp::Sub => Value::Number(left.to_number() - right.to_number()),
        BinOp::Mul => Value::Number(left.to_number() * right.to_number()),
        BinOp::Div => Value::Number(left.to_number() / right.to_number()),
        BinOp::Mod => Value::Number(left.to_number() % right.to_number()),

        BinOp::Eq => Value::Bool(left.loose_eq(right)),
        BinOp::Ne => Value::Bool(!left.loose_eq(right)),
        BinOp::Lt => compare(left, right, |o| o == Ordering::Less),
        BinOp::Le => compare(left, right, |o| o != Ordering::Greater),
        BinOp::Gt => compare(left, right, |o| o == Ordering::Greater),
        BinOp::Ge => compare(left, right, |o| o != Ordering::Less),

        BinOp::And => Value::Bool(left.is_truthy() && right.is_truthy()),
        BinOp::Or => Value::Bool(left.is_truthy() || right.is_truthy()),
    }
}

/// Relational comparison; unordered operands (NaN) are never related
fn compare<F>(left: &Value, right: &Value, accept: F) -> Value
where
    F: Fn(Ordering) -> bool,
{
    Value::Bool(left.loose_cmp(right).is_some_and(accept))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_overload() {
        let hello = Value::from("Hello ");
        assert_eq!(
            apply_binary(BinOp::Add, &hello, &Value::from("World")),
            Value::from("Hello World")
        );
        assert_eq!(
            apply_binary(BinOp::Add, &Value::Number(1.0), &Value::Number(2.0)),
            Value::Number(3.0)
        );
        let arr = Value::Array(vec![Value::Number(1.0)]);
        assert_eq!(apply_binary(BinOp::Add, &Value::from("a"), &arr), Value::from("a[1]"));
    }

    #[test]
    fn test_modulo_keeps_sign_of_dividend() {
        assert_eq!(
            apply_binary(BinOp::Mod, &Value::Number(-7.0), &Value::Number(3.0)),
            Value::Number(-1.0)
        );
    }

    #[test]
    fn test_nan_comparisons_false() {
        let nan = Value::Number(f64::NAN);
        let one = Value::Number(1.0);
        for op in [BinOp::Lt, BinOp::Le, BinOp::Gt, BinOp::Ge, BinOp::Eq] {
            assert_eq!(apply_binary(op, &nan, &one), Value::Bool(false));
        }
        assert_eq!(apply_binary(BinOp::Ne, &nan, &nan), Value::Bool(true));
    }
}
