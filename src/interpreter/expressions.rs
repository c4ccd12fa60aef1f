//! Expression evaluation
//!
//! [`Evaluator`] walks an [`Expr`] tree against a read-only
//! [`VariableStore`] and produces one [`Value`]. Evaluation is eager and
//! total: every expression yields a value, whatever the operand kinds.
//!
//! - Unbound identifiers evaluate to `0`
//! - `name[i]` on a non-sequence, or with an unusable index, evaluates to `0`
//! - Array literals and indices are fully evaluated to concrete values
//!
//! The evaluator also records every successful indexed read as an
//! [`ArrayAccess`], which the executor attaches to the line's snapshot.
//!
//! Operator semantics live in the `ops` submodules as further
//! `impl Evaluator` blocks.

use crate::memory::{store::VariableStore, value::Value};
use crate::parser::ast::Expr;
use crate::snapshot::ArrayAccess;

/// Evaluates expressions against one variable store
pub struct Evaluator<'a> {
    pub(crate) store: &'a VariableStore,
    pub(crate) accesses: Vec<ArrayAccess>,
}

impl<'a> Evaluator<'a> {
    pub fn new(store: &'a VariableStore) -> Self {
        Evaluator {
            store,
            accesses: Vec::new(),
        }
    }

    /// Evaluate an expression and return its value
    pub fn evaluate(&mut self, expr: &Expr) -> Value {
        match expr {
            Expr::Literal(value) => value.clone(),

            Expr::Variable(name) => self.store.get(name).cloned().unwrap_or_else(|| {
                tracing::trace!(name = name.as_str(), "unbound identifier reads as 0");
                Value::default()
            }),

            Expr::Index { name, index } => self.evaluate_index(name, index),

            Expr::ArrayLiteral(elements) => {
                Value::Array(elements.iter().map(|e| self.evaluate(e)).collect())
            }

            Expr::BinaryOp { op, left, right } => self.evaluate_binary_op(*op, left, right),

            Expr::UnaryOp { op, operand } => self.evaluate_unary_op(*op, operand),
        }
    }

    /// Indexed reads performed so far, in evaluation order
    pub fn into_accesses(self) -> Vec<ArrayAccess> {
        self.accesses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parser::parse_expression;
    use crate::snapshot::AccessKind;

    fn eval_with(source: &str, store: &VariableStore) -> Value {
        let expr = parse_expression(source).expect("expression should parse");
        Evaluator::new(store).evaluate(&expr)
    }

    fn eval(source: &str) -> Value {
        eval_with(source, &VariableStore::new())
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2 + 3 * 4"), Value::Number(14.0));
        assert_eq!(eval("(2 + 3) * 4"), Value::Number(20.0));
        assert_eq!(eval("NOT 1 == 1"), Value::Bool(false));
        assert_eq!(eval("-2 * -3"), Value::Number(6.0));
        assert_eq!(eval("10 - 4 - 3"), Value::Number(3.0));
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(eval(r#""Hello " + "World""#), Value::from("Hello World"));
        assert_eq!(eval("1 + 2"), Value::Number(3.0));
        assert_eq!(eval(r#""Count: " + 5"#), Value::from("Count: 5"));
        assert_eq!(eval(r#"1 + 2 + "x""#), Value::from("3x"));
        assert_eq!(eval(r#""x" + 1 + 2"#), Value::from("x12"));
        assert_eq!(eval(r#""found: " + true"#), Value::from("found: true"));
    }

    #[test]
    fn test_other_arithmetic_is_numeric() {
        assert_eq!(eval(r#""6" * 2"#), Value::Number(12.0));
        assert_eq!(eval("7 % 3"), Value::Number(1.0));
        assert_eq!(eval("7 / 2"), Value::Number(3.5));
        assert_eq!(eval("true + 1"), Value::Number(2.0));
        assert_eq!(eval("1 / 0"), Value::Number(f64::INFINITY));
        assert!(matches!(eval(r#""a" - 1"#), Value::Number(n) if n.is_nan()));
    }

    #[test]
    fn test_boolean_operators() {
        assert_eq!(eval("true AND 0"), Value::Bool(false));
        assert_eq!(eval(r#"0 OR "x""#), Value::Bool(true));
        assert_eq!(eval(r#"NOT """#), Value::Bool(true));
        assert_eq!(eval("NOT missing"), Value::Bool(true));
        assert_eq!(eval("1 < 2 AND 2 < 3 OR false"), Value::Bool(true));
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(eval("3 >= 3"), Value::Bool(true));
        assert_eq!(eval("3 != 3"), Value::Bool(false));
        assert_eq!(eval(r#""b" > "a""#), Value::Bool(true));
        assert_eq!(eval(r#"5 == "5""#), Value::Bool(true));
        assert_eq!(eval(r#""x" < 1"#), Value::Bool(false));
        assert_eq!(eval(r#""x" >= 1"#), Value::Bool(false));
    }

    #[test]
    fn test_variables_and_indexing() {
        let mut store = VariableStore::new();
        store.assign("items", Value::Array(vec![Value::Number(5.0), Value::Number(3.0)]));
        store.assign("i", Value::Number(1.0));
        store.assign("n", Value::Number(4.0));

        assert_eq!(eval_with("items[i]", &store), Value::Number(3.0));
        assert_eq!(eval_with("items[i - 1] + n", &store), Value::Number(9.0));
        assert_eq!(eval_with("items[9]", &store), Value::Number(0.0));
        assert_eq!(eval_with("n[0]", &store), Value::Number(0.0));
        assert_eq!(eval_with("missing", &store), Value::Number(0.0));
        assert_eq!(
            eval_with("[n, n * 2]", &store),
            Value::Array(vec![Value::Number(4.0), Value::Number(8.0)])
        );
    }

    #[test]
    fn test_index_reads_recorded() {
        let mut store = VariableStore::new();
        store.assign("xs", Value::Array(vec![Value::Number(7.0), Value::Number(8.0)]));

        let expr = parse_expression("xs[0] + xs[1] + xs[5]").unwrap();
        let mut evaluator = Evaluator::new(&store);
        assert_eq!(evaluator.evaluate(&expr), Value::Number(15.0));

        let accesses = evaluator.into_accesses();
        assert_eq!(accesses.len(), 2);
        assert_eq!(accesses[1].index, 1);
        assert_eq!(accesses[1].value, Value::Number(8.0));
        assert_eq!(accesses[1].kind, AccessKind::Read);
    }

    #[test]
    fn test_short_circuit_skips_reads() {
        let mut store = VariableStore::new();
        store.assign("xs", Value::Array(vec![Value::Number(1.0)]));

        let expr = parse_expression("false AND xs[0] == 1").unwrap();
        let mut evaluator = Evaluator::new(&store);
        assert_eq!(evaluator.evaluate(&expr), Value::Bool(false));
        assert!(evaluator.into_accesses().is_empty());
    }
}
