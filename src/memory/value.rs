//! Runtime value representation
//!
//! This module defines the [`Value`] enum, the dynamically-typed values a
//! pseudocode program manipulates. There is no static typing: a variable may
//! hold a number on one line and a string on the next, and sequences may mix
//! element kinds.
//!
//! # Value Types
//!
//! - [`Value::Number`]: 64-bit float (integers are floats with no fraction)
//! - [`Value::Str`]: text from a `"..."` literal or a concatenation
//! - [`Value::Bool`]: `true` / `false`
//! - [`Value::Array`]: 1-D indexed sequence of values
//!
//! # Coercions
//!
//! The dialect never fails on a type mismatch. Instead every value can be
//! viewed as a boolean ([`Value::is_truthy`]), a number ([`Value::to_number`])
//! and text (the [`fmt::Display`] impl).

use std::cmp::Ordering;
use std::fmt;

/// Runtime values in the tracer
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    Array(Vec<Value>),
}

impl Default for Value {
    /// The value of an unbound identifier or a failed indexed read.
    fn default() -> Self {
        Value::Number(0.0)
    }
}

impl Value {
    /// Truthiness coercion used by `AND`, `OR`, `NOT` and by `IF`/`WHILE`
    /// guards.
    ///
    /// `false`, `0`, `NaN` and `""` are false. Everything else is true,
    /// including every sequence (even an empty one).
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Array(_) => true,
        }
    }

    /// Numeric coercion used by every arithmetic operator except string `+`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Bool(true) => 1.0,
            Value::Bool(false) => 0.0,
            Value::Str(s) => parse_numeric_text(s),
            Value::Array(items) => match items.as_slice() {
                [] => 0.0,
                [single] => single.to_number(),
                _ => f64::NAN,
            },
        }
    }

    /// Get the sequence elements, returns None if not an Array
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Check if this value is a sequence
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Short lowercase name of the value's kind, for logs and the UI.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Array(_) => "array",
        }
    }

    /// Loose equality behind `==` and `!=`.
    ///
    /// Same-kind values compare structurally. A number compared with a
    /// string or boolean compares numerically; any other mix is unequal.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            (Value::Number(_), Value::Str(_) | Value::Bool(_))
            | (Value::Str(_) | Value::Bool(_), Value::Number(_)) => {
                self.to_number() == other.to_number()
            }
            _ => false,
        }
    }

    /// Ordering behind `<`, `>`, `<=` and `>=`.
    ///
    /// Two strings compare lexicographically; anything else compares as
    /// numbers. Returns `None` when either side is `NaN`, which makes every
    /// relational operator false.
    pub fn loose_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            _ => self.to_number().partial_cmp(&other.to_number()),
        }
    }

    /// Estimate of the heap footprint, used by the snapshot memory budget.
    pub fn estimated_size(&self) -> usize {
        let inline = std::mem::size_of::<Value>();
        match self {
            Value::Str(s) => inline + s.len(),
            Value::Array(items) => inline + items.iter().map(Value::estimated_size).sum::<usize>(),
            _ => inline,
        }
    }
}

/// Decimal parse of a trimmed string; blank text is 0, anything that is not a
/// plain decimal number is NaN.
fn parse_numeric_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    // f64::from_str also accepts "inf" and "nan", which the dialect does not.
    let plain = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !plain {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Textual form of a number: integral values without a fraction.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        // Also folds -0 into "0"
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Value {
    /// The textual form used by `PRINT` and by string concatenation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match item {
                        Value::Str(s) => write!(f, "\"{}\"", s)?,
                        other => write!(f, "{}", other)?,
                    }
                }
                write!(f, "]")
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}
