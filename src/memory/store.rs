//! Variable store
//!
//! The name → [`Value`] binding context owned by one execution run.
//!
//! # Assignment Semantics
//!
//! - Plain assignment (`x = ...`) replaces the binding wholesale; the kind of
//!   value may change from one assignment to the next.
//! - Indexed assignment (`xs[i] = ...`) mutates the existing sequence in
//!   place. If `xs` is not currently a sequence, or the index is unusable,
//!   the write is silently dropped.
//!
//! Names are remembered in first-assignment order so that views can lay out
//! columns in the order a reader meets them in the program.

use super::value::Value;
use rustc_hash::FxHashMap;

/// Name → value bindings for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableStore {
    vars: FxHashMap<String, Value>,
    insertion_order: Vec<String>, // Order of first assignment
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a binding
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Rebind `name`, replacing any previous value and kind.
    pub fn assign(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.vars.get_mut(name) {
            *slot = value;
            return;
        }
        self.insertion_order.push(name.to_string());
        self.vars.insert(name.to_string(), value);
    }

    /// Write `value` into the sequence bound to `name` at `index`.
    ///
    /// An in-bounds index replaces the element and an index equal to the
    /// length appends. Returns `false` (and changes nothing) when `name` is
    /// unbound or not a sequence, or the index is out of reach.
    pub fn assign_index(&mut self, name: &str, index: &Value, value: Value) -> bool {
        let Some(Value::Array(items)) = self.vars.get_mut(name) else {
            return false;
        };
        let Some(i) = as_index(index) else {
            return false;
        };

        if i < items.len() {
            items[i] = value;
            true
        } else if i == items.len() {
            items.push(value);
            true
        } else {
            false
        }
    }

    /// Read the element of the sequence bound to `name` at `index`.
    ///
    /// Returns `None` when the variable is not a sequence or the index is not
    /// a valid position; callers substitute the dialect's default value.
    pub fn get_index(&self, name: &str, index: &Value) -> Option<&Value> {
        let items = self.vars.get(name)?.as_array()?;
        items.get(as_index(index)?)
    }

    /// Names in first-assignment order
    pub fn names(&self) -> &[String] {
        &self.insertion_order
    }

    /// Bindings in first-assignment order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.insertion_order
            .iter()
            .filter_map(|name| self.vars.get(name).map(|v| (name.as_str(), v)))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Estimate of the heap footprint, used by the snapshot memory budget.
    pub fn estimated_size(&self) -> usize {
        self.vars
            .iter()
            .map(|(name, value)| name.len() * 2 + value.estimated_size())
            .sum()
    }
}

/// Convert an index value to a position: non-negative, integral, finite.
pub fn as_index(index: &Value) -> Option<usize> {
    let n = index.to_number();
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 {
        Some(n as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(ns: &[f64]) -> Value {
        Value::Array(ns.iter().map(|n| Value::Number(*n)).collect())
    }

    #[test]
    fn test_rebinding_changes_kind() {
        let mut store = VariableStore::new();
        store.assign("x", Value::Number(1.0));
        store.assign("x", Value::from("one"));
        assert_eq!(store.get("x"), Some(&Value::from("one")));
        assert_eq!(store.names(), ["x".to_string()]);
    }

    #[test]
    fn test_insertion_order() {
        let mut store = VariableStore::new();
        store.assign("b", Value::Number(1.0));
        store.assign("a", Value::Number(2.0));
        store.assign("b", Value::Number(3.0));
        let names: Vec<&str> = store.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn test_indexed_write_in_place() {
        let mut store = VariableStore::new();
        store.assign("xs", numbers(&[1.0, 2.0, 3.0]));
        assert!(store.assign_index("xs", &Value::Number(1.0), Value::Number(9.0)));
        assert!(store.assign_index("xs", &Value::Number(3.0), Value::Number(4.0)));
        assert_eq!(store.get("xs"), Some(&numbers(&[1.0, 9.0, 3.0, 4.0])));
    }

    #[test]
    fn test_indexed_write_lenient() {
        let mut store = VariableStore::new();
        store.assign("n", Value::Number(5.0));
        store.assign("xs", numbers(&[1.0]));
        assert!(!store.assign_index("n", &Value::Number(0.0), Value::Number(1.0)));
        assert!(!store.assign_index("missing", &Value::Number(0.0), Value::Number(1.0)));
        assert!(!store.assign_index("xs", &Value::Number(5.0), Value::Number(1.0)));
        assert!(!store.assign_index("xs", &Value::Number(-1.0), Value::Number(1.0)));
        assert!(!store.assign_index("xs", &Value::Number(0.5), Value::Number(1.0)));
        assert_eq!(store.get("n"), Some(&Value::Number(5.0)));
        assert_eq!(store.get("xs"), Some(&numbers(&[1.0])));
    }

    #[test]
    fn test_indexed_read() {
        let mut store = VariableStore::new();
        store.assign("xs", numbers(&[4.0, 5.0]));
        assert_eq!(store.get_index("xs", &Value::Number(1.0)), Some(&Value::Number(5.0)));
        assert_eq!(store.get_index("xs", &Value::from("0")), Some(&Value::Number(4.0)));
        assert_eq!(store.get_index("xs", &Value::Number(2.0)), None);
        assert_eq!(store.get_index("nope", &Value::Number(0.0)), None);
    }
}
