//! Memory model for the tracer
//!
//! - [`value`]: Runtime value representation (Number, Str, Bool, Array)
//! - [`store`]: The variable store, one per execution run
//!
//! There is no address space, heap or call stack: the dialect has a single
//! flat scope, and a snapshot of the store is just a clone of it. Because
//! [`value::Value::Array`] owns its elements, cloning the store deep-copies
//! every sequence, so a recorded snapshot can never observe later writes.

pub mod store;
pub mod value;
