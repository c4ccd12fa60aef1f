// Operator semantics, as further `impl Evaluator` blocks

pub mod access;
pub mod binary;
pub mod unary;
