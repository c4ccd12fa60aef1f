// AST definitions for the pseudocode tracer

use crate::memory::value::Value;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
    Not, // NOT x
}

/// Expression tree for one line's expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Variable(String),
    Index {
        name: String,
        index: Box<Expr>,
    },
    ArrayLiteral(Vec<Expr>),
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<Expr>,
    },
}

/// Left-hand side of an assignment
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    Name(String),
    Index { name: String, index: Expr },
}

impl AssignTarget {
    pub fn name(&self) -> &str {
        match self {
            AssignTarget::Name(name) | AssignTarget::Index { name, .. } => name,
        }
    }
}

/// One classified source line.
///
/// Conditions are `None` when the guard text failed to parse; such a guard
/// evaluates as undefined (falsy) but the line keeps its structural role so
/// that block matching is unaffected.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Blank,
    While(Option<Expr>),
    EndWhile,
    If(Option<Expr>),
    ElseIf(Option<Expr>),
    Else,
    EndIf,
    Print(Expr),
    Assign { target: AssignTarget, value: Expr },
    /// Anything else; skipped at run time
    Unrecognized,
}

/// An ordered, immutable program: the raw source lines and their
/// classification, index for index.
#[derive(Debug, Clone, Default)]
pub struct Program {
    source: Vec<String>,
    lines: Vec<Line>,
}

impl Program {
    pub(crate) fn from_parts(source: Vec<String>, lines: Vec<Line>) -> Self {
        debug_assert_eq!(source.len(), lines.len());
        Program { source, lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Classified line at `index`
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Raw source text of line `index`
    pub fn source_line(&self, index: usize) -> Option<&str> {
        self.source.get(index).map(String::as_str)
    }

    pub fn source_lines(&self) -> &[String] {
        &self.source
    }
}
