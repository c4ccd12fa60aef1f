//! Pseudocode parser
//!
//! This module turns program text into a classified [`ast::Program`]:
//! - [`lexer`]: Tokenization of one expression (text → tokens)
//! - [`parser`]: Expression parsing (tokens → [`ast::Expr`])
//! - [`statements`]: Line classification (source line → [`ast::Line`])
//! - [`ast`]: Expression tree and line definitions
//!
//! # Supported Dialect
//!
//! - Statements: `WHILE`/`ENDWHILE`, `IF ... THEN`/`ELSEIF ... THEN`/`ELSE`/`ENDIF`,
//!   `PRINT`, assignment to a name or to `name[index]`
//! - Expressions: numbers, `"strings"`, `true`/`false`, `+ - * / %`,
//!   comparisons, `AND`/`OR`/`NOT`, parentheses, `[...]` array literals,
//!   `name[index]`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one function per precedence
//! tier. Every expression is parsed once, when the program is loaded.
//! Block structure (which `ENDIF` closes which `IF`) is not resolved here;
//! the executor finds matching lines by scanning at run time.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod statements;
