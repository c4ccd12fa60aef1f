//! Expression parsing
//!
//! Recursive descent with one function per precedence tier, lowest first:
//!
//! ```text
//! or          ::= and ( "OR" and )*
//! and         ::= not ( "AND" not )*
//! not         ::= "NOT" not | comparison
//! comparison  ::= additive ( ("==" | "!=" | ">" | "<" | ">=" | "<=") additive )*
//! additive    ::= multiplicative ( ("+" | "-") multiplicative )*
//! multiplicative ::= unary ( ("*" | "/" | "%") unary )*
//! unary       ::= "-" unary | atom
//! atom        ::= number | string | "true" | "false"
//!               | "(" or ")" | "[" ( or ( "," or )* )? "]"
//!               | ident ( "[" or "]" )?
//! ```
//!
//! Because `NOT` sits below comparison, `NOT 1 == 1` parses as
//! `NOT (1 == 1)`.
//!
//! The parser is forgiving about closing brackets: a missing `)` or `]` at
//! the end of the input is accepted. Tokens left over after a complete
//! expression are ignored.
//!
//! Nesting is bounded by [`MAX_EXPR_DEPTH`]. Every bracket, prefix operator
//! and chained binary operator counts as one level, so the depth of the
//! resulting tree never exceeds the bound and evaluating it cannot exhaust
//! the stack.

use crate::memory::value::Value;
use crate::parser::ast::*;
use crate::parser::lexer::{tokenize, Keyword, Token};
use std::fmt;

/// Deepest expression nesting accepted on one line
pub const MAX_EXPR_DEPTH: usize = 64;

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    /// Index of the offending token in the expression's token stream
    pub position: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at token {}: {}",
            self.position, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser for one expression
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self::from_tokens(tokenize(source))
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse a complete expression (top-level entry point)
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_or()?;

        if !self.is_at_end() {
            tracing::debug!(
                remaining = self.tokens.len() - self.position,
                "ignoring tokens after complete expression"
            );
        }

        Ok(expr)
    }

    /// Parse logical OR
    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_and()?;

        while self.match_token(&Token::Keyword(Keyword::Or)) {
            self.descend()?;
            let right = self.parse_and()?;
            left = binary(BinOp::Or, left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    /// Parse logical AND
    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_not()?;

        while self.match_token(&Token::Keyword(Keyword::And)) {
            self.descend()?;
            let right = self.parse_not()?;
            left = binary(BinOp::And, left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    /// Parse prefix NOT
    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.match_token(&Token::Keyword(Keyword::Not)) {
            self.descend()?;
            let operand = self.parse_not()?;
            self.depth -= 1;
            return Ok(Expr::UnaryOp {
                op: UnOp::Not,
                operand: Box::new(operand),
            });
        }

        self.parse_comparison()
    }

    /// Parse comparison (== != > < >= <=)
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.peek() {
                Some(Token::EqEq) => BinOp::Eq,
                Some(Token::NotEq) => BinOp::Ne,
                Some(Token::Gt) => BinOp::Gt,
                Some(Token::Lt) => BinOp::Lt,
                Some(Token::Ge) => BinOp::Ge,
                Some(Token::Le) => BinOp::Le,
                _ => break,
            };
            self.advance();
            self.descend()?;

            let right = self.parse_additive()?;
            left = binary(op, left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            self.advance();
            self.descend()?;

            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                Some(Token::Percent) => BinOp::Mod,
                _ => break,
            };
            self.advance();
            self.descend()?;

            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    /// Parse unary minus
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.match_token(&Token::Minus) {
            self.descend()?;
            let operand = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expr::UnaryOp {
                op: UnOp::Neg,
                operand: Box::new(operand),
            });
        }

        self.parse_atom()
    }

    /// Parse atom: literal, parenthesized expression, array literal, variable
    /// or indexed access
    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let position = self.position;
        let Some(token) = self.advance() else {
            return Err(ParseError {
                message: "Unexpected end of expression".to_string(),
                position,
            });
        };

        match token {
            Token::Number(n) => Ok(Expr::Literal(Value::Number(n))),
            Token::StringLiteral(s) => Ok(Expr::Literal(Value::Str(s))),
            Token::Keyword(Keyword::True) => Ok(Expr::Literal(Value::Bool(true))),
            Token::Keyword(Keyword::False) => Ok(Expr::Literal(Value::Bool(false))),

            Token::LParen => {
                self.descend()?;
                let inner = self.parse_or()?;
                self.close(&Token::RParen, "Expected ')' after expression")?;
                self.depth -= 1;
                Ok(inner)
            }

            Token::LBracket => {
                let mut elements = Vec::new();
                if self.match_token(&Token::RBracket) {
                    return Ok(Expr::ArrayLiteral(elements));
                }

                self.descend()?;
                loop {
                    elements.push(self.parse_or()?);
                    if !self.match_token(&Token::Comma) {
                        break;
                    }
                }

                self.close(&Token::RBracket, "Expected ']' after array elements")?;
                self.depth -= 1;
                Ok(Expr::ArrayLiteral(elements))
            }

            Token::Ident(name) => {
                if self.match_token(&Token::LBracket) {
                    self.descend()?;
                    let index = self.parse_or()?;
                    self.close(&Token::RBracket, "Expected ']' after index")?;
                    self.depth -= 1;
                    return Ok(Expr::Index {
                        name,
                        index: Box::new(index),
                    });
                }
                Ok(Expr::Variable(name))
            }

            other => Err(ParseError {
                message: format!("Unexpected {}", other),
                position,
            }),
        }
    }

    /// Enter one more level of nesting, failing past [`MAX_EXPR_DEPTH`]
    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_EXPR_DEPTH {
            return Err(ParseError {
                message: format!("Expression nested deeper than {} levels", MAX_EXPR_DEPTH),
                position: self.position,
            });
        }
        Ok(())
    }

    /// Consume a closing bracket. A missing one is tolerated at end of
    /// input; anything else in its place is an error.
    fn close(&mut self, expected: &Token, message: &str) -> Result<(), ParseError> {
        if self.match_token(expected) || self.is_at_end() {
            return Ok(());
        }

        Err(ParseError {
            message: message.to_string(),
            position: self.position,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        Some(token)
    }

    fn match_token(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }
}

fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    Expr::BinaryOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// Tokenize and parse one expression.
pub fn parse_expression(source: &str) -> Result<Expr, ParseError> {
    Parser::new(source).parse_expression()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn num(n: f64) -> Expr {
        Expr::Literal(Value::Number(n))
    }

    fn var(name: &str) -> Expr {
        Expr::Variable(name.to_string())
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let expr = parse_expression("2 + 3 * 4").unwrap();
        assert_eq!(
            expr,
            binary(BinOp::Add, num(2.0), binary(BinOp::Mul, num(3.0), num(4.0)))
        );
    }

    #[test]
    fn test_parentheses_override() {
        let expr = parse_expression("(2 + 3) * 4").unwrap();
        assert_eq!(
            expr,
            binary(BinOp::Mul, binary(BinOp::Add, num(2.0), num(3.0)), num(4.0))
        );
    }

    #[test]
    fn test_not_below_comparison() {
        let expr = parse_expression("NOT 1 == 1").unwrap();
        assert_eq!(
            expr,
            Expr::UnaryOp {
                op: UnOp::Not,
                operand: Box::new(binary(BinOp::Eq, num(1.0), num(1.0))),
            }
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let expr = parse_expression("a OR b AND c").unwrap();
        assert_eq!(
            expr,
            binary(BinOp::Or, var("a"), binary(BinOp::And, var("b"), var("c")))
        );
    }

    #[test]
    fn test_left_associative_subtraction() {
        let expr = parse_expression("10 - 4 - 3").unwrap();
        assert_eq!(
            expr,
            binary(BinOp::Sub, binary(BinOp::Sub, num(10.0), num(4.0)), num(3.0))
        );
    }

    #[test]
    fn test_unary_minus_binds_tighter_than_multiplication() {
        let expr = parse_expression("-2 * 3").unwrap();
        let neg = Expr::UnaryOp {
            op: UnOp::Neg,
            operand: Box::new(num(2.0)),
        };
        assert_eq!(expr, binary(BinOp::Mul, neg, num(3.0)));
    }

    #[test]
    fn test_index_and_array_literal() {
        let expr = parse_expression("[1, items[i + 1]]").unwrap();
        assert_eq!(
            expr,
            Expr::ArrayLiteral(vec![
                num(1.0),
                Expr::Index {
                    name: "items".to_string(),
                    index: Box::new(binary(BinOp::Add, var("i"), num(1.0))),
                },
            ])
        );
        assert_eq!(parse_expression("[]").unwrap(), Expr::ArrayLiteral(Vec::new()));
    }

    #[test]
    fn test_missing_close_at_end_tolerated() {
        assert_eq!(
            parse_expression("(1 + 2").unwrap(),
            binary(BinOp::Add, num(1.0), num(2.0))
        );
    }

    #[test]
    fn test_errors() {
        assert!(parse_expression("").is_err());
        assert!(parse_expression("1 +").is_err());
        assert!(parse_expression(")").is_err());
        assert!(parse_expression("(1 2").is_err());
    }

    #[test]
    fn test_deep_parentheses_rejected() {
        let source = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        let err = parse_expression(&source).unwrap_err();
        assert!(err.message.contains("nested deeper"));

        let shallow = format!("{}1{}", "(".repeat(30), ")".repeat(30));
        assert_eq!(parse_expression(&shallow).unwrap(), num(1.0));
    }

    #[test]
    fn test_long_operator_chains_rejected() {
        let sum = vec!["1"; 10_000].join(" + ");
        assert!(parse_expression(&sum).is_err());

        let negations = format!("{}x", "NOT ".repeat(10_000));
        assert!(parse_expression(&negations).is_err());

        let minus = format!("{}1", "-".repeat(10_000));
        assert!(parse_expression(&minus).is_err());
    }

    #[test]
    fn test_depth_limit_boundary() {
        let at_limit = format!(
            "{}1{}",
            "(".repeat(MAX_EXPR_DEPTH),
            ")".repeat(MAX_EXPR_DEPTH)
        );
        assert!(parse_expression(&at_limit).is_ok());

        let past_limit = format!(
            "{}1{}",
            "(".repeat(MAX_EXPR_DEPTH + 1),
            ")".repeat(MAX_EXPR_DEPTH + 1)
        );
        assert!(parse_expression(&past_limit).is_err());

        // Siblings do not nest
        let wide = format!("[{}]", vec!["1"; 500].join(", "));
        assert!(parse_expression(&wide).is_ok());
    }
}
