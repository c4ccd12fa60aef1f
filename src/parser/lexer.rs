//! Lexer (tokenizer) for pseudocode expressions
//!
//! Converts the expression part of one source line into a flat [`Token`]
//! stream consumed by the expression parser. Statement keywords (`IF`,
//! `WHILE`, `PRINT`, ...) never reach the lexer; line classification strips
//! them first.
//!
//! Lexing is lenient: a character that starts no token is skipped, an
//! unterminated string runs to the end of the input, and there are no escape
//! sequences. Tokens carry no position; the executor tracks which line is
//! running.

use std::fmt;

/// Reserved words inside expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    And,
    Or,
    Not,
    True,
    False,
}

/// All token variants produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Number(f64),
    StringLiteral(String),

    Ident(String),
    Keyword(Keyword),

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    Eq, // =

    // Brackets
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    Comma,    // ,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", n),
            Token::StringLiteral(s) => write!(f, "string literal \"{}\"", s),
            Token::Ident(s) => write!(f, "identifier '{}'", s),
            Token::Keyword(Keyword::And) => write!(f, "'AND'"),
            Token::Keyword(Keyword::Or) => write!(f, "'OR'"),
            Token::Keyword(Keyword::Not) => write!(f, "'NOT'"),
            Token::Keyword(Keyword::True) => write!(f, "'true'"),
            Token::Keyword(Keyword::False) => write!(f, "'false'"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::Percent => write!(f, "'%'"),
            Token::EqEq => write!(f, "'=='"),
            Token::NotEq => write!(f, "'!='"),
            Token::Lt => write!(f, "'<'"),
            Token::Le => write!(f, "'<='"),
            Token::Gt => write!(f, "'>'"),
            Token::Ge => write!(f, "'>='"),
            Token::Eq => write!(f, "'='"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::Comma => write!(f, "','"),
        }
    }
}

/// Lexer for one expression
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given expression text.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                break;
            }

            if let Some(token) = self.next_token() {
                tokens.push(token);
            }
        }

        tokens
    }

    /// Get next token, or `None` if the character starts no token
    fn next_token(&mut self) -> Option<Token> {
        let ch = self.advance()?;

        let token = match ch {
            '"' => self.string_literal(),

            '0'..='9' => self.number_literal(ch),

            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch),

            // Two-character operators win over their one-character prefixes
            '=' => self.with_eq(Token::EqEq, Token::Eq),
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::NotEq
                } else {
                    tracing::trace!("skipping lone '!'");
                    return None;
                }
            }
            '<' => self.with_eq(Token::Le, Token::Lt),
            '>' => self.with_eq(Token::Ge, Token::Gt),

            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            ',' => Token::Comma,

            _ => {
                tracing::trace!(character = %ch, "skipping unrecognized character");
                return None;
            }
        };

        Some(token)
    }

    /// Pick `double` if the next character is `=`, consuming it.
    fn with_eq(&mut self, double: Token, single: Token) -> Token {
        if self.peek() == Some('=') {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Parse string literal; the opening quote is already consumed
    fn string_literal(&mut self) -> Token {
        let mut string = String::new();

        while let Some(ch) = self.advance() {
            if ch == '"' {
                return Token::StringLiteral(string);
            }
            string.push(ch);
        }

        // Unterminated: keep what we have
        Token::StringLiteral(string)
    }

    /// Parse numeric literal: digits with at most one decimal point
    fn number_literal(&mut self, first_digit: char) -> Token {
        let mut num_str = String::new();
        num_str.push(first_digit);
        let mut seen_dot = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else if ch == '.' && !seen_dot {
                seen_dot = true;
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // "3." parses fine as f64; digits-only text cannot fail
        Token::Number(num_str.parse::<f64>().unwrap_or(0.0))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "AND" => Token::Keyword(Keyword::And),
            "OR" => Token::Keyword(Keyword::Or),
            "NOT" => Token::Keyword(Keyword::Not),
            "true" => Token::Keyword(Keyword::True),
            "false" => Token::Keyword(Keyword::False),
            _ => Token::Ident(ident),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

/// Tokenize one expression's source text.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}
