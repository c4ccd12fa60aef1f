//! Line classification
//!
//! A program is a list of source lines, each holding at most one statement:
//!
//! ```text
//! line ::= ""                     (blank)
//!        | "WHILE" expr | "ENDWHILE"
//!        | "IF" expr ["THEN"] | "ELSEIF" expr ["THEN"] | "ELSE" | "ENDIF"
//!        | "PRINT" expr
//!        | ident "=" expr | ident "[" expr "]" "=" expr
//! ```
//!
//! Statement keywords are upper-case and must be followed by whitespace (so
//! `IFFY = 1` is an assignment). An assignment is recognized by a single `=`
//! that is not part of `==`, `!=`, `<=` or `>=` and sits outside any string
//! or bracket.
//!
//! Classification never fails. A line that fits no shape becomes
//! [`Line::Unrecognized`] and is skipped when the program runs.

use crate::parser::ast::{AssignTarget, Expr, Line, Program};
use crate::parser::parser::parse_expression;

impl Program {
    /// Split `source` into lines and classify each one.
    pub fn parse(source: &str) -> Program {
        Program::from_lines(source.lines())
    }

    /// Classify an already-split list of lines.
    pub fn from_lines<I, S>(lines: I) -> Program
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let source: Vec<String> = lines.into_iter().map(|l| l.as_ref().to_string()).collect();
        let classified = source.iter().map(|l| classify_line(l)).collect();
        Program::from_parts(source, classified)
    }
}

/// Classify one source line.
pub fn classify_line(text: &str) -> Line {
    let trimmed = text.trim();

    match trimmed {
        "" => return Line::Blank,
        "ENDIF" => return Line::EndIf,
        "ENDWHILE" => return Line::EndWhile,
        "ELSE" => return Line::Else,
        _ => {}
    }

    if let Some(rest) = keyword_rest(trimmed, "ELSEIF") {
        return Line::ElseIf(condition(strip_then(rest)));
    }
    if let Some(rest) = keyword_rest(trimmed, "IF") {
        return Line::If(condition(strip_then(rest)));
    }
    if let Some(rest) = keyword_rest(trimmed, "WHILE") {
        return Line::While(condition(rest));
    }
    if let Some(rest) = keyword_rest(trimmed, "PRINT") {
        return match parse_expression(rest) {
            Ok(expr) => Line::Print(expr),
            Err(e) => {
                tracing::debug!(line = trimmed, error = %e, "unparseable PRINT skipped");
                Line::Unrecognized
            }
        };
    }

    classify_assignment(trimmed).unwrap_or_else(|| {
        tracing::debug!(line = trimmed, "unrecognized line");
        Line::Unrecognized
    })
}

/// Text after `keyword` if the line starts with it as a whole word.
fn keyword_rest<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// Drop a trailing `THEN` word, if any.
fn strip_then(text: &str) -> &str {
    let Some(head) = text.strip_suffix("THEN") else {
        return text;
    };
    if head.is_empty() || head.ends_with(char::is_whitespace) || head.ends_with(')') {
        head.trim_end()
    } else {
        text
    }
}

fn condition(text: &str) -> Option<Expr> {
    match parse_expression(text) {
        Ok(expr) => Some(expr),
        Err(e) => {
            tracing::debug!(
                condition = text,
                error = %e,
                "unparseable condition treated as undefined"
            );
            None
        }
    }
}

fn classify_assignment(line: &str) -> Option<Line> {
    let eq = find_assignment_eq(line)?;
    let target = parse_target(line[..eq].trim())?;

    match parse_expression(&line[eq + 1..]) {
        Ok(value) => Some(Line::Assign { target, value }),
        Err(e) => {
            tracing::debug!(line, error = %e, "unparseable assignment skipped");
            None
        }
    }
}

/// Byte offset of the assignment `=`: not part of a two-character
/// comparison, outside strings and brackets.
pub fn find_assignment_eq(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut depth: usize = 0;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'"' => in_string = !in_string,
            _ if in_string => {}
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            b'=' if depth == 0 => {
                let prev = i.checked_sub(1).map(|p| bytes[p]);
                let next = bytes.get(i + 1).copied();
                let in_comparison =
                    matches!(prev, Some(b'=' | b'!' | b'<' | b'>')) || next == Some(b'=');
                if !in_comparison {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

/// `name` or `name[expr]`
fn parse_target(lhs: &str) -> Option<AssignTarget> {
    let Some(open) = lhs.find('[') else {
        return is_identifier(lhs).then(|| AssignTarget::Name(lhs.to_string()));
    };

    let name = lhs[..open].trim();
    let inner = lhs[open..].strip_prefix('[')?.strip_suffix(']')?;
    if !is_identifier(name) {
        return None;
    }

    let index = parse_expression(inner).ok()?;
    Some(AssignTarget::Index {
        name: name.to_string(),
        index,
    })
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    starts_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !matches!(text, "AND" | "OR" | "NOT" | "true" | "false")
}
