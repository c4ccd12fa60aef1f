//! Structural line matching.
//!
//! Every scan walks the flat line list from a starting line and tracks
//! nesting depth, so that an inner `IF`/`WHILE` block is never mistaken for
//! the partner of an outer one. The scans only look at lines of their own
//! block kind; `IF` chains and `WHILE` loops nest freely inside each other.

use crate::parser::ast::Line;

/// Where a false `IF`/`ELSEIF` condition sends execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchTarget {
    /// The next `ELSEIF`/`ELSE` of the same chain
    Branch(usize),
    /// One past the chain's `ENDIF`, or the end of the program when unmatched
    PastEnd(usize),
}

/// Find the next sibling branch after the `IF`/`ELSEIF` at `from`.
pub fn find_next_branch(lines: &[Line], from: usize) -> BranchTarget {
    let mut depth = 0usize;

    for (i, line) in lines.iter().enumerate().skip(from + 1) {
        match line {
            Line::If(_) => depth += 1,
            Line::EndIf if depth == 0 => return BranchTarget::PastEnd(i + 1),
            Line::EndIf => depth -= 1,
            Line::ElseIf(_) | Line::Else if depth == 0 => return BranchTarget::Branch(i),
            _ => {}
        }
    }

    BranchTarget::PastEnd(lines.len())
}

/// Find the `ENDIF` closing the chain that contains the line at `from`.
pub fn find_matching_endif(lines: &[Line], from: usize) -> Option<usize> {
    let mut depth = 0usize;

    for (i, line) in lines.iter().enumerate().skip(from + 1) {
        match line {
            Line::If(_) => depth += 1,
            Line::EndIf if depth == 0 => return Some(i),
            Line::EndIf => depth -= 1,
            _ => {}
        }
    }

    None
}

/// Find the `ENDWHILE` closing the `WHILE` at `from`.
pub fn find_matching_endwhile(lines: &[Line], from: usize) -> Option<usize> {
    let mut depth = 0usize;

    for (i, line) in lines.iter().enumerate().skip(from + 1) {
        match line {
            Line::While(_) => depth += 1,
            Line::EndWhile if depth == 0 => return Some(i),
            Line::EndWhile => depth -= 1,
            _ => {}
        }
    }

    None
}

/// Find the `WHILE` opened by the `ENDWHILE` at `from`, scanning backward.
pub fn find_matching_while(lines: &[Line], from: usize) -> Option<usize> {
    let mut depth = 0usize;

    for i in (0..from.min(lines.len())).rev() {
        match &lines[i] {
            Line::EndWhile => depth += 1,
            Line::While(_) if depth == 0 => return Some(i),
            Line::While(_) => depth -= 1,
            _ => {}
        }
    }

    None
}
