//! Source pane rendering with keyword highlighting
//!
//! Shows the program with line numbers and marks the line that produced the
//! current snapshot. Highlighting is a character scan over each line; it does
//! not need the expression parser.

use crate::ui::panes::border_style;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn highlight_source_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '"' {
            flush_word(&mut spans, &mut current_word);
            let mut end = i + 1;
            while end < chars.len() && chars[end] != '"' {
                end += 1;
            }
            end = (end + 1).min(chars.len());
            spans.push(Span::styled(
                chars[i..end].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        if !c.is_alphanumeric() && c != '_' && !(c == '.' && !current_word.is_empty()) {
            flush_word(&mut spans, &mut current_word);

            let style = match c {
                '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word);
    Line::from(spans)
}

fn flush_word(spans: &mut Vec<Span<'static>>, word: &mut String) {
    if !word.is_empty() {
        let style = word_style(word);
        spans.push(Span::styled(std::mem::take(word), style));
    }
}

fn word_style(word: &str) -> Style {
    match word {
        "IF" | "THEN" | "ELSEIF" | "ELSE" | "ENDIF" | "WHILE" | "ENDWHILE" | "PRINT" => {
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD)
        }
        "AND" | "OR" | "NOT" => Style::default().fg(DEFAULT_THEME.keyword),
        "true" | "false" => Style::default().fg(DEFAULT_THEME.number),
        _ if word.starts_with(|c: char| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Visual row the current line is pinned to; `None` until the first render
    pub target_line_row: Option<usize>,
}

/// Render the source pane. `current_line` is 1-based; 0 means no line yet.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    source_lines: &[String],
    current_line: usize,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let total_lines = source_lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at its pinned row
    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);

        if total_lines > visible_height {
            scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
        } else {
            scroll_state.offset = 0;
        }
    }

    let visible_lines: Vec<Line> = source_lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let (marker, num_style) = if is_current {
                (
                    "▶",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            let mut content = highlight_source_line(line);
            if is_current {
                let current_bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content.spans {
                    span.style = span.style.patch(current_bg);
                }
            }

            let mut spans = vec![Span::styled(format!("{}{:3} ", marker, line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_splits_words_and_strings() {
        let line = highlight_source_line(r#"PRINT "Go!" + n"#);
        assert_eq!(texts(&line), vec!["PRINT", " ", "\"Go!\"", " ", "+", " ", "n"]);
        assert_eq!(line.spans[0].style, word_style("WHILE"));
        assert_eq!(line.spans[2].style.fg, Some(DEFAULT_THEME.string));
    }

    #[test]
    fn test_highlight_numbers_keep_decimal_point() {
        let line = highlight_source_line("x = 2.5");
        assert_eq!(texts(&line), vec!["x", " ", "=", " ", "2.5"]);
        assert_eq!(line.spans[4].style.fg, Some(DEFAULT_THEME.number));
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let line = highlight_source_line(r#"s = "abc"#);
        assert_eq!(texts(&line).last().map(String::as_str), Some("\"abc"));
    }
}
