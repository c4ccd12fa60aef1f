//! Program output pane

use crate::snapshot::OutputLog;
use crate::ui::panes::border_style;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the output printed so far, each line prefixed with the number of
/// the `PRINT` that produced it. Lines printed by the current step (those
/// past `printed_before`) are highlighted.
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    output: &OutputLog,
    printed_before: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Output ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if output.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let total_items = output.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = output
        .lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(i, line)| {
            let style = if i >= printed_before {
                Style::default()
                    .fg(DEFAULT_THEME.success)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            let origin = Span::styled(
                format!("{:>3} ", line.line + 1),
                Style::default().fg(DEFAULT_THEME.comment),
            );
            ListItem::new(Line::from(vec![origin, Span::styled(line.text.as_str(), style)]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
