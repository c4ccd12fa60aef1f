//! Trace table pane
//!
//! Rows appear as the cursor reaches them, so stepping forward "fills in" the
//! table the way it is filled in by hand. Cells changed on a step are
//! highlighted; unchanged cells repeat the current value dimmed.

use crate::snapshot::table::{TraceRow, TraceTable};
use crate::ui::panes::{border_style, follow_offset};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Text,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

/// Render the rows of `table` up to and including `position`
pub fn render_table_pane(
    frame: &mut Frame,
    area: Rect,
    table: &TraceTable,
    position: usize,
    is_focused: bool,
    scroll_back: &mut usize,
) {
    let block = Block::default()
        .title(" Trace Table ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let revealed = &table.rows[..(position + 1).min(table.rows.len())];

    // Header row plus borders
    let visible_height = area.height.saturating_sub(3).max(1) as usize;
    let selected = revealed.len().saturating_sub(1);
    *scroll_back = (*scroll_back).min(selected);
    let offset = follow_offset(selected - *scroll_back, revealed.len(), visible_height);

    let mut headers = vec!["Step".to_string(), "Line".to_string()];
    headers.extend(table.columns.iter().cloned());
    headers.push("Access".to_string());
    headers.push("Output".to_string());

    let texts: Vec<Vec<String>> = revealed.iter().map(row_texts).collect();
    let widths = column_widths(&headers, &texts);

    let header = Row::new(headers.into_iter().map(Cell::from)).style(
        Style::default()
            .fg(DEFAULT_THEME.header)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = revealed
        .iter()
        .zip(texts)
        .enumerate()
        .skip(offset)
        .take(visible_height)
        .map(|(idx, (row, cells))| styled_row(row, cells, idx == selected))
        .collect();

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(2);
    frame.render_widget(widget, area);
}

/// Cell texts for one row; scalar cells show the value bound at that step
fn row_texts(row: &TraceRow) -> Vec<String> {
    let mut cells = vec![
        row.step.to_string(),
        row.line.map_or_else(|| "-".to_string(), |l| (l + 1).to_string()),
    ];

    cells.extend(row.cells.iter().map(|cell| cell.value.clone().unwrap_or_default()));

    cells.push(
        row.accesses
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    );
    cells.push(row.output.join(" "));
    cells
}

fn styled_row(row: &TraceRow, cells: Vec<String>, is_current: bool) -> Row<'static> {
    let scalar_range = 2..2 + row.cells.len();

    let styled: Vec<Cell> = cells
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let style = if scalar_range.contains(&i) {
                if row.cells[i - 2].changed {
                    Style::default()
                        .fg(DEFAULT_THEME.changed)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(DEFAULT_THEME.comment)
                }
            } else if i == scalar_range.end {
                Style::default().fg(DEFAULT_THEME.primary)
            } else if i > scalar_range.end {
                Style::default().fg(DEFAULT_THEME.success)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            Cell::from(Text::from(text)).style(style)
        })
        .collect();

    let row_style = if is_current {
        Style::default().bg(DEFAULT_THEME.current_line_bg)
    } else {
        Style::default()
    };
    Row::new(styled).style(row_style)
}

fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<Constraint> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let widest = rows
                .iter()
                .filter_map(|cells| cells.get(i))
                .map(|text| text.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count());
            Constraint::Length(widest as u16)
        })
        .collect()
}
