//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Program text with keyword highlighting and current line indicator
//! - [`table`]: Trace table revealed up to the current step
//! - [`output`]: Lines printed so far
//! - [`status`]: Status bar with keybindings and position in the trace
//!
//! Each pane module exports a primary `render_*` function that draws from
//! borrowed trace data and only mutates its own scroll state.

pub mod output;
pub mod source;
pub mod status;
pub mod table;

pub use output::render_output_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use table::render_table_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style shared by every bordered pane
pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// First row to show so that `selected` stays inside a window of `height` rows
pub(crate) fn follow_offset(selected: usize, total: usize, height: usize) -> usize {
    if total <= height {
        return 0;
    }
    selected
        .saturating_sub(height.saturating_sub(1))
        .min(total - height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_offset() {
        assert_eq!(follow_offset(3, 5, 10), 0);
        assert_eq!(follow_offset(3, 20, 10), 0);
        assert_eq!(follow_offset(12, 20, 10), 3);
        assert_eq!(follow_offset(19, 20, 10), 10);
        assert_eq!(follow_offset(0, 20, 0), 0);
    }
}
