//! Viewer state and keyboard handling

use crate::snapshot::{CursorError, TraceCursor, TraceTable};
use crate::ui::panes::{self, SourceScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Table,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> table -> output)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Table,
            FocusedPane::Table => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// Position within the recorded trace
    pub cursor: TraceCursor,

    /// Table projection of the whole trace, revealed row by row
    pub table: TraceTable,

    /// Program text, one entry per source line
    pub source_lines: Vec<String>,

    /// Source pane title (file or preset name)
    pub title: String,

    pub focused_pane: FocusedPane,

    pub source_scroll: SourceScrollState,
    /// Rows scrolled back from the current table row
    pub table_scroll: usize,
    pub output_scroll: usize,

    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(cursor: TraceCursor, source_lines: Vec<String>, title: String) -> Self {
        let table = TraceTable::from_trace(cursor.trace());
        App {
            cursor,
            table,
            source_lines,
            title,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            table_scroll: 0,
            output_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the viewer until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        // Left: source | output. Right: trace table
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_chunks[0]);

        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        let current_line = self.current_line();
        panes::render_source_pane(
            frame,
            left_rows[0],
            &self.title,
            &self.source_lines,
            current_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        let printed_before = self.cursor.previous().map_or(0, |s| s.output.len());
        if let Some(snapshot) = self.cursor.current() {
            panes::render_output_pane(
                frame,
                left_rows[1],
                &snapshot.output,
                printed_before,
                self.focused_pane == FocusedPane::Output,
                &mut self.output_scroll,
            );
        }

        panes::render_table_pane(
            frame,
            columns[1],
            &self.table,
            self.cursor.position(),
            self.focused_pane == FocusedPane::Table,
            &mut self.table_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.cursor.position(),
            self.cursor.trace().len(),
            self.cursor.trace().termination(),
        );
    }

    /// 1-based line that produced the current snapshot, 0 before the first line
    pub fn current_line(&self) -> usize {
        self.cursor
            .current()
            .and_then(|s| s.line)
            .map_or(0, |line| line + 1)
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                let n = c as usize - '0' as usize;
                let stepped = self.cursor.step_forward_by(n);
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.after_move();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                let result = self.cursor.step_backward();
                self.report(result, "Stepped backward");
            }
            KeyCode::Right => {
                let result = self.cursor.step_forward();
                self.report(result, "Stepped forward");
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Table => {
                    self.table_scroll = self.table_scroll.saturating_add(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Table => {
                    self.table_scroll = self.table_scroll.saturating_sub(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
            },
            KeyCode::Enter => {
                self.cursor.jump_to_end();
                self.status_message = self.cursor.trace().termination().to_string();
                self.after_move();
            }
            KeyCode::Backspace => {
                self.cursor.rewind_to_start();
                self.status_message = "Jumped to start".to_string();
                self.after_move();
            }
            _ => {}
        }
    }

    fn report(&mut self, result: Result<(), CursorError>, done: &str) {
        match result {
            Ok(()) => {
                self.status_message = done.to_string();
                self.after_move();
            }
            Err(CursorError::AtEnd) => {
                self.status_message = self.cursor.trace().termination().to_string();
            }
            Err(e) => {
                self.status_message = e.to_string();
            }
        }
    }

    /// Follow the newest table row and output line
    fn after_move(&mut self) {
        self.table_scroll = 0;
        self.output_scroll = usize::MAX;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::trace_source;
    use crossterm::event::KeyModifiers;

    fn app(source: &str) -> App {
        let lines = source.lines().map(str::to_string).collect();
        App::new(TraceCursor::new(trace_source(source)), lines, "test".to_string())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = app("x = 1\ny = 2\nz = 3");
        assert_eq!(app.current_line(), 0);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.cursor.position(), 1);
        assert_eq!(app.current_line(), 1);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.cursor.position(), 3);
        assert_eq!(app.status_message, "Program completed");

        press(&mut app, KeyCode::Right);
        assert_eq!(app.cursor.position(), 3);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.cursor.position(), 2);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.cursor.position(), 0);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.status_message, CursorError::AtStart.to_string());
    }

    #[test]
    fn test_digit_steps() {
        let mut app = app("x = 1\ny = 2");
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.cursor.position(), 2);
        assert_eq!(app.status_message, "Stepped forward 2 step(s)");
    }

    #[test]
    fn test_quit_and_focus() {
        let mut app = app("x = 1");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Table);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
