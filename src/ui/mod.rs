//! Terminal trace viewer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: viewer state and the keyboard event loop over a [`TraceCursor`]
//! - **[`panes`]**: stateless render functions for each visible pane (source,
//!   trace table, output, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The viewer never executes anything: it only moves a cursor over a trace that
//! was fully recorded beforehand.
//!
//! [`TraceCursor`]: crate::snapshot::TraceCursor

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
