//! Dashboard view widgets
//!
//! Views borrow a view model and map it to ratatui widgets. Layout helpers
//! for popups live here too.

pub mod modal;
pub mod report_table;
pub mod status_bar;

pub use modal::ModalView;
pub use report_table::ReportTableView;
pub use status_bar::StatusBarView;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Color;

use crate::presentation::view_models::StatusLevel;

/// Convert StatusLevel to Ratatui Color
pub(crate) fn status_level_to_color(level: StatusLevel) -> Color {
    match level {
        StatusLevel::Success => Color::Green,
        StatusLevel::Info => Color::Cyan,
        StatusLevel::Warning => Color::Yellow,
        StatusLevel::Error => Color::Red,
    }
}

/// A `width` x `height` rect centered in `area`, clipped to it
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}
