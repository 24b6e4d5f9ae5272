//! Bottom status bar: fetch state on the left, key hints on the right.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::presentation::view_models::StatusBarViewModel;

use super::status_level_to_color;

pub struct StatusBarView<'a> {
    model: &'a StatusBarViewModel,
}

impl<'a> StatusBarView<'a> {
    pub fn new(model: &'a StatusBarViewModel) -> Self {
        Self { model }
    }
}

impl<'a> Widget for StatusBarView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = status_level_to_color(self.model.level);

        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(inner);

        let status_line = Line::from(vec![
            Span::raw(format!("Report: {} ", self.model.report_status.as_str())),
            Span::raw("| "),
            Span::raw(format!("Apps: {} ", self.model.apps_status.as_str())),
            Span::raw("| "),
            Span::styled(&self.model.message, Style::default().fg(color)),
        ]);
        Paragraph::new(status_line).render(chunks[0], buf);

        let key = Style::default().fg(Color::Yellow);
        let help_line = Line::from(vec![
            Span::styled("[q]", key),
            Span::raw("uit "),
            Span::styled("[Tab]", key),
            Span::raw("focus "),
            Span::styled("[c]", key),
            Span::raw("olumns "),
            Span::styled("[Enter]", key),
            Span::raw("sort/filter"),
        ]);
        Paragraph::new(help_line).render(chunks[1], buf);
    }
}
