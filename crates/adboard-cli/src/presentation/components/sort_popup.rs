//! Sort / filter popup opened from a column header.

use adboard_types::{ColumnKey, SortDirection};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::presentation::views::tui::centered_rect;

const DIRECTIONS: [SortDirection; 3] = [
    SortDirection::None,
    SortDirection::Ascending,
    SortDirection::Descending,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortPopupAction {
    Apply {
        column: ColumnKey,
        direction: SortDirection,
        /// App search text; only the app column carries one
        search: Option<String>,
    },
    Cancel,
}

#[derive(Debug, Clone)]
pub struct SortPopup {
    column: ColumnKey,
    choice: usize,
    search: Option<String>,
    search_focused: bool,
}

impl SortPopup {
    /// `current` is the direction the column is sorted by right now (None if
    /// another column is the sort key); `filter` pre-fills the app search
    pub fn open(column: ColumnKey, current: SortDirection, filter: &str) -> Self {
        Self {
            column,
            choice: DIRECTIONS.iter().position(|d| *d == current).unwrap_or(0),
            search: (column == ColumnKey::App).then(|| filter.to_string()),
            search_focused: false,
        }
    }

    pub fn column(&self) -> ColumnKey {
        self.column
    }

    pub fn direction(&self) -> SortDirection {
        DIRECTIONS[self.choice]
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<SortPopupAction> {
        match key.code {
            KeyCode::Esc => return Some(SortPopupAction::Cancel),
            KeyCode::Enter => {
                return Some(SortPopupAction::Apply {
                    column: self.column,
                    direction: self.direction(),
                    search: self.search.clone(),
                });
            }
            KeyCode::Tab if self.search.is_some() => {
                self.search_focused = !self.search_focused;
                return None;
            }
            _ => {}
        }

        if self.search_focused
            && let Some(search) = &mut self.search
        {
            match key.code {
                KeyCode::Char(c) => search.push(c),
                KeyCode::Backspace => {
                    search.pop();
                }
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.choice = self.choice.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.choice = (self.choice + 1).min(DIRECTIONS.len() - 1)
            }
            _ => {}
        }
        None
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let height = if self.search.is_some() { 10 } else { 7 };
        let rect = centered_rect(area, 40, height);

        let mut lines: Vec<Line> = DIRECTIONS
            .iter()
            .enumerate()
            .map(|(i, direction)| {
                let selected = i == self.choice;
                let mark = if selected { "(•)" } else { "( )" };
                let style = if selected && !self.search_focused {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(format!("{} {}", mark, direction.label()), style))
            })
            .collect();

        if let Some(search) = &self.search {
            let style = if self.search_focused {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().add_modifier(Modifier::UNDERLINED)
            };
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "App Search",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(format!("{}_", search), style)));
        }

        lines.push(Line::from(Span::styled(
            "Enter apply · Esc cancel",
            Style::default().fg(Color::DarkGray),
        )));

        let block = Block::default()
            .title(format!(" {} ", self.column.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        f.render_widget(Clear, rect);
        f.render_widget(Paragraph::new(lines).block(block), rect);
    }
}
