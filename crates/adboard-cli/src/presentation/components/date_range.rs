//! Start/end date control.
//!
//! Every committed edit updates the shown date first and validates second:
//! an inverted or malformed range opens a blocking error instead of
//! emitting `Load`.

use adboard_types::{DateRange, parse_date};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::views::tui::{ModalView, centered_rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRangeAction {
    /// Valid range committed; reload now
    Load(DateRange),
}

pub struct DateRangeComponent {
    start: NaiveDate,
    end: NaiveDate,
    focus: DateField,
    /// Text typed into the focused field, not yet committed
    buffer: Option<String>,
    error: Option<String>,
}

impl DateRangeComponent {
    pub fn new(range: DateRange) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
            focus: DateField::Start,
            buffer: None,
            error: None,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn focus(&self) -> DateField {
        self.focus
    }

    /// The modal swallows all other input until dismissed
    pub fn is_blocking(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<DateRangeAction> {
        if self.error.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.error = None;
            }
            return None;
        }

        match key.code {
            KeyCode::Left | KeyCode::Right if self.buffer.is_none() => {
                self.focus = match self.focus {
                    DateField::Start => DateField::End,
                    DateField::End => DateField::Start,
                };
                None
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                let buffer = self.buffer.get_or_insert_with(String::new);
                if buffer.len() < 10 {
                    buffer.push(c);
                }
                None
            }
            KeyCode::Backspace => {
                if let Some(buffer) = &mut self.buffer {
                    buffer.pop();
                }
                None
            }
            KeyCode::Esc => {
                self.buffer = None;
                None
            }
            KeyCode::Enter => {
                let text = self.buffer.take()?;
                match parse_date(&text) {
                    Ok(date) => self.commit(date),
                    Err(e) => {
                        self.error = Some(e.to_string());
                        None
                    }
                }
            }
            KeyCode::Char('[') if self.buffer.is_none() => {
                let date = self.focused_date().pred_opt()?;
                self.commit(date)
            }
            KeyCode::Char(']') if self.buffer.is_none() => {
                let date = self.focused_date().succ_opt()?;
                self.commit(date)
            }
            _ => None,
        }
    }

    fn focused_date(&self) -> NaiveDate {
        match self.focus {
            DateField::Start => self.start,
            DateField::End => self.end,
        }
    }

    fn commit(&mut self, date: NaiveDate) -> Option<DateRangeAction> {
        match self.focus {
            DateField::Start => self.start = date,
            DateField::End => self.end = date,
        }

        match DateRange::new(self.start, self.end) {
            Ok(range) => Some(DateRangeAction::Load(range)),
            Err(e) => {
                tracing::debug!(start = %self.start, end = %self.end, "rejected date range");
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, has_focus: bool) {
        let field = |label: &'static str, which: DateField, date: NaiveDate| {
            let focused = has_focus && self.focus == which;
            let text = match (&self.buffer, focused) {
                (Some(buffer), true) => format!("[{}_]", buffer),
                _ => format!("[{}]", date),
            };
            let style = if focused {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            vec![Span::raw(label), Span::styled(text, style)]
        };

        let mut spans = field("Start ", DateField::Start, self.start);
        spans.push(Span::raw("  →  "));
        spans.extend(field("End ", DateField::End, self.end));
        if has_focus {
            spans.push(Span::styled(
                "   type YYYY-MM-DD + Enter · [ ] step a day · ←/→ switch",
                Style::default().fg(Color::DarkGray),
            ));
        }

        let border = if has_focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let block = Block::default()
            .title(" Date range ")
            .borders(Borders::ALL)
            .border_style(border);
        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    /// Draw the error dialog over `area` if one is open
    pub fn render_modal(&self, f: &mut Frame, area: Rect) {
        if let Some(error) = &self.error {
            let rect = centered_rect(area, 60, 7);
            f.render_widget(ModalView::new("Invalid date range", error), rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(control: &mut DateRangeComponent, text: &str) -> Option<DateRangeAction> {
        for c in text.chars() {
            assert_eq!(control.handle_input(key(KeyCode::Char(c))), None);
        }
        control.handle_input(key(KeyCode::Enter))
    }

    fn control() -> DateRangeComponent {
        DateRangeComponent::new(DateRange::parse("2023-01-01", "2023-01-31").unwrap())
    }

    #[test]
    fn test_valid_edit_loads_immediately() {
        let mut control = control();

        let action = type_text(&mut control, "2023-01-10");

        assert_eq!(
            action,
            Some(DateRangeAction::Load(
                DateRange::parse("2023-01-10", "2023-01-31").unwrap()
            ))
        );
        assert!(!control.is_blocking());
    }

    #[test]
    fn test_start_after_end_shows_modal_and_does_not_load() {
        let mut control = control();

        let action = type_text(&mut control, "2023-02-01");

        assert_eq!(action, None);
        assert!(control.is_blocking());
        assert!(control.error().unwrap().contains("Invalid date range"));
        // shown value is updated even though it was rejected
        assert_eq!(control.start(), NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
    }

    #[test]
    fn test_modal_blocks_input_until_dismissed() {
        let mut control = control();
        type_text(&mut control, "2023-02-01");

        assert_eq!(control.handle_input(key(KeyCode::Char(']'))), None);
        assert_eq!(control.start(), NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
        assert!(control.is_blocking());

        control.handle_input(key(KeyCode::Esc));
        assert!(!control.is_blocking());
    }

    #[test]
    fn test_malformed_date_shows_format_error() {
        let mut control = control();

        let action = type_text(&mut control, "2023-13");

        assert_eq!(action, None);
        assert!(control.error().unwrap().contains("expected YYYY-MM-DD"));
        assert_eq!(control.start(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn test_step_end_date_with_brackets() {
        let mut control = control();
        control.handle_input(key(KeyCode::Right));
        assert_eq!(control.focus(), DateField::End);

        let action = control.handle_input(key(KeyCode::Char(']')));

        assert_eq!(
            action,
            Some(DateRangeAction::Load(
                DateRange::parse("2023-01-01", "2023-02-01").unwrap()
            ))
        );
    }

    #[test]
    fn test_stepping_end_before_start_is_rejected() {
        let mut control =
            DateRangeComponent::new(DateRange::parse("2023-01-05", "2023-01-05").unwrap());
        control.handle_input(key(KeyCode::Right));

        assert_eq!(control.handle_input(key(KeyCode::Char('['))), None);
        assert!(control.is_blocking());
    }

    #[test]
    fn test_escape_discards_typed_text() {
        let mut control = control();
        control.handle_input(key(KeyCode::Char('2')));
        control.handle_input(key(KeyCode::Esc));

        assert_eq!(control.handle_input(key(KeyCode::Enter)), None);
        assert!(!control.is_blocking());
    }
}
