//! Column picker panel
//!
//! `Closed → Open(draft) → Closed`. Opening copies the committed preference
//! into a draft; Esc drops the draft, Enter hands it back for commit.

use std::collections::BTreeSet;

use adboard_runtime::ViewPreference;
use adboard_types::ColumnKey;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

use crate::presentation::views::tui::centered_rect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnPickerAction {
    /// Commit the draft
    Apply(ViewPreference),
    /// Restore every column in canonical order
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Draft {
    selected: BTreeSet<ColumnKey>,
    order: Vec<ColumnKey>,
    cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PickerState {
    Closed,
    Open(Draft),
}

pub struct ColumnPickerComponent {
    state: PickerState,
}

impl ColumnPickerComponent {
    pub fn new() -> Self {
        Self {
            state: PickerState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PickerState::Open(_))
    }

    /// Open on a fresh copy of `committed`
    pub fn open(&mut self, committed: &ViewPreference) {
        self.state = PickerState::Open(Draft {
            selected: committed.selected_columns().clone(),
            order: committed.column_order().to_vec(),
            cursor: 0,
        });
    }

    pub fn close(&mut self) {
        self.state = PickerState::Closed;
    }

    /// Draft order and selection, if open
    pub fn draft(&self) -> Option<(&[ColumnKey], &BTreeSet<ColumnKey>)> {
        match &self.state {
            PickerState::Open(draft) => Some((&draft.order, &draft.selected)),
            PickerState::Closed => None,
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ColumnPickerAction> {
        let PickerState::Open(draft) = &mut self.state else {
            return None;
        };

        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Esc => {
                self.close();
                None
            }
            KeyCode::Enter => {
                let preference = ViewPreference::apply_changes(
                    draft.selected.iter().copied(),
                    draft.order.iter().copied(),
                );
                self.close();
                Some(ColumnPickerAction::Apply(preference))
            }
            KeyCode::Char('r') => {
                self.close();
                Some(ColumnPickerAction::Reset)
            }
            KeyCode::Char(' ') => {
                draft.toggle();
                None
            }
            KeyCode::Char('K') => {
                draft.move_cursor_item(-1);
                None
            }
            KeyCode::Char('J') => {
                draft.move_cursor_item(1);
                None
            }
            KeyCode::Up if shift => {
                draft.move_cursor_item(-1);
                None
            }
            KeyCode::Down if shift => {
                draft.move_cursor_item(1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                draft.cursor = draft.cursor.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                draft.cursor = (draft.cursor + 1).min(draft.order.len().saturating_sub(1));
                None
            }
            _ => None,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let PickerState::Open(draft) = &self.state else {
            return;
        };

        let items: Vec<ListItem> = draft
            .order
            .iter()
            .map(|key| {
                let mark = if draft.selected.contains(key) { "[x]" } else { "[ ]" };
                let mut spans = vec![Span::raw(format!("{} {}", mark, key.label()))];
                if key.is_pinned() {
                    spans.push(Span::styled(
                        "  (always shown)",
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let rect = centered_rect(area, 46, draft.order.len() as u16 + 4);
        let block = Block::default()
            .title(" Columns ")
            .title_bottom(" Space toggle · J/K move · r reset · Enter apply · Esc cancel ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = ListState::default();
        state.select(Some(draft.cursor));

        f.render_widget(Clear, rect);
        f.render_stateful_widget(list, rect, &mut state);
    }
}

impl Default for ColumnPickerComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Draft {
    /// Pinned columns cannot be deselected
    fn toggle(&mut self) {
        let Some(key) = self.order.get(self.cursor).copied() else {
            return;
        };
        if key.is_pinned() {
            return;
        }
        if !self.selected.remove(&key) {
            self.selected.insert(key);
        }
    }

    /// Splice the item under the cursor one step and keep the cursor on it
    fn move_cursor_item(&mut self, delta: isize) {
        let from = self.cursor;
        let Some(to) = from.checked_add_signed(delta) else {
            return;
        };
        if to >= self.order.len() {
            return;
        }
        let item = self.order.remove(from);
        self.order.insert(to, item);
        self.cursor = to;
    }
}
