//! Report table component
//!
//! Owns the header focus, the row selection and the sort/filter popup.

use adboard_types::{ColumnKey, FilterState, SortDirection, SortSpec};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{Frame, layout::Rect, widgets::TableState};

use crate::presentation::view_models::ReportViewModel;
use crate::presentation::views::tui::ReportTableView;

use super::sort_popup::{SortPopup, SortPopupAction};

/// New view settings chosen in the popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableAction {
    pub sort: SortSpec,
    /// Replaces the app filter when present
    pub filter: Option<FilterState>,
}

pub struct ReportTableComponent {
    header: usize,
    state: TableState,
    popup: Option<SortPopup>,
}

impl ReportTableComponent {
    pub fn new() -> Self {
        Self {
            header: 0,
            state: TableState::default(),
            popup: None,
        }
    }

    pub fn focused_header(&self) -> usize {
        self.header
    }

    pub fn popup(&self) -> Option<&SortPopup> {
        self.popup.as_ref()
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup.is_some()
    }

    pub fn handle_input(&mut self, key: KeyEvent, report: &ReportViewModel) -> Option<TableAction> {
        if let Some(popup) = &mut self.popup {
            return match popup.handle_input(key)? {
                SortPopupAction::Cancel => {
                    self.popup = None;
                    None
                }
                SortPopupAction::Apply {
                    column,
                    direction,
                    search,
                } => {
                    self.popup = None;
                    Some(apply_choice(column, direction, search))
                }
            };
        }

        let column_count = report.columns.len();
        let row_count = report.rows.len();

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.header = self.header.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if column_count > 0 {
                    self.header = (self.header + 1).min(column_count - 1);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.select_by(row_count, 1),
            KeyCode::Up | KeyCode::Char('k') => self.select_by(row_count, -1),
            KeyCode::PageDown => self.select_by(row_count, 10),
            KeyCode::PageUp => self.select_by(row_count, -10),
            KeyCode::Home => self.state.select(Some(0)),
            KeyCode::End => {
                if row_count > 0 {
                    self.state.select(Some(row_count - 1));
                }
            }
            KeyCode::Enter => {
                if let Some(column) = report.columns.get(self.header) {
                    self.popup = Some(SortPopup::open(
                        *column,
                        report.sort.direction_for(*column),
                        &report.filter.text,
                    ));
                }
            }
            _ => {}
        }
        None
    }

    fn select_by(&mut self, row_count: usize, delta: isize) {
        if row_count == 0 {
            return;
        }
        let next = match self.state.selected() {
            Some(i) => i.saturating_add_signed(delta).min(row_count - 1),
            None => 0,
        };
        self.state.select(Some(next));
    }

    /// Clamp indices to the current data, then draw
    pub fn render(&mut self, f: &mut Frame, area: Rect, report: &ReportViewModel, has_focus: bool) {
        if self.header >= report.columns.len() {
            self.header = report.columns.len().saturating_sub(1);
        }
        match self.state.selected() {
            Some(_) if report.rows.is_empty() => self.state.select(None),
            Some(i) if i >= report.rows.len() => self.state.select(Some(report.rows.len() - 1)),
            _ => {}
        }

        let view = ReportTableView::new(report, self.header, has_focus);
        if report.is_empty() {
            f.render_widget(view.build_empty(), area);
        } else {
            f.render_stateful_widget(view.build_table(), area, &mut self.state);
        }
    }

    pub fn render_popup(&self, f: &mut Frame, area: Rect) {
        if let Some(popup) = &self.popup {
            popup.render(f, area);
        }
    }
}

impl Default for ReportTableComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// Popup result → view settings. The app column replaces the filter text;
/// direction None clears the sort whatever column held it.
fn apply_choice(column: ColumnKey, direction: SortDirection, search: Option<String>) -> TableAction {
    let sort = match direction {
        SortDirection::None => SortSpec::unsorted(),
        direction => SortSpec::new(column, direction),
    };
    let filter = if column == ColumnKey::App {
        Some(FilterState::new(search.unwrap_or_default()))
    } else {
        None
    };
    TableAction { sort, filter }
}
