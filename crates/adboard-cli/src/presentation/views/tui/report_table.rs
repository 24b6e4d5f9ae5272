use ratatui::{
    layout::{Alignment, Constraint},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use adboard_types::{ColumnKey, SortDirection};

use crate::presentation::view_models::ReportViewModel;
use crate::presentation::view_models::report::{EMPTY_MESSAGE, is_numeric_column};

/// Report table with a focusable header row
pub struct ReportTableView<'a> {
    model: &'a ReportViewModel,
    focused_header: usize,
    has_focus: bool,
}

impl<'a> ReportTableView<'a> {
    pub fn new(model: &'a ReportViewModel, focused_header: usize, has_focus: bool) -> Self {
        Self {
            model,
            focused_header,
            has_focus,
        }
    }

    fn block(&self) -> Block<'a> {
        let border = if self.has_focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        Block::default()
            .title(format!(" Report: {} ", self.model.summary()))
            .borders(Borders::ALL)
            .border_style(border)
    }

    /// Header label with the active sort arrow
    fn header_label(&self, key: ColumnKey) -> String {
        match self.model.sort.direction_for(key) {
            SortDirection::Ascending => format!("{} ▲", key.label()),
            SortDirection::Descending => format!("{} ▼", key.label()),
            SortDirection::None if key == ColumnKey::App && !self.model.filter.is_empty() => {
                format!("{} *", key.label())
            }
            SortDirection::None => key.label().to_string(),
        }
    }

    pub fn build_empty(&self) -> Paragraph<'a> {
        Paragraph::new(EMPTY_MESSAGE)
            .alignment(Alignment::Center)
            .block(self.block())
    }

    pub fn build_table(&self) -> Table<'a> {
        let labels: Vec<String> = self
            .model
            .columns
            .iter()
            .map(|key| self.header_label(*key))
            .collect();
        let rows = self.model.cells();

        let widths: Vec<Constraint> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let widest = rows
                    .iter()
                    .map(|cells| cells[i].chars().count())
                    .chain(std::iter::once(label.chars().count()))
                    .max()
                    .unwrap_or_default();
                Constraint::Length(widest as u16)
            })
            .collect();

        let header = Row::new(labels.into_iter().enumerate().map(|(i, label)| {
            let style = if i == self.focused_header {
                let style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                if self.has_focus {
                    style.fg(Color::Black).bg(Color::Cyan)
                } else {
                    style
                }
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            Cell::from(label).style(style)
        }));

        let columns = self.model.columns.clone();
        let body = rows.into_iter().map(move |cells| {
            Row::new(cells.into_iter().zip(columns.iter()).map(|(text, key)| {
                if is_numeric_column(*key) {
                    Cell::from(Line::from(text).alignment(Alignment::Right))
                } else {
                    Cell::from(text)
                }
            }))
        });

        Table::new(body, widths)
            .header(header)
            .column_spacing(2)
            .block(self.block())
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    }
}
