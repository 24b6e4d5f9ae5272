use serde::Serialize;

use adboard_types::{ColumnKey, ReportRow};

use crate::derive;
use crate::directory::AppDirectory;
use crate::format::{format_currency, format_date, format_number, format_percent};

/// A report row with its derived metrics and resolved app name, ready to be
/// rendered in any column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    #[serde(flatten)]
    pub row: ReportRow,
    pub app_name: String,
    pub fill_rate: f64,
    pub ctr: f64,
}

impl DisplayRow {
    pub fn derive(row: &ReportRow, apps: &AppDirectory) -> Self {
        Self {
            row: row.clone(),
            app_name: apps.resolve(row.app_id.as_ref()).to_string(),
            fill_rate: derive::fill_rate(row),
            ctr: derive::ctr(row),
        }
    }

    /// Display text of one cell
    pub fn cell(&self, key: ColumnKey) -> String {
        match key {
            ColumnKey::Date => format_date(self.row.date),
            ColumnKey::App => self.app_name.clone(),
            ColumnKey::Clicks => format_number(self.row.clicks),
            ColumnKey::Requests => format_number(self.row.requests),
            ColumnKey::Response => format_number(self.row.responses),
            ColumnKey::Impression => format_number(self.row.impressions),
            ColumnKey::Revenue => format_currency(self.row.revenue),
            ColumnKey::FillRate => format_percent(self.fill_rate),
            ColumnKey::Ctr => format_percent(self.ctr),
        }
    }

    pub fn cells(&self, columns: &[ColumnKey]) -> Vec<String> {
        columns.iter().map(|key| self.cell(*key)).collect()
    }
}
