use adboard_engine::{AppDirectory, DisplayRow, run_pipeline};
use adboard_runtime::ViewPreference;
use adboard_types::{AppDirectoryEntry, ColumnKey, DateRange, FilterState, ReportRow, SortSpec};
use serde::Serialize;

/// Empty-state text of the report table
pub const EMPTY_MESSAGE: &str = "No data found";

/// The report table after the pipeline, restricted to the visible columns.
///
/// `rows` keeps every field of each row (JSON output shows raw values);
/// `cells()` yields the formatted text of the visible columns only.
#[derive(Debug, Clone, Serialize)]
pub struct ReportViewModel {
    pub range: Option<DateRange>,
    pub columns: Vec<ColumnKey>,
    pub sort: SortSpec,
    pub filter: FilterState,
    pub rows: Vec<DisplayRow>,
}

impl ReportViewModel {
    pub fn build(
        range: Option<DateRange>,
        rows: &[ReportRow],
        apps: &[AppDirectoryEntry],
        preference: &ViewPreference,
        filter: &FilterState,
        sort: &SortSpec,
    ) -> Self {
        let directory = AppDirectory::new(apps);
        Self {
            range,
            columns: preference.visible_columns(),
            sort: *sort,
            filter: filter.clone(),
            rows: run_pipeline(rows, &directory, filter, sort),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|key| key.label()).collect()
    }

    pub fn cells(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(|row| row.cells(&self.columns)).collect()
    }

    /// One-line description of range, sort and filter
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(range) = &self.range {
            parts.push(range.to_string());
        }
        parts.push(match self.rows.len() {
            1 => "1 row".to_string(),
            n => format!("{} rows", n),
        });
        if let Some((key, direction)) = self.sort.active() {
            parts.push(format!("sorted by {} ({})", key.label(), direction.label()));
        }
        if !self.filter.is_empty() {
            parts.push(format!("app contains \"{}\"", self.filter.text));
        }
        parts.join(" · ")
    }
}

/// Numbers and percentages read better right-aligned
pub fn is_numeric_column(key: ColumnKey) -> bool {
    !matches!(key, ColumnKey::Date | ColumnKey::App)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adboard_types::{AppId, SortDirection};

    fn sample() -> ReportViewModel {
        let rows = vec![
            ReportRow {
                app_id: Some(AppId::from(1u64)),
                clicks: Some(10),
                ..Default::default()
            },
            ReportRow {
                app_id: Some(AppId::from(2u64)),
                clicks: Some(20),
                ..Default::default()
            },
        ];
        let apps = vec![
            AppDirectoryEntry::new(1u64, "Alpha"),
            AppDirectoryEntry::new(2u64, "Beta"),
        ];
        ReportViewModel::build(
            DateRange::parse("2021-06-01", "2021-06-07").ok(),
            &rows,
            &apps,
            &ViewPreference::apply_changes([ColumnKey::Clicks], [ColumnKey::Clicks]),
            &FilterState::default(),
            &SortSpec::new(ColumnKey::Clicks, SortDirection::Descending),
        )
    }

    #[test]
    fn test_columns_follow_preference() {
        let vm = sample();
        assert_eq!(
            vm.columns,
            vec![ColumnKey::Clicks, ColumnKey::Date, ColumnKey::App]
        );
        assert_eq!(vm.headers(), vec!["Clicks", "Date", "App"]);
    }

    #[test]
    fn test_cells_are_sorted_and_formatted() {
        let vm = sample();
        assert_eq!(
            vm.cells(),
            vec![
                vec!["20".to_string(), "N/A".to_string(), "Beta".to_string()],
                vec!["10".to_string(), "N/A".to_string(), "Alpha".to_string()],
            ]
        );
    }

    #[test]
    fn test_summary_mentions_sort() {
        assert_eq!(
            sample().summary(),
            "2021-06-01 → 2021-06-07 · 2 rows · sorted by Clicks (Descending)"
        );
    }
}
