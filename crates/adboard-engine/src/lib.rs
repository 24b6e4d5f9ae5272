// Engine module - the report table pipeline
// Sits between decoded report data (types) and CLI presentation

pub mod derive;
pub mod directory;
pub mod format;
pub mod sort;
mod table;

pub use directory::AppDirectory;
pub use sort::{compare_by_key, locale_cmp, sort_rows};
pub use table::DisplayRow;

use adboard_types::{FilterState, ReportRow, SortSpec};

// Façade API - the CLI should call these instead of the stage modules

/// Derive → filter → sort. Recomputed in full whenever any input changes.
pub fn run_pipeline(
    rows: &[ReportRow],
    apps: &AppDirectory,
    filter: &FilterState,
    sort: &SortSpec,
) -> Vec<DisplayRow> {
    let mut derived = derive_rows(rows, apps);
    derived.retain(|row| filter.matches(&row.app_name));
    sort_rows(&mut derived, sort);
    derived
}

/// Derive stage only: one display row per input row, in input order
pub fn derive_rows(rows: &[ReportRow], apps: &AppDirectory) -> Vec<DisplayRow> {
    rows.iter()
        .map(|row| DisplayRow::derive(row, apps))
        .collect()
}

/// Filter stage only, for callers that already hold derived rows
pub fn filter_rows(rows: &[DisplayRow], filter: &FilterState) -> Vec<DisplayRow> {
    rows.iter()
        .filter(|row| filter.matches(&row.app_name))
        .cloned()
        .collect()
}
