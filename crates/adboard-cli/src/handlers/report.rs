use adboard_runtime::{RemoteDataStore, ViewPreference};
use adboard_types::{ColumnKey, FilterState, SortSpec};
use anyhow::{Result, bail};

use crate::context::ExecutionContext;
use crate::presentation::{ConsoleRenderer, ReportViewModel};

pub struct ReportRequest {
    pub start: Option<String>,
    pub end: Option<String>,
    pub sort: SortSpec,
    pub filter: String,
    pub columns: Vec<ColumnKey>,
}

pub fn handle(ctx: &ExecutionContext, request: ReportRequest) -> Result<()> {
    // Validate before anything touches the network
    let range = ctx.resolve_range(request.start.as_deref(), request.end.as_deref())?;
    let preference = preference_for(&request.columns);
    let filter = FilterState::new(request.filter);

    let config = ctx.config()?;
    let runtime = tokio::runtime::Runtime::new()?;
    let (mut store, outcomes) = RemoteDataStore::new(
        ctx.api()?,
        runtime.handle().clone(),
        config.dashboard.stale_results,
    );

    store.load(range);
    let snapshot = store.wait_settled(&outcomes);

    if let Some(error) = &snapshot.report.error {
        bail!("Failed to fetch report: {}", error);
    }
    if let Some(error) = &snapshot.apps.error {
        tracing::warn!(%error, "app directory unavailable, app names shown as N/A");
    }

    let view = ReportViewModel::build(
        Some(range),
        snapshot.rows(),
        snapshot.apps(),
        &preference,
        &filter,
        &request.sort,
    );
    ConsoleRenderer::new(ctx.format).render_report(&view)
}

/// `--columns` as a preference. Pinned columns the user left out are
/// placed first so the table still opens with date and app.
fn preference_for(columns: &[ColumnKey]) -> ViewPreference {
    if columns.is_empty() {
        return ViewPreference::default();
    }

    let order = ColumnKey::ALL
        .into_iter()
        .filter(|key| key.is_pinned() && !columns.contains(key))
        .chain(columns.iter().copied());
    ViewPreference::apply_changes(columns.iter().copied(), order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_columns_means_all() {
        assert_eq!(preference_for(&[]), ViewPreference::default());
    }

    #[test]
    fn test_missing_pinned_columns_lead() {
        let pref = preference_for(&[ColumnKey::Ctr, ColumnKey::Clicks]);
        assert_eq!(
            pref.visible_columns(),
            vec![ColumnKey::Date, ColumnKey::App, ColumnKey::Ctr, ColumnKey::Clicks]
        );
    }

    #[test]
    fn test_explicit_pinned_position_is_kept() {
        let pref = preference_for(&[ColumnKey::Revenue, ColumnKey::App]);
        assert_eq!(
            pref.visible_columns(),
            vec![ColumnKey::Date, ColumnKey::Revenue, ColumnKey::App]
        );
    }
}
