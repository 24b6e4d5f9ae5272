use adboard_runtime::RemoteDataStore;
use anyhow::Result;

use crate::context::ExecutionContext;
use crate::logging::LOG_FILE;
use crate::presentation::TuiRenderer;

pub fn handle(ctx: &ExecutionContext, start: Option<&str>, end: Option<&str>) -> Result<()> {
    let range = ctx.resolve_range(start, end)?;
    let config = ctx.config()?;

    let runtime = tokio::runtime::Runtime::new()?;
    let (store, outcomes) = RemoteDataStore::new(
        ctx.api()?,
        runtime.handle().clone(),
        config.dashboard.stale_results,
    );

    tracing::info!(
        %range,
        base_url = %config.api.base_url,
        log = %ctx.data_dir().join(LOG_FILE).display(),
        "starting dashboard"
    );

    let result = TuiRenderer::new(store, outcomes, range).run();

    // Fetches still in flight are abandoned, not awaited
    runtime.shutdown_background();
    result
}
