use adboard_runtime::Config;
use anyhow::{Result, bail};

use crate::context::ExecutionContext;
use crate::presentation::{ConfigViewModel, ConsoleRenderer};

pub fn show(ctx: &ExecutionContext) -> Result<()> {
    let path = ctx.config_path();
    let view = ConfigViewModel {
        path: path.display().to_string(),
        exists: path.exists(),
        config: ctx.config()?.clone(),
    };
    ConsoleRenderer::new(ctx.format).render_config(&view)
}

pub fn init(ctx: &ExecutionContext, force: bool) -> Result<()> {
    let path = ctx.config_path();
    if path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save_to(&path)?;
    tracing::info!(path = %path.display(), "wrote default config");
    println!("Wrote default config to {}", path.display());
    Ok(())
}
