use super::args::{Cli, Commands, ConfigCommand};
use super::handlers;
use crate::context::ExecutionContext;
use crate::logging::{self, LOG_FILE, LogTarget};
use adboard_runtime::resolve_workspace_path;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_workspace_path(cli.data_dir.as_deref())?;

    let command = cli.command.unwrap_or(Commands::Dashboard {
        start: None,
        end: None,
    });

    // The dashboard owns the terminal, so its logs go to a file
    let log_target = match command {
        Commands::Dashboard { .. } => LogTarget::File(data_dir.join(LOG_FILE)),
        _ => LogTarget::Stderr,
    };
    logging::init(cli.log_level, log_target)?;
    tracing::debug!(data_dir = %data_dir.display(), format = %cli.format, "resolved data directory");

    let ctx = ExecutionContext::new(data_dir, cli.base_url, cli.format);

    match command {
        Commands::Report {
            start,
            end,
            sort,
            filter,
            columns,
        } => handlers::report::handle(
            &ctx,
            handlers::report::ReportRequest {
                start,
                end,
                sort: sort.unwrap_or_default(),
                filter: filter.unwrap_or_default(),
                columns,
            },
        ),

        Commands::Dashboard { start, end } => {
            handlers::dashboard::handle(&ctx, start.as_deref(), end.as_deref())
        }

        Commands::Config { command } => match command {
            ConfigCommand::Show => handlers::config::show(&ctx),
            ConfigCommand::Init { force } => handlers::config::init(&ctx, force),
        },
    }
}
