// NOTE: every command shares the global flags so `--data-dir`, `--base-url`
// and `--format` can be given before or after the subcommand.

use adboard_types::{ColumnKey, SortSpec};
use clap::{Parser, Subcommand};

use crate::types::{LogLevel, OutputFormat};

#[derive(Parser)]
#[command(name = "adboard")]
#[command(about = "Browse and export ad-performance reports", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Data directory holding config.toml and the dashboard log (default: $ADBOARD_PATH or the XDG data dir)"
    )]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Base URL of the reporting service (overrides config and $ADBOARD_BASE_URL)"
    )]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the report for a date range and print it
    Report {
        #[arg(long, help = "First day of the range, YYYY-MM-DD (default from config)")]
        start: Option<String>,

        #[arg(long, help = "Last day of the range, YYYY-MM-DD (default from config)")]
        end: Option<String>,

        #[arg(long, help = "Sort as <column>[:asc|desc], or none")]
        sort: Option<SortSpec>,

        #[arg(long, help = "Only rows whose app name contains this text")]
        filter: Option<String>,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Columns to show, in order (date and app are always shown)"
        )]
        columns: Vec<ColumnKey>,
    },

    /// Open the interactive dashboard (default)
    Dashboard {
        #[arg(long, help = "Initial first day, YYYY-MM-DD (default from config)")]
        start: Option<String>,

        #[arg(long, help = "Initial last day, YYYY-MM-DD (default from config)")]
        end: Option<String>,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        #[arg(long, help = "Overwrite an existing config file")]
        force: bool,
    },
}
