// adboard: terminal dashboard and report exporter for ad-performance data.
//
// Layering:
// - adboard-types: report rows, column keys, wire decoding
// - adboard-engine: derive → filter → sort pipeline and cell formatting
// - adboard-runtime: HTTP client, remote data store, column preference, config
// - this crate: command line, console output and the ratatui dashboard

mod args;
mod commands;
pub mod context;
mod handlers;
pub mod logging;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands, ConfigCommand};
pub use commands::run;
