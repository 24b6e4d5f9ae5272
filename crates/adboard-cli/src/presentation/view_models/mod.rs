pub mod common;
pub mod config;
pub mod report;
pub mod status_bar;

pub use common::StatusLevel;
pub use config::ConfigViewModel;
pub use report::ReportViewModel;
pub use status_bar::StatusBarViewModel;
