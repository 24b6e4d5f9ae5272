// Runtime layer: talks to the reporting service and holds session state
// (remote data, column preference) for the CLI and the dashboard.

pub mod client;
pub mod config;
pub mod error;
pub mod preference;
pub mod store;

pub use client::{HttpReportApi, ReportApi};
pub use config::{Config, StalePolicy, resolve_workspace_path};
pub use error::{Error, Result};
pub use preference::{PreferenceStore, ViewPreference};
pub use store::{
    ApplyResult, CallId, FamilyState, FetchFamily, FetchOutcome, FetchStatus, RemoteDataStore,
    RemoteSnapshot,
};
