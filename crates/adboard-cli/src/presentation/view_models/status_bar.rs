use adboard_runtime::{FetchStatus, RemoteSnapshot};
use serde::Serialize;

use super::StatusLevel;

#[derive(Debug, Clone, Serialize)]
pub struct StatusBarViewModel {
    pub report_status: FetchStatus,
    pub apps_status: FetchStatus,
    pub row_count: usize,
    pub message: String,
    pub level: StatusLevel,
}

impl StatusBarViewModel {
    /// `row_count` is the number of rows after filtering
    pub fn from_snapshot(snapshot: &RemoteSnapshot, row_count: usize) -> Self {
        let (message, level) = if !snapshot.is_settled() {
            ("Loading…".to_string(), StatusLevel::Info)
        } else if let Some(error) = &snapshot.report.error {
            (format!("Fetch failed: {}", error), StatusLevel::Error)
        } else if let Some(error) = &snapshot.apps.error {
            // rows are still usable, names fall back to N/A
            (format!("App names unavailable: {}", error), StatusLevel::Warning)
        } else if snapshot.report.status == FetchStatus::Idle {
            ("Idle".to_string(), StatusLevel::Info)
        } else {
            (
                format!("Loaded {} of {} rows", row_count, snapshot.rows().len()),
                StatusLevel::Success,
            )
        };

        Self {
            report_status: snapshot.report.status,
            apps_status: snapshot.apps.status,
            row_count,
            message,
            level,
        }
    }
}
