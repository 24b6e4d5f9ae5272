//! Boundary decoding of the reporting API payloads.
//!
//! Both endpoints answer with an envelope `{"data": [...]}`. Only a body that
//! is not JSON at all is an error; every other defect degrades:
//! - a missing or non-array `data` field decodes to an empty sequence
//! - a report entry that is not an object becomes an all-absent row
//! - a field of the wrong type becomes absent
//! - an app entry without an id is skipped, a missing name becomes "N/A"

mod schema;

use serde_json::Value;

use crate::{AppDirectoryEntry, ReportRow, Result};
use schema::{WireAppEntry, WireReportRow};

pub const NOT_AVAILABLE: &str = "N/A";

pub fn decode_report(body: &[u8]) -> Result<Vec<ReportRow>> {
    let envelope: Value = serde_json::from_slice(body)?;
    Ok(data_entries(envelope)
        .into_iter()
        .map(|entry| {
            let wire: WireReportRow = serde_json::from_value(entry).unwrap_or_default();
            ReportRow {
                date: wire.date,
                app_id: wire.app_id,
                clicks: wire.clicks,
                requests: wire.requests,
                responses: wire.responses,
                impressions: wire.impression,
                revenue: wire.revenue,
            }
        })
        .collect())
}

pub fn decode_apps(body: &[u8]) -> Result<Vec<AppDirectoryEntry>> {
    let envelope: Value = serde_json::from_slice(body)?;
    Ok(data_entries(envelope)
        .into_iter()
        .filter_map(|entry| {
            let wire: WireAppEntry = serde_json::from_value(entry).ok()?;
            Some(AppDirectoryEntry {
                app_id: wire.app_id?,
                app_name: wire
                    .app_name
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            })
        })
        .collect())
}

fn data_entries(envelope: Value) -> Vec<Value> {
    match envelope {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(entries)) => entries,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
