use adboard_types::ReportRow;

/// Responses per request as a percentage; 0 when requests is zero or absent
pub fn fill_rate(row: &ReportRow) -> f64 {
    match row.requests {
        Some(requests) if requests > 0 => {
            row.responses.unwrap_or(0) as f64 / requests as f64 * 100.0
        }
        _ => 0.0,
    }
}

/// Clicks per impression as a percentage; 0 when impressions or clicks are
/// zero or absent
pub fn ctr(row: &ReportRow) -> f64 {
    match (row.clicks, row.impressions) {
        (Some(clicks), Some(impressions)) if clicks > 0 && impressions > 0 => {
            clicks as f64 / impressions as f64 * 100.0
        }
        _ => 0.0,
    }
}
