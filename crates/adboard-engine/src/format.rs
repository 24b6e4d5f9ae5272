use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use adboard_types::NOT_AVAILABLE;

/// Format a count with a magnitude suffix ("1.20M", "2.90K", "512").
/// Absent and zero both render as "0".
pub fn format_number(count: Option<u64>) -> String {
    match count {
        None | Some(0) => "0".to_string(),
        Some(n) if n >= 1_000_000 => format!("{:.2}M", n as f64 / 1_000_000.0),
        Some(n) if n >= 1_000 => format!("{:.2}K", n as f64 / 1_000.0),
        Some(n) => n.to_string(),
    }
}

/// Format revenue as dollars with two decimals; absent renders as "$0.00"
pub fn format_currency(amount: Option<Decimal>) -> String {
    let rounded = amount
        .unwrap_or_default()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}

pub fn format_percent(pct: f64) -> String {
    format!("{:.2}%", pct)
}

/// Format as "2 Jan 2023"; a missing date renders as "N/A"
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%-d %b %Y").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}
