use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

use crate::AppId;

/// Report row as sent by `GET /report`.
///
/// Every field is decoded leniently: a value of the wrong type becomes
/// `None` instead of failing the whole payload.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireReportRow {
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub app_id: Option<AppId>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub clicks: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub requests: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub responses: Option<u64>,
    #[serde(default, alias = "impressions", deserialize_with = "lenient_count")]
    pub impression: Option<u64>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub revenue: Option<Decimal>,
}

/// App directory entry as sent by `GET /apps`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireAppEntry {
    #[serde(default, deserialize_with = "lenient_id")]
    pub app_id: Option<AppId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub app_name: Option<String>,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(count_from_value(&Value::deserialize(deserializer)?))
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(decimal_from_value(&Value::deserialize(deserializer)?))
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(date_from_value(&Value::deserialize(deserializer)?))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<AppId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(id_from_value(&Value::deserialize(deserializer)?))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub(crate) fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(count_from_float)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(count_from_float))
        }
        _ => None,
    }
}

fn count_from_float(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0).then(|| f.round() as u64)
}

pub(crate) fn decimal_from_value(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

pub(crate) fn date_from_value(value: &Value) -> Option<NaiveDate> {
    let Value::String(s) = value else {
        return None;
    };
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            s.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}

pub(crate) fn id_from_value(value: &Value) -> Option<AppId> {
    match value {
        Value::Number(n) => Some(match (n.as_u64(), n.as_i64()) {
            (Some(u), _) => AppId::from(u),
            (None, Some(i)) => AppId::new(i.to_string()),
            _ => AppId::new(n.to_string()),
        }),
        Value::String(s) if !s.trim().is_empty() => Some(AppId::new(s.trim())),
        _ => None,
    }
}
