use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A column of the report table.
///
/// The set is closed: every table, preference and sort key refers to one of
/// these nine variants, and `ColumnKey::ALL` is the canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    Date,
    App,
    Clicks,
    Requests,
    Response,
    Impression,
    Revenue,
    FillRate,
    Ctr,
}

impl ColumnKey {
    pub const ALL: [ColumnKey; 9] = [
        ColumnKey::Date,
        ColumnKey::App,
        ColumnKey::Clicks,
        ColumnKey::Requests,
        ColumnKey::Response,
        ColumnKey::Impression,
        ColumnKey::Revenue,
        ColumnKey::FillRate,
        ColumnKey::Ctr,
    ];

    /// Key string used on the command line and in config files
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKey::Date => "date",
            ColumnKey::App => "app",
            ColumnKey::Clicks => "clicks",
            ColumnKey::Requests => "requests",
            ColumnKey::Response => "response",
            ColumnKey::Impression => "impression",
            ColumnKey::Revenue => "revenue",
            ColumnKey::FillRate => "fillRate",
            ColumnKey::Ctr => "ctr",
        }
    }

    /// Header label shown above the column
    pub fn label(self) -> &'static str {
        match self {
            ColumnKey::Date => "Date",
            ColumnKey::App => "App",
            ColumnKey::Clicks => "Clicks",
            ColumnKey::Requests => "Ad Requests",
            ColumnKey::Response => "Ad Response",
            ColumnKey::Impression => "Impression",
            ColumnKey::Revenue => "Revenue",
            ColumnKey::FillRate => "Fill Rate",
            ColumnKey::Ctr => "CTR",
        }
    }

    /// Date and App can never be hidden
    pub fn is_pinned(self) -> bool {
        matches!(self, ColumnKey::Date | ColumnKey::App)
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColumnKeyError(pub String);

impl fmt::Display for ParseColumnKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = ColumnKey::ALL.iter().map(|k| k.as_str()).collect();
        write!(
            f,
            "unknown column '{}' (expected one of: {})",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for ParseColumnKeyError {}

impl FromStr for ColumnKey {
    type Err = ParseColumnKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ColumnKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseColumnKeyError(trimmed.to_string()))
    }
}
