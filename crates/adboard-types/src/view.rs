use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ColumnKey;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    None,
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn label(self) -> &'static str {
        match self {
            SortDirection::None => "None",
            SortDirection::Ascending => "Ascending",
            SortDirection::Descending => "Descending",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(SortDirection::None),
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!(
                "unknown sort direction '{}' (expected asc, desc or none)",
                other
            )),
        }
    }
}

/// Active sort of the table. `key == None` or `direction == None` keeps the
/// fetch order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: Option<ColumnKey>,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn new(key: ColumnKey, direction: SortDirection) -> Self {
        if direction == SortDirection::None {
            return Self::unsorted();
        }
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Key and direction when this sort actually reorders rows
    pub fn active(&self) -> Option<(ColumnKey, SortDirection)> {
        match (self.key, self.direction) {
            (Some(key), SortDirection::Ascending | SortDirection::Descending) => {
                Some((key, self.direction))
            }
            _ => None,
        }
    }

    /// Direction to pre-select when editing `column`
    pub fn direction_for(&self, column: ColumnKey) -> SortDirection {
        match self.active() {
            Some((key, direction)) if key == column => direction,
            _ => SortDirection::None,
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.active() {
            Some((key, SortDirection::Descending)) => write!(f, "{}:desc", key),
            Some((key, _)) => write!(f, "{}:asc", key),
            None => f.write_str("none"),
        }
    }
}

/// Parses `key`, `key:asc`, `key:desc` or `none`
impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(Self::unsorted());
        }
        let (key, direction) = match s.split_once(':') {
            Some((key, direction)) => (key, direction.parse::<SortDirection>()?),
            None => (s, SortDirection::Ascending),
        };
        let key = key.parse::<ColumnKey>().map_err(|e| e.to_string())?;
        Ok(Self::new(key, direction))
    }
}

/// Case-insensitive substring filter on the resolved app name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub text: String,
}

impl FilterState {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn matches(&self, app_name: &str) -> bool {
        self.text.is_empty() || app_name.to_lowercase().contains(&self.text.to_lowercase())
    }
}
