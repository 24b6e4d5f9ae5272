use std::cmp::Ordering;

use rust_decimal::prelude::ToPrimitive;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use adboard_types::{ColumnKey, SortDirection, SortSpec};

use crate::table::DisplayRow;

/// Comparable value of a generic numeric column
#[derive(Debug, Clone, Copy, PartialEq)]
enum SortValue {
    Missing,
    Number(f64),
}

impl SortValue {
    fn from_count(count: Option<u64>) -> Self {
        count.map_or(SortValue::Missing, |n| SortValue::Number(n as f64))
    }
}

/// Sort rows in place by `spec`. The sort is stable, and descending is the
/// exact reverse of ascending, so rows with equal keys keep their input order
/// in both directions. An inactive spec leaves the order untouched.
pub fn sort_rows(rows: &mut [DisplayRow], spec: &SortSpec) {
    let Some((key, direction)) = spec.active() else {
        return;
    };
    rows.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, key);
        match direction {
            SortDirection::Descending => ordering.reverse(),
            _ => ordering,
        }
    });
}

/// Ascending comparison of two rows on one column
pub fn compare_by_key(a: &DisplayRow, b: &DisplayRow, key: ColumnKey) -> Ordering {
    match key {
        // Undated rows sort before any dated row
        ColumnKey::Date => a.row.date.cmp(&b.row.date),
        ColumnKey::Impression => a
            .row
            .impressions
            .unwrap_or(0)
            .cmp(&b.row.impressions.unwrap_or(0)),
        ColumnKey::Response => a
            .row
            .responses
            .unwrap_or(0)
            .cmp(&b.row.responses.unwrap_or(0)),
        ColumnKey::App => locale_cmp(&a.app_name, &b.app_name),
        ColumnKey::Clicks => compare_values(
            SortValue::from_count(a.row.clicks),
            SortValue::from_count(b.row.clicks),
        ),
        ColumnKey::Requests => compare_values(
            SortValue::from_count(a.row.requests),
            SortValue::from_count(b.row.requests),
        ),
        ColumnKey::Revenue => compare_values(revenue_value(a), revenue_value(b)),
        ColumnKey::FillRate => {
            compare_values(shown_percent(a.fill_rate), shown_percent(b.fill_rate))
        }
        ColumnKey::Ctr => compare_values(shown_percent(a.ctr), shown_percent(b.ctr)),
    }
}

fn revenue_value(row: &DisplayRow) -> SortValue {
    row.row
        .revenue
        .and_then(|r| r.to_f64())
        .map_or(SortValue::Missing, SortValue::Number)
}

/// Percent as displayed (two decimals), so rows showing the same rate tie
fn shown_percent(pct: f64) -> SortValue {
    let shown = format!("{:.2}", pct).parse().unwrap_or(pct);
    SortValue::Number(shown)
}

/// Numbers compare numerically; a missing value (not zero) comes first
fn compare_values(a: SortValue, b: SortValue) -> Ordering {
    match (a, b) {
        (SortValue::Number(x), SortValue::Number(y)) => x.total_cmp(&y),
        (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
        (SortValue::Missing, SortValue::Number(_)) => Ordering::Less,
        (SortValue::Number(_), SortValue::Missing) => Ordering::Greater,
    }
}

/// Dictionary-style string ordering, compared level by level:
/// 1. base letters, ignoring accents and case ("Émile" < "Zeta")
/// 2. accents, unaccented first ("emile" < "émile")
/// 3. case, lower before upper ("alpha" < "Alpha")
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented(a).cmp(accented(b)))
        .then_with(|| case_order(a, b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_order(a: &str, b: &str) -> Ordering {
    a.nfd()
        .zip(b.nfd())
        .find(|(x, y)| x != y)
        .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => x.cmp(&y),
        })
        .unwrap_or_else(|| a.nfd().count().cmp(&b.nfd().count()))
}
