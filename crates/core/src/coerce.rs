//! Lenient coercion of raw table cells.
//!
//! ERP exports mix numbers, blanks and free text in the same column. A cell
//! that cannot be read becomes `None` ("missing"): it is excluded from sums
//! and filters and never surfaces as an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

// Day-first for slashed dates, matching the exports' locale.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Read a quantity cell. Blank, non-numeric and non-finite cells are missing.
pub fn coerce_quantity(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read a date cell, stripping any time-of-day component.
pub fn coerce_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Sum quantity cells, skipping missing ones. An empty input sums to zero.
pub fn sum_quantities<'a, I>(cells: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    cells.into_iter().filter_map(coerce_quantity).sum()
}
