//! Month arithmetic on calendar dates.
//!
//! Monthly demand buckets are keyed by the first day of their month.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Average calendar days per month (365.25 / 12), used to turn monthly demand
/// into daily demand.
pub const AVERAGE_DAYS_PER_MONTH: f64 = 30.4375;

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Month start `n` months before the month containing `date`.
///
/// Saturates at the earliest representable date.
pub fn months_before(date: NaiveDate, n: u32) -> NaiveDate {
    month_start(date)
        .checked_sub_months(Months::new(n))
        .unwrap_or(NaiveDate::MIN)
}

/// Month start following the month containing `date`, if representable.
pub fn next_month_start(date: NaiveDate) -> Option<NaiveDate> {
    month_start(date).checked_add_months(Months::new(1))
}

/// Every month start from `first`'s month through `last`'s month, inclusive.
pub fn month_starts_between(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    let end = month_start(last);
    let mut cursor = Some(month_start(first));
    let mut out = Vec::new();
    while let Some(month) = cursor {
        if month > end {
            break;
        }
        out.push(month);
        cursor = next_month_start(month);
    }
    out
}
