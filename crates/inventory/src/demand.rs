//! Demand estimation from consumption history.
//!
//! Model:
//! - Bucket consumption by calendar month (key = first day of the month).
//! - Buckets are dense between the first and last dated record; quiet months
//!   count as zero demand.
//! - Only *complete* months (strictly before the current one) feed the
//!   mean/std. The current, partial month is reported for display only.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockcast_core::calendar::month_starts_between;
use stockcast_core::{
    AVERAGE_DAYS_PER_MONTH, ValueObject, coerce_date, coerce_quantity, month_start, months_before,
};

use crate::consumption::ConsumptionRecord;

/// Total demand of one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub month_start: NaiveDate,
    pub quantity: f64,
}

impl ValueObject for MonthlyBucket {}

/// Demand of the current month and the three before it, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecentMonths {
    pub current: MonthlyBucket,
    pub one_back: MonthlyBucket,
    pub two_back: MonthlyBucket,
    pub three_back: MonthlyBucket,
}

impl RecentMonths {
    pub fn as_array(&self) -> [MonthlyBucket; 4] {
        [self.current, self.one_back, self.two_back, self.three_back]
    }
}

impl ValueObject for RecentMonths {}

/// Month-start → summed quantity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyDemand {
    buckets: BTreeMap<NaiveDate, f64>,
}

impl MonthlyDemand {
    /// Resample consumption records into dense monthly buckets.
    ///
    /// Records with an unreadable date are dropped. A record with an unreadable
    /// quantity still opens its month but adds nothing to it.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ConsumptionRecord>,
    {
        let mut sums: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in records {
            let Some(date) = coerce_date(&record.request_date) else {
                continue;
            };
            let slot = sums.entry(month_start(date)).or_insert(0.0);
            if let Some(qty) = coerce_quantity(&record.quantity) {
                *slot += qty;
            }
        }

        let (Some(first), Some(last)) = (
            sums.keys().next().copied(),
            sums.keys().next_back().copied(),
        ) else {
            return Self::default();
        };

        let buckets = month_starts_between(first, last)
            .into_iter()
            .map(|m| (m, sums.get(&m).copied().unwrap_or(0.0)))
            .collect();
        Self { buckets }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Demand for the month starting at `month`; zero if there is no bucket.
    pub fn quantity_for(&self, month: NaiveDate) -> f64 {
        self.buckets.get(&month).copied().unwrap_or(0.0)
    }

    pub fn bucket(&self, month: NaiveDate) -> MonthlyBucket {
        MonthlyBucket {
            month_start: month,
            quantity: self.quantity_for(month),
        }
    }

    /// Totals of months strictly before `current_month`, oldest first.
    pub fn complete_totals(&self, current_month: NaiveDate) -> Vec<f64> {
        self.buckets
            .range(..current_month)
            .map(|(_, qty)| *qty)
            .collect()
    }
}

/// Output of the demand estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandEstimate {
    pub daily_mean: f64,
    pub daily_std: f64,
    pub monthly_mean: f64,
    pub monthly_std: f64,
    /// Number of complete months that fed the statistics.
    pub complete_months: usize,
    pub recent_months: RecentMonths,
}

impl ValueObject for DemandEstimate {}

/// Estimate daily demand from an already filtered consumption history.
///
/// - ≥ 2 complete months: mean and sample std (n-1) of the monthly totals.
/// - 1 complete month: mean only, std = 0.
/// - none: all zeros.
pub fn estimate_demand<'a, I>(records: I, today: NaiveDate) -> DemandEstimate
where
    I: IntoIterator<Item = &'a ConsumptionRecord>,
{
    let monthly = MonthlyDemand::from_records(records);
    let current_month = month_start(today);
    let complete = monthly.complete_totals(current_month);

    let (monthly_mean, monthly_std) = match complete.len() {
        0 => (0.0, 0.0),
        1 => (complete[0], 0.0),
        _ => {
            let m = mean(&complete);
            (m, stddev_sample(&complete, m))
        }
    };

    let recent_months = RecentMonths {
        current: monthly.bucket(current_month),
        one_back: monthly.bucket(months_before(today, 1)),
        two_back: monthly.bucket(months_before(today, 2)),
        three_back: monthly.bucket(months_before(today, 3)),
    };

    DemandEstimate {
        daily_mean: monthly_mean / AVERAGE_DAYS_PER_MONTH,
        daily_std: monthly_std / AVERAGE_DAYS_PER_MONTH.sqrt(),
        monthly_mean,
        monthly_std,
        complete_months: complete.len(),
        recent_months,
    }
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}

/// Sample standard deviation (n-1), deterministic.
fn stddev_sample(xs: &[f64], mean: f64) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    let var = xs
        .iter()
        .map(|x| {
            let d = x - mean;
            d * d
        })
        .sum::<f64>()
        / ((xs.len() - 1) as f64);
    var.sqrt()
}
