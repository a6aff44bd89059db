//! Pending arrivals derived from open purchase-order lines.
//!
//! A line is pending when it belongs to the target SKU, has a positive
//! quantity and is due today or later. Lines whose date or quantity cannot be
//! read are dropped silently.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockcast_core::{Sku, ValueObject, coerce_date, coerce_quantity};

use crate::order_line::PurchaseOrderLine;

/// A pending purchase-order line with its cells already coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalLine {
    pub sku: Sku,
    pub document_number: String,
    pub delivery_date: NaiveDate,
    pub quantity: f64,
    pub comments: String,
}

impl ValueObject for ArrivalLine {}

/// Filtered, ungrouped pending lines (kept for display).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArrivalDetail(Vec<ArrivalLine>);

impl ArrivalDetail {
    pub fn lines(&self) -> &[ArrivalLine] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|l| l.quantity).sum()
    }

    /// Lines ordered by delivery date, then document number.
    pub fn sorted_for_display(&self) -> Vec<&ArrivalLine> {
        let mut lines: Vec<&ArrivalLine> = self.0.iter().collect();
        lines.sort_by(|a, b| {
            a.delivery_date
                .cmp(&b.delivery_date)
                .then_with(|| a.document_number.cmp(&b.document_number))
        });
        lines
    }
}

/// Delivery date → summed arriving quantity.
///
/// Lines due on the same date are summed, never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArrivalSchedule(BTreeMap<NaiveDate, f64>);

impl ArrivalSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `quantity` arriving on `date`, summing with anything already due.
    pub fn add(&mut self, date: NaiveDate, quantity: f64) {
        *self.0.entry(date).or_insert(0.0) += quantity;
    }

    /// Quantity arriving on `date` (zero when nothing is due).
    pub fn quantity_on(&self, date: NaiveDate) -> f64 {
        self.0.get(&date).copied().unwrap_or(0.0)
    }

    /// Number of distinct delivery dates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Stock on order regardless of how far out it arrives.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

impl FromIterator<(NaiveDate, f64)> for ArrivalSchedule {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, f64)>>(iter: T) -> Self {
        let mut schedule = Self::new();
        for (date, qty) in iter {
            schedule.add(date, qty);
        }
        schedule
    }
}

/// Output of the arrival schedule builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingArrivals {
    pub schedule: ArrivalSchedule,
    pub detail: ArrivalDetail,
}

/// Build the arrival schedule for `sku` as seen on `today`.
pub fn build_arrival_schedule(
    lines: &[PurchaseOrderLine],
    sku: &Sku,
    today: NaiveDate,
) -> PendingArrivals {
    let detail: Vec<ArrivalLine> = lines
        .iter()
        .filter(|line| &line.sku == sku)
        .filter_map(|line| {
            let delivery_date = coerce_date(&line.delivery_date)?;
            let quantity = coerce_quantity(&line.quantity)?;
            (quantity > 0.0 && delivery_date >= today).then(|| ArrivalLine {
                sku: line.sku.clone(),
                document_number: line.document_number.clone(),
                delivery_date,
                quantity,
                comments: line.comments.clone(),
            })
        })
        .collect();

    let schedule = detail
        .iter()
        .map(|l| (l.delivery_date, l.quantity))
        .collect();

    PendingArrivals {
        schedule,
        detail: ArrivalDetail(detail),
    }
}
