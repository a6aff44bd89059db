//! Global cleaning applied once at load time.
//!
//! - Consumption rows without a readable request date are dropped.
//! - The history window keeps rows dated on or after the first day of the
//!   month `months` months before the load date (consumption by request
//!   date, purchase orders by posting date).

use chrono::NaiveDate;
use tracing::warn;

use stockcast_core::{coerce_date, months_before};
use stockcast_inventory::ConsumptionRecord;
use stockcast_purchasing::PurchaseOrderLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    since: Option<NaiveDate>,
}

impl HistoryWindow {
    /// Window of `months` full months plus the current one; `0` disables it.
    pub fn months_back(today: NaiveDate, months: u32) -> Self {
        Self {
            since: (months > 0).then(|| months_before(today, months)),
        }
    }

    pub fn unbounded() -> Self {
        Self { since: None }
    }

    pub fn since(&self) -> Option<NaiveDate> {
        self.since
    }

    fn admits(&self, date: NaiveDate) -> bool {
        self.since.is_none_or(|since| date >= since)
    }

    pub fn clean_consumption(&self, records: Vec<ConsumptionRecord>) -> Vec<ConsumptionRecord> {
        let before = records.len();
        let kept: Vec<ConsumptionRecord> = records
            .into_iter()
            .filter(|r| coerce_date(&r.request_date).is_some_and(|d| self.admits(d)))
            .collect();
        if kept.len() < before {
            warn!(
                dropped = before - kept.len(),
                since = ?self.since,
                "consumption rows dropped (unreadable date or outside history window)"
            );
        }
        kept
    }

    /// Lines without a readable posting date are dropped while the window is active.
    pub fn clean_purchase_orders(&self, lines: Vec<PurchaseOrderLine>) -> Vec<PurchaseOrderLine> {
        if self.since.is_none() {
            return lines;
        }
        let before = lines.len();
        let kept: Vec<PurchaseOrderLine> = lines
            .into_iter()
            .filter(|l| {
                l.posting_date
                    .as_deref()
                    .and_then(coerce_date)
                    .is_some_and(|d| self.admits(d))
            })
            .collect();
        if kept.len() < before {
            warn!(
                dropped = before - kept.len(),
                since = ?self.since,
                "purchase-order lines dropped (unreadable posting date or outside history window)"
            );
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn window_starts_on_first_day_of_month() {
        let window = HistoryWindow::months_back(d(2024, 5, 17), 4);
        assert_eq!(window.since(), Some(d(2024, 1, 1)));
        assert_eq!(HistoryWindow::months_back(d(2024, 5, 17), 0).since(), None);
    }

    #[test]
    fn consumption_outside_window_or_undated_is_dropped() {
        let window = HistoryWindow::months_back(d(2024, 5, 17), 4);
        let rows = vec![
            ConsumptionRecord::new("A", "W", "2023-12-31", "1"),
            ConsumptionRecord::new("A", "W", "2024-01-01", "2"),
            ConsumptionRecord::new("A", "W", "garbage", "3"),
            ConsumptionRecord::new("A", "W", "2024-05-16 10:00:00", "4"),
        ];

        let kept = window.clean_consumption(rows);

        let qty: Vec<&str> = kept.iter().map(|r| r.quantity.as_str()).collect();
        assert_eq!(qty, vec!["2", "4"]);
    }

    #[test]
    fn unbounded_window_still_drops_undated_consumption() {
        let rows = vec![
            ConsumptionRecord::new("A", "W", "1999-01-01", "1"),
            ConsumptionRecord::new("A", "W", "", "2"),
        ];
        let kept = HistoryWindow::unbounded().clean_consumption(rows);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn purchase_orders_filter_on_posting_date() {
        let window = HistoryWindow::months_back(d(2024, 5, 17), 4);
        let lines = vec![
            PurchaseOrderLine::new("A", "PO-1", "2024-06-01", "1").with_posting_date("2023-11-20"),
            PurchaseOrderLine::new("A", "PO-2", "2024-06-01", "1").with_posting_date("2024-02-03"),
            PurchaseOrderLine::new("A", "PO-3", "2024-06-01", "1"),
        ];

        let kept = window.clean_purchase_orders(lines.clone());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].document_number, "PO-2");

        assert_eq!(HistoryWindow::unbounded().clean_purchase_orders(lines).len(), 3);
    }
}
