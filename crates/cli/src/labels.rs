//! Month labels for display. The engine only ever deals in month-start dates.

use chrono::{Datelike, NaiveDate};

pub trait MonthLabeler {
    /// Name of month `month` (1 = January).
    fn month_name(&self, month: u32) -> &'static str;

    /// e.g. `Mayo 2024`.
    fn label(&self, date: NaiveDate) -> String {
        format!("{} {}", self.month_name(date.month()), date.year())
    }

    /// e.g. `2024-05 (Mayo)`, used in the month-end table.
    fn period_label(&self, date: NaiveDate) -> String {
        format!("{} ({})", date.format("%Y-%m"), self.month_name(date.month()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpanishMonthLabeler;

const SPANISH_MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

impl MonthLabeler for SpanishMonthLabeler {
    fn month_name(&self, month: u32) -> &'static str {
        month
            .checked_sub(1)
            .and_then(|i| SPANISH_MONTHS.get(i as usize))
            .copied()
            .unwrap_or("?")
    }
}
