//! Text and JSON rendering of a replenishment report.

use std::fmt::Write as _;

use serde::Serialize;

use stockcast_planning::{InputTables, RecommendationStatus, ReplenishmentReport};

use crate::labels::MonthLabeler;

pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Whole units with thousands separators, e.g. `12,345`.
pub fn units(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative { format!("-{grouped}") } else { grouped }
}

/// One `SKU | item name` line per known SKU, sorted by code.
pub fn render_sku_options(tables: &InputTables) -> String {
    let mut out = String::new();
    for sku in tables.known_skus() {
        let name = tables.item_name(&sku).unwrap_or(NAME_NOT_FOUND);
        let _ = writeln!(out, "{sku} | {name}");
    }
    out
}

const NAME_NOT_FOUND: &str = "(name not found)";

pub fn render_text(report: &ReplenishmentReport, labeler: &dyn MonthLabeler) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_text(&mut out, report, labeler);
    out
}

fn write_text(
    out: &mut String,
    report: &ReplenishmentReport,
    labeler: &dyn MonthLabeler,
) -> std::fmt::Result {
    let request = &report.request;
    let params = &request.parameters;
    let metrics = &report.outcome.metrics;
    let rec = &report.recommendation;

    writeln!(
        out,
        "{} | {}",
        request.sku,
        report.item_name.as_deref().unwrap_or(NAME_NOT_FOUND)
    )?;
    writeln!(
        out,
        "Projection from {} over {} days (stock: {}, consumption: {})",
        request.today, params.simulation_days(), request.warehouse_code, request.consumption_warehouse
    )?;

    writeln!(out, "\nKey metrics")?;
    writeln!(out, "  Opening stock (available)  {:>12}", units(metrics.initial_stock))?;
    writeln!(out, "  Monthly demand (mean)      {:>12}", units(metrics.monthly_demand_mean))?;
    writeln!(out, "  Scheduled arrivals         {:>12}", metrics.pending_arrival_count)?;

    writeln!(out, "\nRecent consumption")?;
    for (i, bucket) in metrics.recent_months.as_array().iter().enumerate() {
        let suffix = if i == 0 { " (current)" } else { "" };
        writeln!(
            out,
            "  {:<26} {:>12}",
            format!("{}{}", labeler.label(bucket.month_start), suffix),
            units(bucket.quantity)
        )?;
    }

    writeln!(out, "\nPolicy")?;
    writeln!(out, "  Lead time (days)           {:>12}", params.lead_time_days())?;
    writeln!(
        out,
        "  Safety stock               {:>12}  (z = {})",
        units(metrics.safety_stock),
        params.service_level_z()
    )?;
    writeln!(out, "  Reorder point              {:>12}", units(metrics.reorder_point))?;

    writeln!(out, "\nRecommendation")?;
    writeln!(out, "  Inventory position         {:>12}", units(rec.inventory_position))?;
    writeln!(out, "  Target level (S)           {:>12}", units(rec.target_stock_level))?;
    let verdict = match rec.status {
        RecommendationStatus::Success => format!(
            "order {} units now to return to the target level",
            units(rec.suggested_order_quantity)
        ),
        RecommendationStatus::Warning => format!(
            "position {} is at or below the reorder point but already at or above the target; no new order",
            units(rec.inventory_position)
        ),
        RecommendationStatus::Info => "position is above the reorder point; no order needed".to_string(),
    };
    writeln!(out, "  [{}] {}", rec.status, verdict)?;

    writeln!(out, "\nPending arrivals")?;
    let detail = report.outcome.arrival_detail.sorted_for_display();
    if detail.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for line in detail {
        writeln!(
            out,
            "  {}  {:<12} {:>10}  {}",
            line.delivery_date,
            line.document_number,
            units(line.quantity),
            line.comments
        )?;
    }

    writeln!(out, "\nMonth-end stock")?;
    for row in &report.month_end {
        writeln!(
            out,
            "  {:<24} {:>12}",
            labeler.period_label(row.month_end),
            units(row.inventory_level)
        )?;
    }

    match report.outcome.trajectory.first_stockout() {
        Some(date) => writeln!(out, "\nFirst day without stock: {date}")?,
        None => writeln!(out, "\nNo stockout within the horizon")?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use stockcast_core::{Sku, WarehouseCode};
    use stockcast_inventory::{ConsumptionRecord, StockRecord};
    use stockcast_planning::{
        PlanningJob, ProjectionParameters, ReplenishmentJob, SimulationRequest,
    };
    use stockcast_purchasing::PurchaseOrderLine;

    use super::*;
    use crate::labels::SpanishMonthLabeler;

    fn report() -> ReplenishmentReport {
        let tables = InputTables::new(
            vec![StockRecord::new("EXI-1", "B01", "40").with_item_name("Panel 650W")],
            vec![
                ConsumptionRecord::new("EXI-1", "OBRA", "2024-02-10", "300"),
                ConsumptionRecord::new("EXI-1", "OBRA", "2024-03-10", "330"),
                ConsumptionRecord::new("EXI-1", "OBRA", "2024-04-10", "270"),
            ],
            vec![
                PurchaseOrderLine::new("EXI-1", "4501", "2024-05-20", "1200")
                    .with_comments("barco"),
            ],
        );
        let request = SimulationRequest::new(
            Sku::new("EXI-1"),
            WarehouseCode::new("B01"),
            WarehouseCode::new("OBRA"),
            ProjectionParameters::new(40, 10, 1.65).unwrap(),
        )
        .on(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());

        ReplenishmentJob::new(request, Arc::new(tables)).run().unwrap()
    }

    #[test]
    fn sku_options_list_every_code_once_with_its_name() {
        let tables = InputTables::new(
            vec![
                StockRecord::new("EXI-2", "B01", "1").with_item_name("Bateria 5kWh"),
                StockRecord::new("EXI-2", "B02", "4").with_item_name("Bateria 5kWh"),
            ],
            vec![ConsumptionRecord::new("EXI-1", "OBRA", "2024-04-01", "3")],
            vec![],
        );

        assert_eq!(
            render_sku_options(&tables),
            "EXI-1 | (name not found)\nEXI-2 | Bateria 5kWh\n"
        );
    }

    #[test]
    fn units_group_thousands() {
        assert_eq!(units(0.0), "0");
        assert_eq!(units(999.4), "999");
        assert_eq!(units(1234.5), "1,235");
        assert_eq!(units(1_234_567.0), "1,234,567");
        assert_eq!(units(-4321.0), "-4,321");
        assert_eq!(units(-0.2), "0");
    }

    #[test]
    fn text_report_has_every_section() {
        let text = render_text(&report(), &SpanishMonthLabeler);

        assert!(text.starts_with("EXI-1 | Panel 650W"));
        assert!(text.contains("Mayo 2024 (current)"));
        assert!(text.contains("Abril 2024"));
        assert!(!text.contains("Enero 2024"));
        assert!(text.contains("4501"));
        assert!(text.contains("1,200"));
        assert!(text.contains("barco"));
        assert!(text.contains("2024-05 (Mayo)"));
        assert!(text.contains("2024-06 (Junio)"));
        assert!(text.contains("[info]"));
    }

    #[test]
    fn json_report_round_trips_key_fields() {
        let report = report();
        let json = to_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["item_name"], "Panel 650W");
        assert_eq!(value["recommendation"]["status"], "info");
        assert_eq!(value["outcome"]["trajectory"].as_array().unwrap().len(), 40);
    }
}
