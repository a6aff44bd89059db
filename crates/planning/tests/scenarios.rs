use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use stockcast_core::{Sku, WarehouseCode};
use stockcast_inventory::{ConsumptionRecord, StockRecord};
use stockcast_planning::{
    ProjectionParameters, RecommendationStatus, SimulationRequest, calculate_order_recommendation,
    run_inventory_simulation,
};
use stockcast_purchasing::PurchaseOrderLine;

const SKU: &str = "EXI-009231";
const STOCK_WH: &str = "B01";
const CONS_WH: &str = "OBRA";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
}

fn request(days: u32, lead_time: u32, z: f64) -> SimulationRequest {
    SimulationRequest::new(
        Sku::new(SKU),
        WarehouseCode::new(STOCK_WH),
        WarehouseCode::new(CONS_WH),
        ProjectionParameters::new(days, lead_time, z).unwrap(),
    )
    .on(today())
}

/// Two complete months of 152.1875 units each: exactly 5 units/day, no spread.
fn five_per_day_history() -> Vec<ConsumptionRecord> {
    vec![
        ConsumptionRecord::new(SKU, CONS_WH, "2024-03-04", "152.1875"),
        ConsumptionRecord::new(SKU, CONS_WH, "2024-04-22", "152.1875"),
    ]
}

fn stock(qty: &str) -> Vec<StockRecord> {
    vec![StockRecord::new(SKU, STOCK_WH, qty)]
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[test]
fn scenario_a_steady_consumption_without_arrivals() {
    let outcome = run_inventory_simulation(
        &request(5, 10, 1.65),
        &stock("100"),
        &five_per_day_history(),
        &[],
    );

    assert_eq!(outcome.trajectory.levels(), vec![100.0, 95.0, 90.0, 85.0, 80.0]);
    assert_eq!(outcome.metrics.daily_demand_mean, 5.0);
    assert_eq!(outcome.metrics.safety_stock, 0.0);
    assert_eq!(outcome.metrics.reorder_point, 50.0);
    assert_eq!(outcome.metrics.pending_arrival_count, 0);
}

#[test]
fn scenario_b_arrival_lands_before_that_days_consumption() {
    let arrival_day = today() + Days::new(2);
    let pos = vec![PurchaseOrderLine::new(SKU, "PO-77", iso(arrival_day), "20")];

    let outcome = run_inventory_simulation(
        &request(5, 10, 1.65),
        &stock("100"),
        &five_per_day_history(),
        &pos,
    );

    assert_eq!(outcome.trajectory.levels(), vec![100.0, 95.0, 110.0, 105.0, 100.0]);
    assert_eq!(outcome.metrics.pending_arrival_count, 1);
    assert_eq!(outcome.arrival_detail.len(), 1);
}

#[test]
fn scenario_c_three_complete_months() {
    let history = vec![
        ConsumptionRecord::new(SKU, CONS_WH, "2024-02-05", "300"),
        ConsumptionRecord::new(SKU, CONS_WH, "2024-03-05", "330"),
        ConsumptionRecord::new(SKU, CONS_WH, "2024-04-05", "270"),
    ];

    let outcome = run_inventory_simulation(&request(10, 10, 1.65), &stock("0"), &history, &[]);
    let m = outcome.metrics;

    assert!((m.monthly_demand_mean - 300.0).abs() < 1e-9);
    assert!((m.monthly_demand_std - 30.0).abs() < 1e-9);
    assert!((m.daily_demand_mean - 9.857).abs() < 1e-3);
    assert!((m.daily_demand_std - 30.0 / 30.4375f64.sqrt()).abs() < 1e-9);
    assert!((m.daily_demand_std - 5.438).abs() < 1e-3);
    assert_eq!(m.recent_months.one_back.quantity, 270.0);
    assert_eq!(m.recent_months.three_back.quantity, 300.0);
    assert_eq!(m.recent_months.current.quantity, 0.0);
}

#[test]
fn scenario_d_below_reorder_point_but_over_target_warns() {
    // Lead time (60d) longer than a month pushes the ROP above the target level.
    let outcome = run_inventory_simulation(
        &request(5, 60, 1.65),
        &stock("200"),
        &five_per_day_history(),
        &[],
    );
    let rec = calculate_order_recommendation(&outcome.metrics, &outcome.arrival_schedule);

    assert_eq!(rec.reorder_point, 300.0);
    assert_eq!(rec.inventory_position, 200.0);
    assert!(rec.target_stock_level <= rec.inventory_position);
    assert!(rec.below_reorder_point);
    assert_eq!(rec.suggested_order_quantity, 0.0);
    assert_eq!(rec.status, RecommendationStatus::Warning);
}

#[test]
fn scenario_e_unknown_sku_runs_on_zero_defaults() {
    let outcome = run_inventory_simulation(&request(7, 10, 1.65), &[], &[], &[]);
    let rec = calculate_order_recommendation(&outcome.metrics, &outcome.arrival_schedule);

    assert_eq!(outcome.metrics.initial_stock, 0.0);
    assert_eq!(outcome.metrics.monthly_demand_mean, 0.0);
    assert_eq!(outcome.metrics.reorder_point, 0.0);
    assert_eq!(outcome.trajectory.levels(), vec![0.0; 7]);

    // 0 <= 0 is a tie, which counts as below the reorder point.
    assert!(rec.below_reorder_point);
    assert_eq!(rec.suggested_order_quantity, 0.0);
    assert_eq!(rec.status, RecommendationStatus::Warning);
}

#[test]
fn negative_opening_stock_floors_the_trajectory_but_not_the_position() {
    let pos = vec![PurchaseOrderLine::new(SKU, "PO-9", iso(today() + Days::new(1)), "10")];

    let outcome = run_inventory_simulation(&request(3, 10, 1.65), &stock("-30"), &[], &pos);
    let rec = calculate_order_recommendation(&outcome.metrics, &outcome.arrival_schedule);

    assert_eq!(outcome.trajectory.levels(), vec![0.0, 0.0, 10.0]);
    assert_eq!(outcome.metrics.initial_stock, -30.0);
    // The raw backlog still counts against the position, so the order covers it.
    assert_eq!(rec.inventory_position, -20.0);
    assert_eq!(rec.target_stock_level, 0.0);
    assert_eq!(rec.suggested_order_quantity, 20.0);
    assert_eq!(rec.status, RecommendationStatus::Success);
}

#[test]
fn past_and_foreign_lines_never_reach_the_schedule() {
    let pos = vec![
        PurchaseOrderLine::new(SKU, "PO-1", iso(today() - Days::new(1)), "50"),
        PurchaseOrderLine::new("EXI-000001", "PO-2", iso(today() + Days::new(1)), "50"),
        PurchaseOrderLine::new(SKU, "PO-3", iso(today() + Days::new(40)), "15"),
    ];

    let outcome = run_inventory_simulation(&request(5, 10, 1.65), &stock("10"), &[], &pos);
    let rec = calculate_order_recommendation(&outcome.metrics, &outcome.arrival_schedule);

    assert_eq!(outcome.arrival_schedule.total(), 15.0);
    // Beyond the horizon, yet still on order.
    assert_eq!(rec.inventory_position, 25.0);
}

#[test]
fn repeated_runs_are_identical() {
    let pos = vec![PurchaseOrderLine::new(SKU, "PO-1", iso(today() + Days::new(3)), "12")];
    let req = request(45, 14, 2.05);

    let a = run_inventory_simulation(&req, &stock("80"), &five_per_day_history(), &pos);
    let b = run_inventory_simulation(&req, &stock("80"), &five_per_day_history(), &pos);

    assert_eq!(a, b);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Property: N days in, N consecutive dates out starting today, never negative.
    #[test]
    fn trajectory_shape_and_floor(
        days in 1u32..200,
        opening in -50i64..500,
        monthly in prop::collection::vec(0u32..2_000, 0..6),
        arrivals in prop::collection::vec((0u64..200, 1u32..300), 0..10),
    ) {
        let history: Vec<ConsumptionRecord> = monthly
            .iter()
            .enumerate()
            .map(|(i, qty)| {
                let month = stockcast_core::months_before(today(), i as u32 + 1);
                ConsumptionRecord::new(SKU, CONS_WH, iso(month), qty.to_string())
            })
            .collect();
        let pos: Vec<PurchaseOrderLine> = arrivals
            .iter()
            .map(|(offset, qty)| {
                PurchaseOrderLine::new(SKU, "PO", iso(today() + Days::new(*offset)), qty.to_string())
            })
            .collect();

        let outcome = run_inventory_simulation(
            &request(days, 10, 1.65),
            &stock(&opening.to_string()),
            &history,
            &pos,
        );
        let points = outcome.trajectory.points();

        prop_assert_eq!(points.len(), days as usize);
        prop_assert_eq!(points[0].date, today());
        for pair in points.windows(2) {
            prop_assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
        prop_assert!(points.iter().all(|p| p.inventory_level >= 0.0));
    }

    /// Property: safety stock is linear in z and grows with sqrt(lead time).
    #[test]
    fn safety_stock_scaling(
        z in 0.5f64..3.0,
        lead_time in 1u32..60,
        spread in 1u32..200,
    ) {
        let history = vec![
            ConsumptionRecord::new(SKU, CONS_WH, "2024-02-05", (300 + spread).to_string()),
            ConsumptionRecord::new(SKU, CONS_WH, "2024-03-05", "300"),
            ConsumptionRecord::new(SKU, CONS_WH, "2024-04-05", (300 - spread.min(300)).to_string()),
        ];

        let base = run_inventory_simulation(&request(1, lead_time, z), &[], &history, &[]).metrics;
        let double_z = run_inventory_simulation(&request(1, lead_time, 2.0 * z), &[], &history, &[]).metrics;
        let quad_lt = run_inventory_simulation(&request(1, lead_time * 4, z), &[], &history, &[]).metrics;

        prop_assert!((double_z.safety_stock - 2.0 * base.safety_stock).abs() < 1e-9);
        prop_assert!((quad_lt.safety_stock - 2.0 * base.safety_stock).abs() < 1e-9);
        prop_assert!((base.reorder_point - base.demand_during_lead_time - base.safety_stock).abs() < 1e-9);
    }
}
