//! Day-by-day inventory projection for one SKU.
//!
//! Model:
//! - Opening stock = sum of the SKU's stock rows at the warehouse.
//! - Each day: record the opening level, receive scheduled arrivals, consume.
//! - Consumption and stock are floored at zero (no backorders).
//!
//! Safety stock and reorder point are derived once from the demand estimate
//! before the day loop runs.

use chrono::{Days, Local, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use stockcast_core::calendar::next_month_start;
use stockcast_core::{Sku, ValueObject, WarehouseCode, month_start};
use stockcast_inventory::{
    ConsumptionRecord, DemandEstimate, RecentMonths, StockRecord, consumption_for, estimate_demand,
    initial_stock,
};
use stockcast_purchasing::{
    ArrivalDetail, ArrivalSchedule, PurchaseOrderLine, build_arrival_schedule,
};

use crate::parameters::{DemandDraw, ProjectionParameters};

/// What to project: one SKU, the warehouse holding its stock, the warehouse
/// its consumption is booked to, and the first simulated day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub sku: Sku,
    pub warehouse_code: WarehouseCode,
    pub consumption_warehouse: WarehouseCode,
    pub today: NaiveDate,
    pub parameters: ProjectionParameters,
}

impl SimulationRequest {
    /// Request starting on the local calendar date.
    pub fn new(
        sku: Sku,
        warehouse_code: WarehouseCode,
        consumption_warehouse: WarehouseCode,
        parameters: ProjectionParameters,
    ) -> Self {
        Self {
            sku,
            warehouse_code,
            consumption_warehouse,
            today: Local::now().date_naive(),
            parameters,
        }
    }

    /// Pin the first simulated day (tests, replays).
    pub fn on(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

/// Lead-time statistics derived from daily demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadTimeStatistics {
    pub demand_during_lead_time: f64,
    pub std_during_lead_time: f64,
    pub safety_stock: f64,
    pub reorder_point: f64,
}

impl ValueObject for LeadTimeStatistics {}

impl LeadTimeStatistics {
    pub fn compute(daily_mean: f64, daily_std: f64, lead_time_days: u32, service_level_z: f64) -> Self {
        let lead_time = f64::from(lead_time_days);
        let demand_during_lead_time = daily_mean * lead_time;
        let std_during_lead_time = daily_std * lead_time.sqrt();
        let safety_stock = service_level_z * std_during_lead_time;
        Self {
            demand_during_lead_time,
            std_during_lead_time,
            safety_stock,
            reorder_point: demand_during_lead_time + safety_stock,
        }
    }
}

/// Headline figures of a projection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub initial_stock: f64,
    pub monthly_demand_mean: f64,
    pub monthly_demand_std: f64,
    pub daily_demand_mean: f64,
    pub daily_demand_std: f64,
    pub demand_during_lead_time: f64,
    pub std_during_lead_time: f64,
    pub safety_stock: f64,
    pub reorder_point: f64,
    /// Distinct delivery dates with pending arrivals.
    pub pending_arrival_count: usize,
    pub recent_months: RecentMonths,
}

impl ValueObject for Metrics {}

/// Opening-of-day inventory level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub date: NaiveDate,
    pub inventory_level: f64,
}

/// Last simulated level of a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthEndLevel {
    pub month_start: NaiveDate,
    /// Calendar last day of the month (the label, even if the horizon ends earlier).
    pub month_end: NaiveDate,
    pub inventory_level: f64,
}

impl ValueObject for MonthEndLevel {}

/// Chronological opening levels, one per simulated day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationTrajectory(Vec<TrajectoryPoint>);

impl SimulationTrajectory {
    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.0
    }

    pub fn levels(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.inventory_level).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First day that opens with no stock.
    pub fn first_stockout(&self) -> Option<NaiveDate> {
        self.0
            .iter()
            .find(|p| p.inventory_level <= 0.0)
            .map(|p| p.date)
    }

    /// One row per calendar month holding the month's last simulated level.
    pub fn month_end_levels(&self) -> Vec<MonthEndLevel> {
        let mut out: Vec<MonthEndLevel> = Vec::new();
        for point in &self.0 {
            let start = month_start(point.date);
            match out.last_mut() {
                Some(last) if last.month_start == start => last.inventory_level = point.inventory_level,
                _ => out.push(MonthEndLevel {
                    month_start: start,
                    month_end: next_month_start(start)
                        .and_then(|next| next.pred_opt())
                        .unwrap_or(point.date),
                    inventory_level: point.inventory_level,
                }),
            }
        }
        out
    }
}

/// Everything a projection run hands to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub trajectory: SimulationTrajectory,
    pub metrics: Metrics,
    pub arrival_schedule: ArrivalSchedule,
    pub arrival_detail: ArrivalDetail,
}

/// Run the projection for `request` over the raw tables.
///
/// Never fails: empty filters yield zero defaults and unreadable cells are
/// treated as missing.
pub fn run_inventory_simulation(
    request: &SimulationRequest,
    stock: &[StockRecord],
    consumption: &[ConsumptionRecord],
    purchase_orders: &[PurchaseOrderLine],
) -> SimulationOutcome {
    let params = &request.parameters;

    let opening = initial_stock(stock, &request.sku, &request.warehouse_code);
    let demand = estimate_demand(
        consumption_for(consumption, &request.sku, &request.consumption_warehouse),
        request.today,
    );
    let stats = LeadTimeStatistics::compute(
        demand.daily_mean,
        demand.daily_std,
        params.lead_time_days(),
        params.service_level_z(),
    );

    debug!(
        sku = %request.sku,
        complete_months = demand.complete_months,
        daily_mean = demand.daily_mean,
        daily_std = demand.daily_std,
        safety_stock = stats.safety_stock,
        reorder_point = stats.reorder_point,
        "derived demand statistics"
    );

    let pending = build_arrival_schedule(purchase_orders, &request.sku, request.today);

    let trajectory = simulate_trajectory(opening, &demand, &pending.schedule, request.today, params);

    let metrics = Metrics {
        initial_stock: opening,
        monthly_demand_mean: demand.monthly_mean,
        monthly_demand_std: demand.monthly_std,
        daily_demand_mean: demand.daily_mean,
        daily_demand_std: demand.daily_std,
        demand_during_lead_time: stats.demand_during_lead_time,
        std_during_lead_time: stats.std_during_lead_time,
        safety_stock: stats.safety_stock,
        reorder_point: stats.reorder_point,
        pending_arrival_count: pending.schedule.len(),
        recent_months: demand.recent_months,
    };

    info!(
        sku = %request.sku,
        warehouse = %request.warehouse_code,
        days = trajectory.len(),
        initial_stock = opening,
        pending_arrivals = metrics.pending_arrival_count,
        "inventory projection complete"
    );

    SimulationOutcome {
        trajectory,
        metrics,
        arrival_schedule: pending.schedule,
        arrival_detail: pending.detail,
    }
}

/// Step the inventory day by day from `initial_stock`.
pub fn simulate_trajectory(
    initial_stock: f64,
    demand: &DemandEstimate,
    arrivals: &ArrivalSchedule,
    today: NaiveDate,
    params: &ProjectionParameters,
) -> SimulationTrajectory {
    let mut draw = ConsumptionDraw::new(demand.daily_mean, demand.daily_std, params.demand_draw());
    let mut inventory_level = initial_stock.max(0.0);
    let mut points = Vec::with_capacity(params.simulation_days() as usize);

    for day in 0..params.simulation_days() {
        let Some(current_date) = today.checked_add_days(Days::new(u64::from(day))) else {
            break;
        };

        points.push(TrajectoryPoint {
            date: current_date,
            inventory_level,
        });

        inventory_level += arrivals.quantity_on(current_date);
        let consumption = draw.next().max(0.0);
        inventory_level = (inventory_level - consumption).max(0.0);
    }

    SimulationTrajectory(points)
}

/// Source of daily consumption values.
enum ConsumptionDraw {
    Fixed(f64),
    Normal { dist: Normal<f64>, rng: StdRng },
}

impl ConsumptionDraw {
    fn new(daily_mean: f64, daily_std: f64, mode: DemandDraw) -> Self {
        // Without spread there is nothing to draw.
        if daily_std <= 0.0 {
            return Self::Fixed(daily_mean);
        }
        match mode {
            DemandDraw::Deterministic => Self::Fixed(daily_mean),
            DemandDraw::Stochastic { seed } => match Normal::new(daily_mean, daily_std) {
                Ok(dist) => {
                    let rng = match seed {
                        Some(seed) => StdRng::seed_from_u64(seed),
                        None => StdRng::from_entropy(),
                    };
                    Self::Normal { dist, rng }
                }
                Err(_) => Self::Fixed(daily_mean),
            },
        }
    }

    fn next(&mut self) -> f64 {
        match self {
            ConsumptionDraw::Fixed(v) => *v,
            ConsumptionDraw::Normal { dist, rng } => dist.sample(rng),
        }
    }
}
