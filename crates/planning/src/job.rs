use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use stockcast_core::Sku;

use crate::error::PlanningError;
use crate::policy::{OrderRecommendation, RecommendationStatus, calculate_order_recommendation};
use crate::simulator::{MonthEndLevel, SimulationOutcome, SimulationRequest, run_inventory_simulation};
use crate::tables::InputTables;

/// A single-SKU planning unit.
///
/// Jobs are stateless computations over an immutable input snapshot supplied
/// by the caller (a table source, a test fixture). Two jobs never share
/// mutable state, so they can run in any order.
pub trait PlanningJob {
    type Input;
    type Output;

    /// The SKU this job plans for.
    fn sku(&self) -> &Sku;

    /// The input snapshot the job reads.
    fn input(&self) -> &Self::Input;

    /// Execute the job.
    ///
    /// Must not mutate the input.
    fn run(&self) -> Result<Self::Output, PlanningError>;
}

/// Full result of a replenishment run: projection plus order advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplenishmentReport {
    pub request: SimulationRequest,
    pub item_name: Option<String>,
    pub outcome: SimulationOutcome,
    pub recommendation: OrderRecommendation,
    pub month_end: Vec<MonthEndLevel>,
    pub explanation: String,
}

/// Project inventory for one SKU and recommend an order quantity.
#[derive(Debug, Clone)]
pub struct ReplenishmentJob {
    request: SimulationRequest,
    tables: Arc<InputTables>,
}

impl ReplenishmentJob {
    pub fn new(request: SimulationRequest, tables: Arc<InputTables>) -> Self {
        Self { request, tables }
    }

    pub fn request(&self) -> &SimulationRequest {
        &self.request
    }
}

impl PlanningJob for ReplenishmentJob {
    type Input = InputTables;
    type Output = ReplenishmentReport;

    fn sku(&self) -> &Sku {
        &self.request.sku
    }

    fn input(&self) -> &Self::Input {
        &self.tables
    }

    fn run(&self) -> Result<ReplenishmentReport, PlanningError> {
        let request = &self.request;

        for (label, code) in [
            ("sku", request.sku.as_str()),
            ("warehouse_code", request.warehouse_code.as_str()),
            ("consumption_warehouse", request.consumption_warehouse.as_str()),
        ] {
            if code.trim().is_empty() {
                return Err(PlanningError::InvalidInput(format!("{label} cannot be blank")));
            }
        }

        let outcome = run_inventory_simulation(
            request,
            &self.tables.stock,
            &self.tables.consumption,
            &self.tables.purchase_orders,
        );
        let recommendation =
            calculate_order_recommendation(&outcome.metrics, &outcome.arrival_schedule);
        let month_end = outcome.trajectory.month_end_levels();

        let explanation = format!(
            "{}: position {:.0} vs reorder point {:.0} (safety stock {:.0}, lead time {}d, z={}); {}",
            request.sku,
            recommendation.inventory_position,
            recommendation.reorder_point,
            outcome.metrics.safety_stock,
            request.parameters.lead_time_days(),
            request.parameters.service_level_z(),
            match recommendation.status {
                RecommendationStatus::Success => format!(
                    "order {:.0} units to reach target {:.0}",
                    recommendation.suggested_order_quantity, recommendation.target_stock_level
                ),
                RecommendationStatus::Warning => format!(
                    "at or below reorder point but already at or above target {:.0}; no order suggested",
                    recommendation.target_stock_level
                ),
                RecommendationStatus::Info => "no order needed".to_string(),
            }
        );

        info!(
            sku = %request.sku,
            status = %recommendation.status,
            suggested = recommendation.suggested_order_quantity,
            "replenishment job finished"
        );

        Ok(ReplenishmentReport {
            request: request.clone(),
            item_name: self.tables.item_name(&request.sku).map(str::to_string),
            outcome,
            recommendation,
            month_end,
            explanation,
        })
    }
}
