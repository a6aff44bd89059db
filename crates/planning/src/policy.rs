//! Replenishment policy: reorder point `s`, order-up-to level `S`.
//!
//! - Inventory position = on-hand stock + everything still on order.
//! - `S` = safety stock + one month of average demand.
//! - At or below `s`, order up to `S`.

use serde::{Deserialize, Serialize};

use stockcast_core::ValueObject;
use stockcast_purchasing::ArrivalSchedule;

use crate::simulator::Metrics;

/// Verdict of the policy calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationStatus {
    /// At or below the reorder point with a positive order to place.
    Success,
    /// At or below the reorder point but already at or above the target level.
    Warning,
    /// Above the reorder point; nothing to order.
    Info,
}

impl RecommendationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationStatus::Success => "success",
            RecommendationStatus::Warning => "warning",
            RecommendationStatus::Info => "info",
        }
    }
}

impl core::fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderRecommendation {
    pub inventory_position: f64,
    pub reorder_point: f64,
    pub target_stock_level: f64,
    pub suggested_order_quantity: f64,
    pub below_reorder_point: bool,
    pub status: RecommendationStatus,
}

impl ValueObject for OrderRecommendation {}

/// Decide whether and how much to order. Pure; never fails.
pub fn calculate_order_recommendation(
    metrics: &Metrics,
    arrival_schedule: &ArrivalSchedule,
) -> OrderRecommendation {
    let on_order_stock = arrival_schedule.total();
    let inventory_position = metrics.initial_stock + on_order_stock;
    let target_stock_level = metrics.safety_stock + metrics.monthly_demand_mean;

    // Ties count as below: a position sitting exactly on the ROP must reorder.
    let below_reorder_point = inventory_position <= metrics.reorder_point;

    let (suggested_order_quantity, status) = if below_reorder_point {
        let qty = (target_stock_level - inventory_position).max(0.0);
        let status = if qty > 0.0 {
            RecommendationStatus::Success
        } else {
            RecommendationStatus::Warning
        };
        (qty, status)
    } else {
        (0.0, RecommendationStatus::Info)
    };

    OrderRecommendation {
        inventory_position,
        reorder_point: metrics.reorder_point,
        target_stock_level,
        suggested_order_quantity,
        below_reorder_point,
        status,
    }
}
