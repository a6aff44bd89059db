//! `stockcast-planning`
//!
//! **Responsibility:** the projection engine. Combines on-hand stock, demand
//! statistics and pending arrivals into a day-by-day inventory trajectory,
//! safety-stock / reorder-point figures and an order recommendation.
//!
//! Everything here is synchronous and side-effect free apart from logging:
//! inputs are plain tables supplied by the caller.

pub mod error;
pub mod job;
pub mod parameters;
pub mod policy;
pub mod simulator;
pub mod tables;

pub use error::PlanningError;
pub use job::{PlanningJob, ReplenishmentJob, ReplenishmentReport};
pub use parameters::{DemandDraw, ProjectionParameters, ServiceLevel};
pub use policy::{OrderRecommendation, RecommendationStatus, calculate_order_recommendation};
pub use simulator::{
    LeadTimeStatistics, Metrics, MonthEndLevel, SimulationOutcome, SimulationRequest,
    SimulationTrajectory, TrajectoryPoint, run_inventory_simulation, simulate_trajectory,
};
pub use tables::InputTables;
