//! Inventory domain module: on-hand stock and historical consumption.
//!
//! This crate contains business rules for turning stock snapshots and
//! consumption logs into the inputs of a projection, implemented purely as
//! deterministic domain logic (no IO, no logging, no storage).

pub mod consumption;
pub mod demand;
pub mod stock;

pub use consumption::{ConsumptionRecord, consumption_for};
pub use demand::{DemandEstimate, MonthlyBucket, MonthlyDemand, RecentMonths, estimate_demand};
pub use stock::{StockRecord, initial_stock};
