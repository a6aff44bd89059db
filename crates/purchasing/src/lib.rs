//! Purchasing domain module: open purchase-order lines and the arrivals they
//! schedule.
//!
//! Implemented purely as deterministic domain logic (no IO, no storage).

pub mod arrivals;
pub mod order_line;

pub use arrivals::{
    ArrivalDetail, ArrivalLine, ArrivalSchedule, PendingArrivals, build_arrival_schedule,
};
pub use order_line::PurchaseOrderLine;
