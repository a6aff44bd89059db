//! `stockcast-core`: shared building blocks for the projection engine.
//!
//! This crate contains **pure** primitives (no IO, no logging setup): the error
//! model, strongly-typed codes, cell coercion and month arithmetic.

pub mod calendar;
pub mod coerce;
pub mod error;
pub mod id;
pub mod value_object;

pub use calendar::{AVERAGE_DAYS_PER_MONTH, month_start, months_before};
pub use coerce::{coerce_date, coerce_quantity, sum_quantities};
pub use error::{DomainError, DomainResult};
pub use id::{Sku, WarehouseCode};
pub use value_object::ValueObject;
