//! Infrastructure layer: table loading, SKU aliases, loader configuration.
//!
//! The projection engine never reaches into this crate; callers load an
//! [`InputTables`](stockcast_planning::InputTables) value here and hand it over.

pub mod aliases;
pub mod cleaning;
pub mod config;
pub mod error;
pub mod source;

pub use aliases::SkuAliasTable;
pub use cleaning::HistoryWindow;
pub use config::LoaderConfig;
pub use error::LoadError;
pub use source::{CachedTableSource, CsvTableSource, InMemoryTableSource, TableSource, read_records};
