//! Table sources: where the three input tables come from.
//!
//! `CsvTableSource` reads the ERP exports from disk, applies load-time
//! cleaning and the alias table. `CachedTableSource` wraps any source so the
//! tables are loaded once and shared for the rest of the process.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::sync::{Arc, OnceLock};

use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use stockcast_planning::InputTables;

use crate::aliases::SkuAliasTable;
use crate::cleaning::HistoryWindow;
use crate::config::LoaderConfig;
use crate::error::LoadError;

/// Anything that can produce the immutable input tables.
pub trait TableSource {
    fn load(&self) -> Result<Arc<InputTables>, LoadError>;
}

/// Deserialize every row of a headed CSV stream.
///
/// Cells are trimmed; columns the record type does not name are ignored.
pub fn read_records<T, R>(reader: R, source_name: &str) -> Result<Vec<T>, LoadError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.deserialize() {
        let record: T = result.map_err(|source| LoadError::Csv {
            source_name: source_name.to_string(),
            line: source.position().map(|p| p.line()).unwrap_or(0),
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

fn read_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::MissingInputFile {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let records = read_records(file, &path.display().to_string())?;
    debug!(path = %path.display(), rows = records.len(), "read input file");
    Ok(records)
}

/// The three ERP CSV exports on disk.
#[derive(Debug, Clone)]
pub struct CsvTableSource {
    config: LoaderConfig,
    aliases: SkuAliasTable,
    today: NaiveDate,
}

impl CsvTableSource {
    /// Uses the production alias table and the local date for the history window.
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            aliases: SkuAliasTable::production(),
            today: Local::now().date_naive(),
        }
    }

    pub fn with_aliases(mut self, aliases: SkuAliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    /// Pin the date the history window is measured from.
    pub fn as_of(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }
}

impl TableSource for CsvTableSource {
    fn load(&self) -> Result<Arc<InputTables>, LoadError> {
        let stock = read_file(&self.config.stock_path())?;
        let consumption = read_file(&self.config.consumption_path())?;
        let purchase_orders = read_file(&self.config.purchase_orders_path())?;

        let window = HistoryWindow::months_back(self.today, self.config.history_months);
        let mut consumption = window.clean_consumption(consumption);
        let purchase_orders = window.clean_purchase_orders(purchase_orders);
        let rewritten = self.aliases.apply_to_consumption(&mut consumption);

        let tables = InputTables::new(stock, consumption, purchase_orders);
        info!(
            data_dir = %self.config.data_dir.display(),
            since = ?window.since(),
            stock_rows = tables.stock.len(),
            consumption_rows = tables.consumption.len(),
            purchase_order_lines = tables.purchase_orders.len(),
            aliased_rows = rewritten,
            "input tables loaded"
        );
        Ok(Arc::new(tables))
    }
}

/// Tables already in memory, handed out as-is.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTableSource {
    tables: Arc<InputTables>,
}

impl InMemoryTableSource {
    pub fn new(tables: InputTables) -> Self {
        Self {
            tables: Arc::new(tables),
        }
    }
}

impl TableSource for InMemoryTableSource {
    fn load(&self) -> Result<Arc<InputTables>, LoadError> {
        Ok(Arc::clone(&self.tables))
    }
}

/// Loads from the inner source on first use, then serves the same tables.
///
/// A failed load is not cached; the next call retries.
#[derive(Debug)]
pub struct CachedTableSource<S> {
    inner: S,
    cell: OnceLock<Arc<InputTables>>,
}

impl<S: TableSource> CachedTableSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cell: OnceLock::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<S: TableSource> TableSource for CachedTableSource<S> {
    fn load(&self) -> Result<Arc<InputTables>, LoadError> {
        if let Some(tables) = self.cell.get() {
            return Ok(Arc::clone(tables));
        }
        let tables = self.inner.load()?;
        // A concurrent caller may have won the race; keep whichever landed first.
        Ok(Arc::clone(self.cell.get_or_init(|| tables)))
    }
}
