//! Loader configuration.
//!
//! Read from the environment with defaults that match the ERP export names.
//! Relative file names resolve against the data directory.

use std::path::{Path, PathBuf};

use crate::error::LoadError;

pub const ENV_DATA_DIR: &str = "STOCKCAST_DATA_DIR";
pub const ENV_STOCK_FILE: &str = "STOCKCAST_STOCK_FILE";
pub const ENV_CONSUMPTION_FILE: &str = "STOCKCAST_CONSUMPTION_FILE";
pub const ENV_PURCHASE_ORDERS_FILE: &str = "STOCKCAST_PURCHASE_ORDERS_FILE";
pub const ENV_HISTORY_MONTHS: &str = "STOCKCAST_HISTORY_MONTHS";

pub const DEFAULT_STOCK_FILE: &str = "Stock.csv";
pub const DEFAULT_CONSUMPTION_FILE: &str = "ST_OWTR.csv";
pub const DEFAULT_PURCHASE_ORDERS_FILE: &str = "OPOR.csv";
pub const DEFAULT_HISTORY_MONTHS: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub data_dir: PathBuf,
    pub stock_file: PathBuf,
    pub consumption_file: PathBuf,
    pub purchase_orders_file: PathBuf,
    /// Months of history kept before the load date; 0 keeps everything.
    pub history_months: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            stock_file: PathBuf::from(DEFAULT_STOCK_FILE),
            consumption_file: PathBuf::from(DEFAULT_CONSUMPTION_FILE),
            purchase_orders_file: PathBuf::from(DEFAULT_PURCHASE_ORDERS_FILE),
            history_months: DEFAULT_HISTORY_MONTHS,
        }
    }
}

impl LoaderConfig {
    /// Build from process environment variables.
    pub fn from_env() -> Result<Self, LoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests inject a map here).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(dir) = lookup(ENV_DATA_DIR) {
            cfg.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup(ENV_STOCK_FILE) {
            cfg.stock_file = PathBuf::from(file);
        }
        if let Some(file) = lookup(ENV_CONSUMPTION_FILE) {
            cfg.consumption_file = PathBuf::from(file);
        }
        if let Some(file) = lookup(ENV_PURCHASE_ORDERS_FILE) {
            cfg.purchase_orders_file = PathBuf::from(file);
        }
        if let Some(raw) = lookup(ENV_HISTORY_MONTHS) {
            cfg.history_months = raw.trim().parse().map_err(|_| {
                LoadError::Config(format!(
                    "{ENV_HISTORY_MONTHS} must be a non-negative integer, got {raw:?}"
                ))
            })?;
        }

        Ok(cfg)
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_history_months(mut self, months: u32) -> Self {
        self.history_months = months;
        self
    }

    pub fn stock_path(&self) -> PathBuf {
        self.resolve(&self.stock_file)
    }

    pub fn consumption_path(&self) -> PathBuf {
        self.resolve(&self.consumption_file)
    }

    pub fn purchase_orders_path(&self) -> PathBuf {
        self.resolve(&self.purchase_orders_file)
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }
}
