//! Command-line arguments.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{ArgAction, Parser, ValueEnum};

use stockcast_core::{DomainResult, Sku, WarehouseCode};
use stockcast_infra::LoaderConfig;
use stockcast_planning::{DemandDraw, ProjectionParameters, ServiceLevel};

pub const DEFAULT_SIMULATION_DAYS: u32 = 90;
pub const DEFAULT_LEAD_TIME_DAYS: u32 = 30;
pub const DEFAULT_SERVICE_LEVEL: ServiceLevel = ServiceLevel::P95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "stockcast",
    about = "Project daily inventory for one SKU and recommend a replenishment order",
    version
)]
pub struct Cli {
    /// Item code to project.
    #[arg(
        long,
        env = "STOCKCAST_SKU",
        value_parser = Sku::from_str,
        required_unless_present = "list_skus"
    )]
    pub sku: Option<Sku>,

    /// Warehouse whose available stock is the opening level.
    #[arg(
        long,
        env = "STOCKCAST_WAREHOUSE",
        value_parser = WarehouseCode::from_str,
        required_unless_present = "list_skus"
    )]
    pub warehouse: Option<WarehouseCode>,

    /// Destination warehouse whose transfer requests count as consumption.
    #[arg(
        long,
        env = "STOCKCAST_CONSUMPTION_WAREHOUSE",
        value_parser = WarehouseCode::from_str,
        required_unless_present = "list_skus"
    )]
    pub consumption_warehouse: Option<WarehouseCode>,

    /// Print every known SKU with its item name and exit.
    #[arg(long, action = ArgAction::SetTrue)]
    pub list_skus: bool,

    /// Projection horizon in days.
    #[arg(long, default_value_t = DEFAULT_SIMULATION_DAYS)]
    pub days: u32,

    /// Supplier lead time in days.
    #[arg(long, default_value_t = DEFAULT_LEAD_TIME_DAYS)]
    pub lead_time: u32,

    /// Service-level preset (90, 95, 98 or 99).
    #[arg(long, conflicts_with = "z")]
    pub service_level: Option<ServiceLevel>,

    /// Explicit service-level z value.
    #[arg(long)]
    pub z: Option<f64>,

    /// Directory holding the CSV exports (overrides STOCKCAST_DATA_DIR).
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Months of history to load; 0 loads everything (overrides STOCKCAST_HISTORY_MONTHS).
    #[arg(long)]
    pub history_months: Option<u32>,

    /// Draw daily consumption from a normal distribution instead of the mean.
    #[arg(long, action = ArgAction::SetTrue)]
    pub stochastic: bool,

    /// Seed for the stochastic draw.
    #[arg(long, requires = "stochastic")]
    pub seed: Option<u64>,

    /// Start date of the projection (defaults to today).
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Cli {
    pub fn service_level_z(&self) -> f64 {
        match (self.z, self.service_level) {
            (Some(z), _) => z,
            (None, Some(level)) => level.z(),
            (None, None) => DEFAULT_SERVICE_LEVEL.z(),
        }
    }

    pub fn demand_draw(&self) -> DemandDraw {
        if self.stochastic {
            DemandDraw::Stochastic { seed: self.seed }
        } else {
            DemandDraw::Deterministic
        }
    }

    pub fn parameters(&self) -> DomainResult<ProjectionParameters> {
        Ok(
            ProjectionParameters::new(self.days, self.lead_time, self.service_level_z())?
                .with_demand_draw(self.demand_draw()),
        )
    }

    /// The (sku, stock warehouse, consumption warehouse) triple of a projection run.
    pub fn target(&self) -> Option<(Sku, WarehouseCode, WarehouseCode)> {
        Some((
            self.sku.clone()?,
            self.warehouse.clone()?,
            self.consumption_warehouse.clone()?,
        ))
    }

    /// Apply flag overrides on top of the environment-derived loader config.
    pub fn loader_config(&self, mut config: LoaderConfig) -> LoaderConfig {
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(months) = self.history_months {
            config = config.with_history_months(months);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Result<Cli, clap::Error> {
        let mut argv = vec![
            "stockcast",
            "--sku",
            "EXI-009231",
            "--warehouse",
            "B01",
            "--consumption-warehouse",
            "OBRA",
        ];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv)
    }

    #[test]
    fn defaults_match_the_usual_run() {
        let cli = parse(&[]).unwrap();
        let params = cli.parameters().unwrap();

        assert_eq!(params.simulation_days(), 90);
        assert_eq!(params.lead_time_days(), 30);
        assert_eq!(params.service_level_z(), 1.65);
        assert_eq!(params.demand_draw(), DemandDraw::Deterministic);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn service_level_preset_and_explicit_z() {
        let preset = parse(&["--service-level", "99%"]).unwrap();
        assert_eq!(preset.service_level_z(), 2.33);

        let explicit = parse(&["--z", "1.1"]).unwrap();
        assert_eq!(explicit.service_level_z(), 1.1);

        assert!(parse(&["--service-level", "95", "--z", "2"]).is_err());
        assert!(parse(&["--service-level", "97"]).is_err());
    }

    #[test]
    fn blank_codes_are_rejected_at_parse_time() {
        let err = Cli::try_parse_from([
            "stockcast",
            "--sku",
            "  ",
            "--warehouse",
            "B01",
            "--consumption-warehouse",
            "OBRA",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn padded_codes_are_trimmed() {
        let cli = Cli::try_parse_from([
            "stockcast",
            "--sku",
            " EXI-009231 ",
            "--warehouse",
            "B01 ",
            "--consumption-warehouse",
            " OBRA",
        ])
        .unwrap();

        let (sku, warehouse, consumption) = cli.target().unwrap();
        assert_eq!(sku.as_str(), "EXI-009231");
        assert_eq!(warehouse.as_str(), "B01");
        assert_eq!(consumption.as_str(), "OBRA");
    }

    #[test]
    fn blank_warehouse_is_rejected() {
        let err = Cli::try_parse_from([
            "stockcast",
            "--sku",
            "EXI-009231",
            "--warehouse",
            " ",
            "--consumption-warehouse",
            "OBRA",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn list_mode_needs_no_codes() {
        let cli = Cli::try_parse_from(["stockcast", "--list-skus"]).unwrap();
        assert!(cli.list_skus);
        assert!(cli.target().is_none());
    }

    #[test]
    fn codes_are_required_outside_list_mode() {
        assert!(Cli::try_parse_from(["stockcast", "--sku", "EXI-009231"]).is_err());
    }

    #[test]
    fn seed_requires_stochastic() {
        assert!(parse(&["--seed", "7"]).is_err());

        let cli = parse(&["--stochastic", "--seed", "7"]).unwrap();
        assert_eq!(cli.demand_draw(), DemandDraw::Stochastic { seed: Some(7) });
    }

    #[test]
    fn invalid_horizon_fails_validation() {
        let cli = parse(&["--days", "0"]).unwrap();
        assert!(cli.parameters().is_err());
    }

    #[test]
    fn flags_override_loader_config() {
        let cli = parse(&["--data-dir", "/srv/exports", "--history-months", "0"]).unwrap();
        let config = cli.loader_config(LoaderConfig::default());

        assert_eq!(config.data_dir, PathBuf::from("/srv/exports"));
        assert_eq!(config.history_months, 0);
    }
}
