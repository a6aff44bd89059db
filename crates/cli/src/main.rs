//! `stockcast` command-line front end.

mod args;
mod labels;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use stockcast_infra::{CsvTableSource, LoaderConfig, TableSource};
use stockcast_planning::{PlanningJob, ReplenishmentJob, ReplenishmentReport, SimulationRequest};

use crate::args::{Cli, OutputFormat};
use crate::labels::SpanishMonthLabeler;

fn main() -> Result<()> {
    stockcast_observability::init();

    let cli = Cli::parse();
    let source = table_source(&cli)?;

    if cli.list_skus {
        let tables = source.load().context("failed to load input tables")?;
        print!("{}", render::render_sku_options(&tables));
        return Ok(());
    }

    let report = run(&cli, &source)?;

    match cli.format {
        OutputFormat::Json => println!("{}", render::to_json(&report)?),
        OutputFormat::Text => print!("{}", render::render_text(&report, &SpanishMonthLabeler)),
    }

    Ok(())
}

fn table_source(cli: &Cli) -> Result<CsvTableSource> {
    let config = cli.loader_config(
        LoaderConfig::from_env().context("failed to read loader configuration")?,
    );
    let source = CsvTableSource::new(config);
    Ok(match cli.as_of {
        Some(as_of) => source.as_of(as_of),
        None => source,
    })
}

fn run(cli: &Cli, source: &CsvTableSource) -> Result<ReplenishmentReport> {
    let parameters = cli.parameters().context("invalid projection parameters")?;
    let (sku, warehouse, consumption_warehouse) = cli
        .target()
        .context("--sku, --warehouse and --consumption-warehouse are required")?;

    let mut request = SimulationRequest::new(sku, warehouse, consumption_warehouse, parameters);
    if let Some(as_of) = cli.as_of {
        request = request.on(as_of);
    }

    info!(
        data_dir = %source.config().data_dir.display(),
        sku = %request.sku,
        "loading input tables"
    );
    let tables = source.load().context("failed to load input tables")?;

    ReplenishmentJob::new(request, tables)
        .run()
        .context("replenishment job failed")
}
