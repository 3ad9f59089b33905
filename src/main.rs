mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, ChartCommand, Command};
use lahd_housing::{
    charts::{self, ChartSpec},
    export, fetch, prepare, PreparedDataset,
};
use reqwest::Client;
use serde::Serialize;
use tokio::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lahd_housing=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("startup");

    // ─── 2) load the CSV once ────────────────────────────────────────
    let start = Instant::now();
    let csv = match &args.input {
        Some(path) => fetch::read_local(path).await?,
        None => fetch::fetch_dataset(&Client::new(), &args.url).await?,
    };
    info!(bytes = csv.len(), elapsed = ?start.elapsed(), "loaded dataset");

    // ─── 3) prepare ──────────────────────────────────────────────────
    let dataset = prepare(&csv).context("preparing dataset")?;

    // ─── 4) dispatch ─────────────────────────────────────────────────
    match args.command.unwrap_or(Command::Summary) {
        Command::Summary => print_json(&dataset.summary()?),
        Command::Export { out_dir } => {
            let written = export::export_dataset(&dataset, &out_dir)?;
            info!(files = written.len(), dir = %out_dir.display(), "export done");
            Ok(())
        }
        Command::Projects { without_jobs } => {
            let records = if without_jobs {
                dataset.project_records_without_jobs()?
            } else {
                dataset.project_records()?
            };
            print_json(&records)
        }
        Command::Chart(chart) => print_json(&build_chart(&dataset, chart)?),
    }
}

fn build_chart(dataset: &PreparedDataset, chart: ChartCommand) -> Result<ChartSpec> {
    let spec = match chart {
        ChartCommand::CostByYear { category } => {
            charts::cost_by_year(dataset.project_table(&[]), category)?
        }
        ChartCommand::Scatter {
            funding,
            metric,
            category,
        } => charts::funding_scatter(
            dataset.project_table(&[metric.column()]),
            funding,
            metric,
            category,
        )?,
        ChartCommand::Heatmap { funding, metric } => {
            charts::funding_heatmap(dataset.project_table(&[metric.column()]), funding, metric)?
        }
        ChartCommand::FundingByYear { funding, metric } => {
            charts::funding_by_year(dataset.project_table(&[metric.column()]), funding, metric)?
        }
        ChartCommand::Box {
            measure,
            category,
            split,
        } => charts::measure_box(
            dataset.project_table(&[measure.column()]),
            measure,
            category,
            split,
        )?,
        ChartCommand::Map {
            category,
            size,
            style,
        } => charts::site_map(&dataset.sites, category, size, style)?,
    };
    info!(title = spec.title(), "built chart");
    Ok(spec)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{json}");
    Ok(())
}
