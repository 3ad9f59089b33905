//! Command-line arguments.

use clap::{Parser, Subcommand};
use lahd_housing::{
    charts::{FundingSource, HousingCategory, MapSize, MapStyle, Measure, ProjectMetric},
    fetch::DATASET_URL,
};
use std::path::PathBuf;
use url::Url;

/// Prepare the LAHD affordable housing projects dataset and emit dashboard
/// data as JSON or Parquet.
///
/// Examples:
///   lahd-housing summary
///   lahd-housing --input rows.csv export --out-dir parquet
///   lahd-housing chart scatter --funding leverage --metric jobs
///   lahd-housing chart map --size lahd-funded --style carto-darkmatter
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Where to download the published CSV from
    #[arg(long, default_value = DATASET_URL, env = "LAHD_DATASET_URL")]
    pub url: Url,

    /// Read a local copy of the CSV instead of downloading it
    #[arg(short, long, value_name = "FILE", env = "LAHD_INPUT")]
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Row counts through the pipeline (default)
    Summary,

    /// Write sites / projects / projects_without_jobs as Parquet
    Export {
        #[arg(short, long, default_value = "parquet", value_name = "DIR")]
        out_dir: PathBuf,
    },

    /// Print the project records as JSON
    Projects {
        /// Use the table that ignores JOBS when dropping incomplete rows
        #[arg(long)]
        without_jobs: bool,
    },

    /// Print one chart spec as JSON
    #[command(subcommand)]
    Chart(ChartCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum ChartCommand {
    /// Total cost per funding year, stacked by category
    CostByYear {
        #[arg(short, long, default_value = "HOUSING TYPE")]
        category: HousingCategory,
    },

    /// Funding against a project metric, one point per project
    Scatter {
        #[arg(short, long, default_value = "LAHD FUNDED")]
        funding: FundingSource,
        #[arg(short, long, default_value = "PROJECT TOTAL UNITS")]
        metric: ProjectMetric,
        #[arg(short, long, default_value = "HOUSING TYPE")]
        category: HousingCategory,
    },

    /// Project density over funding and a project metric
    Heatmap {
        #[arg(short, long, default_value = "LAHD FUNDED")]
        funding: FundingSource,
        #[arg(short, long, default_value = "PROJECT TOTAL UNITS")]
        metric: ProjectMetric,
    },

    /// Funding per project by year, coloured by a project metric
    FundingByYear {
        #[arg(short, long, default_value = "LAHD FUNDED")]
        funding: FundingSource,
        #[arg(short, long, default_value = "PROJECT TOTAL UNITS")]
        metric: ProjectMetric,
    },

    /// Box plots of any funding source or metric per category
    Box {
        #[arg(short, long, default_value = "COST PER HOUSING UNIT")]
        measure: Measure,
        #[arg(short, long, default_value = "HOUSING TYPE")]
        category: HousingCategory,
        /// Second grouping; omit for ALL
        #[arg(short, long)]
        split: Option<HousingCategory>,
    },

    /// Every site on a map
    Map {
        #[arg(short, long, default_value = "HOUSING TYPE")]
        category: HousingCategory,
        #[arg(long, default_value = "NONE")]
        size: MapSize,
        #[arg(long, default_value = "open-street-map")]
        style: MapStyle,
    },
}
