// src/process/mod.rs
//! The dataset preparation pipeline.
//!
//! ```text
//! raw rows → row filter → rename → numeric coercion → categorical tagging
//!          → date parsing                                  (= sites table)
//!          → site counts ┐
//!          → first row per project → join counts → year / cost per unit
//!          → prune → drop incomplete rows          (= projects, two variants)
//! ```
//!
//! Every step takes a `RecordBatch` and returns a new one; nothing is
//! mutated in place. Unparseable values become nulls. A missing column is a
//! fatal [`PipelineError`](crate::error::PipelineError).

pub mod aggregate;
pub mod convert;
pub mod date_parser;
pub mod filter;
pub mod raw_table;
pub mod records;
pub mod trimming;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

use crate::error::Result;
use crate::schema::{
    columns::JOBS,
    contract::{EXCLUSIONS, PROJECT_DROP_COLUMNS, RENAMES},
};
use arrow::record_batch::RecordBatch;
use raw_table::RawTable;
use serde::Serialize;
use tracing::{info, warn};

pub use records::ProjectRecord;

/// Everything the presentation layer needs. Built once, read-only after.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    /// Filtered, retyped site-level rows (one per physical site).
    pub sites: RecordBatch,
    /// One complete row per project.
    pub projects: RecordBatch,
    /// Like `projects` but without `JOBS`, which is often blank; keeps more
    /// projects.
    pub projects_without_jobs: RecordBatch,
    /// As-of date of the published data (`MM/DD/YYYY`), if the first row
    /// carries one.
    pub date_stamp: Option<String>,
    /// Rows in the published file, before any filtering.
    pub raw_rows: usize,
}

/// Row counts through the pipeline, for logging and the CLI summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub raw_rows: usize,
    pub site_rows: usize,
    pub distinct_projects: usize,
    pub complete_projects: usize,
    pub complete_projects_without_jobs: usize,
    pub date_stamp: Option<String>,
}

impl PreparedDataset {
    pub fn project_records(&self) -> Result<Vec<ProjectRecord>> {
        ProjectRecord::from_batch(&self.projects)
    }

    pub fn project_records_without_jobs(&self) -> Result<Vec<ProjectRecord>> {
        ProjectRecord::from_batch(&self.projects_without_jobs)
    }

    /// The project table a chart over `columns` should read: the complete
    /// table when `JOBS` is among them, otherwise the larger jobs-free one.
    pub fn project_table(&self, columns: &[&str]) -> &RecordBatch {
        if columns.contains(&JOBS) {
            &self.projects
        } else {
            &self.projects_without_jobs
        }
    }

    pub fn summary(&self) -> Result<DatasetSummary> {
        Ok(DatasetSummary {
            raw_rows: self.raw_rows,
            site_rows: self.sites.num_rows(),
            distinct_projects: aggregate::site_counts(&self.sites)?.len(),
            complete_projects: self.projects.num_rows(),
            complete_projects_without_jobs: self.projects_without_jobs.num_rows(),
            date_stamp: self.date_stamp.clone(),
        })
    }
}

/// Run the whole pipeline over the published CSV bytes.
#[tracing::instrument(level = "info", skip(csv), fields(bytes = csv.len()))]
pub fn prepare(csv: &[u8]) -> Result<PreparedDataset> {
    let raw = RawTable::from_csv(csv)?;
    let date_stamp = raw.date_stamp()?;
    let raw_rows = raw.num_rows();

    let sites = prepare_sites(&raw.batch)?;
    let (pruned, distinct_projects) = prepare_projects(&sites)?;

    let (projects, dropped) = filter::drop_incomplete_rows(&pruned)?;
    let without_jobs = utils::drop_columns(&pruned, &[JOBS])?;
    let (projects_without_jobs, dropped_without_jobs) =
        filter::drop_incomplete_rows(&without_jobs)?;

    if dropped > 0 {
        warn!(
            dropped,
            kept = projects.num_rows(),
            "dropped projects with missing values"
        );
    }
    if dropped_without_jobs > 0 {
        warn!(
            dropped = dropped_without_jobs,
            kept = projects_without_jobs.num_rows(),
            "dropped projects with missing values (jobs excluded)"
        );
    }

    let dataset = PreparedDataset {
        sites,
        projects,
        projects_without_jobs,
        date_stamp,
        raw_rows,
    };
    info!(
        raw_rows,
        sites = dataset.sites.num_rows(),
        distinct_projects,
        projects = dataset.projects.num_rows(),
        projects_without_jobs = dataset.projects_without_jobs.num_rows(),
        "dataset prepared"
    );
    Ok(dataset)
}

/// Steps 1-5: filter, rename, coerce, tag, parse dates.
pub fn prepare_sites(raw: &RecordBatch) -> Result<RecordBatch> {
    let batch = filter::exclude_rows(raw, EXCLUSIONS)?;
    let batch = utils::rename_columns(&batch, RENAMES)?;
    let batch = convert::coerce_numeric(&batch)?;
    let batch = convert::tag_categorical(&batch)?;
    convert::parse_dates(&batch)
}

/// Steps 6-9: count, deduplicate, derive, prune. Returns the pruned project
/// table (nulls still present) and the number of distinct projects.
pub fn prepare_projects(sites: &RecordBatch) -> Result<(RecordBatch, usize)> {
    let counts = aggregate::site_counts(sites)?;
    let batch = aggregate::first_per_project(sites)?;
    let batch = aggregate::attach_site_counts(&batch, &counts)?;
    let batch = aggregate::attach_year_funded(&batch)?;
    let batch = aggregate::attach_cost_per_unit(&batch)?;
    let batch = utils::drop_columns(&batch, PROJECT_DROP_COLUMNS)?;
    Ok((batch, counts.len()))
}
