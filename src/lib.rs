//! Preparation pipeline for the LAHD affordable housing projects dataset.
//!
//! [`process::prepare`] turns the published CSV into a site-level table and
//! two project-level tables; [`charts`] turns those into chart specs for the
//! dashboard.

pub mod charts;
pub mod error;
pub mod export;
pub mod fetch;
pub mod process;
pub mod schema;

pub use error::PipelineError;
pub use process::{prepare, PreparedDataset};
