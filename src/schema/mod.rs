//! The column contract with the published LAHD dataset.
//!
//! Every step of the pipeline refers to columns through the constants in
//! [`columns`]; the groups in [`contract`] say what each step does to them.

pub mod columns;
pub mod contract;

pub use contract::{validate_headers, ColumnGroup};
