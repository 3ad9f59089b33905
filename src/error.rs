// src/error.rs
use arrow::error::ArrowError;
use thiserror::Error;

/// Errors raised while preparing the dataset or building chart specs.
///
/// Per-value parse failures never show up here: they become nulls in the
/// affected column. Everything in this enum aborts the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A column the pipeline depends on is not in the table.
    #[error("expected column {0:?} is missing from the dataset")]
    MissingColumn(String),

    /// The source header is missing one or more contract columns.
    #[error("dataset header is missing expected columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A column exists but holds an Arrow type the step cannot handle.
    #[error("column {column:?} has unexpected type {found}")]
    UnexpectedType { column: String, found: String },

    /// A null where a complete row was expected.
    #[error("column {column:?} is null at row {row}")]
    NullValue { column: String, row: usize },

    /// The input has no header row at all.
    #[error("dataset is empty: no header row")]
    EmptyInput,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::MissingColumns(vec!["TDC".into(), "SITE #".into()]);
        assert_eq!(
            err.to_string(),
            "dataset header is missing expected columns: TDC, SITE #"
        );

        let err = PipelineError::NullValue {
            column: "JOBS".into(),
            row: 3,
        };
        assert_eq!(err.to_string(), "column \"JOBS\" is null at row 3");
    }

    #[test]
    fn test_from_arrow_error() {
        let err: PipelineError = ArrowError::ComputeError("boom".into()).into();
        assert!(matches!(err, PipelineError::Arrow(_)));
    }
}
