use crate::error::Result;
use crate::process::utils::clean_str;
use arrow::{
    array::{ArrayRef, StringArray},
    record_batch::RecordBatch,
};
use std::sync::Arc;

/// Trim every text cell; cells that end up empty become nulls.
///
/// The publisher leaves optional fields blank, and a blank is a missing value
/// everywhere downstream (coercion, null-row removal, charts).
pub fn apply_trimming(batch: &RecordBatch) -> Result<RecordBatch> {
    let mut cols = Vec::with_capacity(batch.num_columns());
    for arr in batch.columns() {
        if let Some(sarr) = arr.as_any().downcast_ref::<StringArray>() {
            let trimmed: StringArray = sarr
                .iter()
                .map(|opt| opt.map(clean_str).filter(|s| !s.is_empty()))
                .collect();
            cols.push(Arc::new(trimmed) as ArrayRef);
            continue;
        }
        cols.push(arr.clone());
    }

    RecordBatch::try_new(batch.schema(), cols).map_err(Into::into)
}
