use crate::error::Result;
use crate::process::utils::string_values;
use arrow::{
    array::{Array, BooleanArray},
    compute::filter_record_batch,
    record_batch::RecordBatch,
};
use tracing::info;

/// Remove rows where any `(column, value)` pair matches exactly.
///
/// A null in an exclusion column never matches, so the row is kept.
pub fn exclude_rows(batch: &RecordBatch, exclusions: &[(&str, &str)]) -> Result<RecordBatch> {
    let mut keep = vec![true; batch.num_rows()];

    for (column, value) in exclusions {
        let values = string_values(batch, column)?;
        for (row, v) in values.iter().enumerate() {
            if v == Some(*value) {
                keep[row] = false;
            }
        }
    }

    let mask = BooleanArray::from(keep);
    let filtered = filter_record_batch(batch, &mask)?;
    info!(
        kept = filtered.num_rows(),
        excluded = batch.num_rows() - filtered.num_rows(),
        "row filter"
    );
    Ok(filtered)
}

/// Drop every row that has a null in any column. Returns the filtered batch
/// and how many rows were lost.
pub fn drop_incomplete_rows(batch: &RecordBatch) -> Result<(RecordBatch, usize)> {
    let keep: Vec<bool> = (0..batch.num_rows())
        .map(|row| batch.columns().iter().all(|col| col.is_valid(row)))
        .collect();

    let mask = BooleanArray::from(keep);
    let complete = filter_record_batch(batch, &mask)?;
    let dropped = batch.num_rows() - complete.num_rows();
    Ok((complete, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn batch() -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new("CONSTRUCTION TYPE", DataType::Utf8, true),
            Field::new("HOUSING TYPE", DataType::Utf8, true),
            Field::new("JOBS", DataType::Int64, true),
        ]);
        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(StringArray::from(vec![
                    Some("NEW CONSTRUCTION"),
                    Some("ACQUISITION ONLY"),
                    None,
                    Some("REHAB"),
                ])),
                Arc::new(StringArray::from(vec![
                    Some("FAMILY"),
                    Some("FAMILY"),
                    Some("SENIORS"),
                    Some("AT-RISK"),
                ])),
                Arc::new(Int64Array::from(vec![Some(1), Some(2), None, Some(4)])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn excludes_matching_rows_and_keeps_nulls() {
        let out = exclude_rows(
            &batch(),
            &[
                ("CONSTRUCTION TYPE", "ACQUISITION ONLY"),
                ("HOUSING TYPE", "AT-RISK"),
            ],
        )
        .unwrap();

        assert_eq!(out.num_rows(), 2);
        let housing = string_values(&out, "HOUSING TYPE").unwrap();
        assert_eq!(housing.value(0), "FAMILY");
        assert_eq!(housing.value(1), "SENIORS");
    }

    #[test]
    fn exclusion_is_exact_match() {
        let out = exclude_rows(&batch(), &[("HOUSING TYPE", "at-risk")]).unwrap();
        assert_eq!(out.num_rows(), 4);
    }

    #[test]
    fn incomplete_rows_are_counted() {
        let (out, dropped) = drop_incomplete_rows(&batch()).unwrap();
        assert_eq!(out.num_rows(), 3);
        assert_eq!(dropped, 1);
        assert_eq!(out.column(0).null_count(), 0);
    }
}
