use crate::error::Result;
use crate::process::{
    date_parser,
    utils::{self, replace_column, string_values},
};
use crate::schema::{columns::DATE_FUNDED, ColumnGroup};
use arrow::{
    array::{Array, ArrayRef, Date32Builder, Float64Builder, Int64Builder, StringArray},
    compute::cast,
    datatypes::DataType,
    record_batch::RecordBatch,
};
use std::sync::Arc;
use tracing::debug;

/// Text → `f64`, separators stripped, unparseable → null.
pub fn to_float64(sarr: &StringArray) -> ArrayRef {
    let mut b = Float64Builder::with_capacity(sarr.len());
    for opt in sarr.iter() {
        b.append_option(opt.and_then(utils::parse_f64));
    }
    Arc::new(b.finish())
}

/// Text → `i64`, separators stripped, unparseable → null.
pub fn to_int64(sarr: &StringArray) -> ArrayRef {
    let mut b = Int64Builder::with_capacity(sarr.len());
    for opt in sarr.iter() {
        b.append_option(opt.and_then(utils::parse_i64));
    }
    Arc::new(b.finish())
}

/// `MM/DD/YYYY` text → `Date32`, unparseable → null.
pub fn to_date32(sarr: &StringArray) -> ArrayRef {
    let mut b = Date32Builder::with_capacity(sarr.len());
    for opt in sarr.iter() {
        let days = opt
            .and_then(date_parser::parse_us_date)
            .map(date_parser::to_date32);
        b.append_option(days);
    }
    Arc::new(b.finish())
}

pub fn categorical_type() -> DataType {
    DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8))
}

fn coerce_group(
    batch: RecordBatch,
    group: ColumnGroup,
    convert: fn(&StringArray) -> ArrayRef,
) -> Result<RecordBatch> {
    let mut batch = batch;
    for name in group.columns() {
        let sarr = string_values(&batch, name)?;
        let typed = convert(&sarr);
        debug!(
            column = *name,
            nulls_before = sarr.null_count(),
            nulls_after = typed.null_count(),
            "coerced"
        );
        batch = replace_column(&batch, name, typed)?;
    }
    Ok(batch)
}

/// Monetary columns and coordinates to `f64`, counts (jobs, units) to `i64`.
pub fn coerce_numeric(batch: &RecordBatch) -> Result<RecordBatch> {
    let batch = coerce_group(batch.clone(), ColumnGroup::Monetary, to_float64)?;
    let batch = coerce_group(batch, ColumnGroup::Integer, to_int64)?;
    coerce_group(batch, ColumnGroup::Coordinate, to_float64)
}

/// Dictionary-encode the low-cardinality label columns. Values are unchanged.
pub fn tag_categorical(batch: &RecordBatch) -> Result<RecordBatch> {
    let mut batch = batch.clone();
    let dict = categorical_type();
    for name in ColumnGroup::Categorical.columns() {
        let arr = utils::column(&batch, name)?;
        let tagged = cast(arr, &dict)?;
        batch = replace_column(&batch, name, tagged)?;
    }
    Ok(batch)
}

/// Parse `DATE FUNDED` into a `Date32` column.
pub fn parse_dates(batch: &RecordBatch) -> Result<RecordBatch> {
    let sarr = string_values(batch, DATE_FUNDED)?;
    replace_column(batch, DATE_FUNDED, to_date32(&sarr))
}
