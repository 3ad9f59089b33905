use crate::error::{PipelineError, Result};
use arrow::{
    array::{Array, ArrayRef, Float64Array, Int64Array, StringArray},
    compute::cast,
    datatypes::{DataType, Field, FieldRef, Schema},
    record_batch::RecordBatch,
};
use std::sync::Arc;

/// A published cell with surrounding whitespace and stray outer quotes
/// removed: `" \"FAMILY\" "` → `"FAMILY"`.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Drop thousands separators: `"1,234,500"` → `"1234500"`.
pub fn strip_thousands(raw: &str) -> String {
    raw.chars().filter(|c| *c != ',').collect()
}

/// Parse a published number, `None` for anything that is not one.
pub fn parse_f64(raw: &str) -> Option<f64> {
    let s = strip_thousands(&clean_str(raw));
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Like [`parse_f64`] but only whole numbers survive (`"12.0"` is 12,
/// `"12.5"` is `None`).
pub fn parse_i64(raw: &str) -> Option<i64> {
    let s = strip_thousands(&clean_str(raw));
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Position of `name` in the batch, or a fatal [`PipelineError::MissingColumn`].
pub fn column_index(batch: &RecordBatch, name: &str) -> Result<usize> {
    batch
        .schema()
        .index_of(name)
        .map_err(|_| PipelineError::MissingColumn(name.to_string()))
}

pub fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = column_index(batch, name)?;
    Ok(batch.column(idx))
}

/// Read any string-like column (plain or dictionary) as a `StringArray`.
pub fn string_values(batch: &RecordBatch, name: &str) -> Result<StringArray> {
    let arr = column(batch, name)?;
    let as_utf8 = cast(arr, &DataType::Utf8)?;
    as_utf8
        .as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .ok_or_else(|| unexpected_type(name, arr))
}

/// Read a numeric column as `Option<f64>` per row.
pub fn f64_values(batch: &RecordBatch, name: &str) -> Result<Vec<Option<f64>>> {
    let arr = column(batch, name)?;
    if !arr.data_type().is_numeric() {
        return Err(unexpected_type(name, arr));
    }
    let as_f64 = cast(arr, &DataType::Float64)?;
    let values = as_f64
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| unexpected_type(name, arr))?;
    Ok(values.iter().collect())
}

/// Read an integer column as `Option<i64>` per row.
pub fn i64_values(batch: &RecordBatch, name: &str) -> Result<Vec<Option<i64>>> {
    let arr = column(batch, name)?;
    if !arr.data_type().is_integer() {
        return Err(unexpected_type(name, arr));
    }
    let as_i64 = cast(arr, &DataType::Int64)?;
    let values = as_i64
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| unexpected_type(name, arr))?;
    Ok(values.iter().collect())
}

fn unexpected_type(name: &str, arr: &ArrayRef) -> PipelineError {
    PipelineError::UnexpectedType {
        column: name.to_string(),
        found: arr.data_type().to_string(),
    }
}

/// Swap the array behind `name`, adopting the new array's type.
pub fn replace_column(batch: &RecordBatch, name: &str, array: ArrayRef) -> Result<RecordBatch> {
    let idx = column_index(batch, name)?;
    let schema = batch.schema();

    let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();
    fields[idx] = Arc::new(Field::new(name, array.data_type().clone(), true));

    let mut columns = batch.columns().to_vec();
    columns[idx] = array;

    let schema = Schema::new_with_metadata(fields, schema.metadata().clone());
    RecordBatch::try_new(Arc::new(schema), columns).map_err(Into::into)
}

/// Add a column at the end of the batch.
pub fn append_column(batch: &RecordBatch, name: &str, array: ArrayRef) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();
    fields.push(Arc::new(Field::new(name, array.data_type().clone(), true)));

    let mut columns = batch.columns().to_vec();
    columns.push(array);

    let schema = Schema::new_with_metadata(fields, schema.metadata().clone());
    RecordBatch::try_new(Arc::new(schema), columns).map_err(Into::into)
}

/// Rename columns by exact name. Every `from` must exist.
pub fn rename_columns(batch: &RecordBatch, renames: &[(&str, &str)]) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();

    for (from, to) in renames {
        let idx = column_index(batch, from)?;
        fields[idx] = Arc::new(fields[idx].as_ref().clone().with_name(*to));
    }

    let schema = Schema::new_with_metadata(fields, schema.metadata().clone());
    RecordBatch::try_new(Arc::new(schema), batch.columns().to_vec()).map_err(Into::into)
}

/// Remove columns by name. Every name must exist.
pub fn drop_columns(batch: &RecordBatch, names: &[&str]) -> Result<RecordBatch> {
    let mut dropped = Vec::with_capacity(names.len());
    for name in names {
        dropped.push(column_index(batch, name)?);
    }

    let keep: Vec<usize> = (0..batch.num_columns())
        .filter(|i| !dropped.contains(i))
        .collect();
    batch.project(&keep).map_err(Into::into)
}
