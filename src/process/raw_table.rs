use crate::error::{PipelineError, Result};
use crate::process::{date_parser, trimming::apply_trimming, utils::string_values};
use crate::schema::{columns::DATE_STAMP, validate_headers};
use arrow::{
    array::Array,
    compute::concat_batches,
    csv::ReaderBuilder,
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::{io::Cursor, sync::Arc};
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const BATCH_SIZE: usize = 8192;

/// The published table, every column still text.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Column names from the header row, trimmed, BOM removed.
    pub headers: Vec<String>,
    /// All data rows as `Utf8` columns; blank cells are null.
    pub batch: RecordBatch,
}

impl RawTable {
    /// Parse delimited text with a header row and check it against the
    /// column contract before reading any data.
    pub fn from_csv(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        // 1) header row, via the csv crate so quoting rules match the data
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);
        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(PipelineError::EmptyInput);
        }
        validate_headers(&headers)?;

        // 2) everything as Utf8; typing happens later, column by column
        let fields: Vec<Field> = headers
            .iter()
            .map(|n| Field::new(n, DataType::Utf8, true))
            .collect();
        let schema = Arc::new(Schema::new(fields));

        let reader = ReaderBuilder::new(schema.clone())
            .with_header(true)
            .with_batch_size(BATCH_SIZE)
            .with_quote(b'"')
            .with_delimiter(b',')
            .build(Cursor::new(bytes))?;
        let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
        let batch = concat_batches(&schema, &batches)?;
        debug!(rows = batch.num_rows(), columns = headers.len(), "read raw table");

        let batch = apply_trimming(&batch)?;
        Ok(Self { headers, batch })
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Date part of `DATE STAMP` on the first published row, shown on the
    /// dashboard as the data's as-of date.
    pub fn date_stamp(&self) -> Result<Option<String>> {
        if self.batch.num_rows() == 0 {
            return Ok(None);
        }
        let stamps = string_values(&self.batch, DATE_STAMP)?;
        if stamps.is_null(0) {
            return Ok(None);
        }
        Ok(Some(date_parser::date_only(stamps.value(0))))
    }
}
