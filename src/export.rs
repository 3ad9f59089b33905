// src/export.rs
use crate::process::PreparedDataset;
use anyhow::{Context, Result};
use arrow::record_batch::RecordBatch;
use parquet::{
    arrow::ArrowWriter,
    basic::{BrotliLevel, Compression},
    file::properties::WriterProperties,
};
use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};
use tracing::info;

pub const SITES_FILE: &str = "sites.parquet";
pub const PROJECTS_FILE: &str = "projects.parquet";
pub const PROJECTS_WITHOUT_JOBS_FILE: &str = "projects_without_jobs.parquet";

/// Write one batch to `path` (Brotli level 5). The file is written under a
/// `.tmp` name first and renamed into place once closed.
pub fn write_parquet(batch: &RecordBatch, path: &Path) -> Result<()> {
    let tmp_path = path.with_extension("parquet.tmp");
    let file = File::create(&tmp_path)
        .with_context(|| format!("could not create `{}`", tmp_path.display()))?;

    let props = WriterProperties::builder()
        .set_compression(Compression::BROTLI(BrotliLevel::try_new(5)?))
        .build();

    let mut writer = ArrowWriter::try_new(BufWriter::new(file), batch.schema(), Some(props))
        .context("creating parquet writer")?;
    writer.write(batch).context("writing batch to parquet")?;
    writer.close().context("closing parquet writer")?;

    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "failed to rename `{}` to `{}`",
            tmp_path.display(),
            path.display()
        )
    })?;
    Ok(())
}

/// Write the three prepared tables into `out_dir`, creating it if needed.
/// Returns the written paths.
pub fn export_dataset(dataset: &PreparedDataset, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output dir `{}`", out_dir.display()))?;

    let tables = [
        (SITES_FILE, &dataset.sites),
        (PROJECTS_FILE, &dataset.projects),
        (PROJECTS_WITHOUT_JOBS_FILE, &dataset.projects_without_jobs),
    ];

    let mut written = Vec::with_capacity(tables.len());
    for (name, batch) in tables {
        let path = out_dir.join(name);
        write_parquet(batch, &path)?;
        info!(path = %path.display(), rows = batch.num_rows(), "wrote parquet");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prepare;
    use crate::process::test_support::{csv_with_rows, init_test_logging, Row};
    use crate::schema::columns::*;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::tempdir;

    fn read_back(path: &Path) -> Result<Vec<RecordBatch>> {
        let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?.build()?;
        Ok(reader.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    #[test]
    fn exports_all_three_tables() -> Result<()> {
        init_test_logging();
        let ds = prepare(
            csv_with_rows(&[
                Row::new("P1", "1"),
                Row::new("P1", "2"),
                Row::new("P2", "1").jobs(""),
            ])
            .as_bytes(),
        )?;

        let dir = tempdir()?;
        let paths = export_dataset(&ds, dir.path())?;
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.exists()));
        assert!(!dir.path().join("projects.parquet.tmp").exists());

        let rows = |p: &Path| -> Result<usize> {
            Ok(read_back(p)?.iter().map(|b| b.num_rows()).sum())
        };
        assert_eq!(rows(&dir.path().join(SITES_FILE))?, 3);
        assert_eq!(rows(&dir.path().join(PROJECTS_FILE))?, 1);
        assert_eq!(rows(&dir.path().join(PROJECTS_WITHOUT_JOBS_FILE))?, 2);

        let batches = read_back(&dir.path().join(PROJECTS_FILE))?;
        let schema = batches[0].schema();
        assert!(schema.column_with_name(COST_PER_HOUSING_UNIT).is_some());
        assert!(schema.column_with_name(SITE_COUNCIL_DISTRICT).is_none());
        Ok(())
    }
}
