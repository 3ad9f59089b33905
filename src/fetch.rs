// src/fetch.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::path::Path;
use tracing::info;
use url::Url;

/// The published CSV export of the LAHD affordable housing projects list.
pub const DATASET_URL: &str =
    "https://data.lacity.org/api/views/mymu-zi3s/rows.csv?accessType=DOWNLOAD&bom=true&format=true";

/// Download the whole CSV body. One attempt; a non-2xx status is an error.
pub async fn fetch_dataset(client: &Client, url: &Url) -> Result<Vec<u8>> {
    let bytes = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {}", url))?
        .error_for_status()?
        .bytes()
        .await
        .with_context(|| format!("reading body from {}", url))?;

    info!(url = %url, bytes = bytes.len(), "fetched dataset");
    Ok(bytes.to_vec())
}

/// Read a previously downloaded copy of the CSV.
pub async fn read_local(path: &Path) -> Result<Vec<u8>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading `{}`", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "read local dataset");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn dataset_url_parses() -> Result<()> {
        let url = Url::parse(DATASET_URL)?;
        assert_eq!(url.host_str(), Some("data.lacity.org"));
        assert!(url.query_pairs().any(|(k, v)| k == "bom" && v == "true"));
        Ok(())
    }

    #[tokio::test]
    async fn reads_local_copy() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("rows.csv");
        std::fs::write(&path, b"A,B\n1,2\n")?;
        assert_eq!(read_local(&path).await?, b"A,B\n1,2\n".to_vec());
        assert!(read_local(&dir.path().join("missing.csv")).await.is_err());
        Ok(())
    }
}
