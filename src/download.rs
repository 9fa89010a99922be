//! Remote content download
//!
//! Fetches a URL into a temporary file. The file is removed when the handle
//! is dropped, so callers get unconditional cleanup on every return path.

use crate::error::{Error, Result};
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::debug;

/// Fetch a URL into a named temporary file
///
/// The returned handle keeps the file alive; dropping it removes the file.
pub async fn fetch_to_temp(client: &reqwest::Client, url: &str) -> Result<NamedTempFile> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Download(format!("request to {} failed: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(Error::Download(format!(
            "{} returned status: {}",
            url,
            response.status()
        )));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| Error::Download(format!("failed to read body from {}: {}", url, e)))?;

    let mut file = NamedTempFile::new()?;
    file.write_all(&body)?;
    debug!(%url, bytes = body.len(), path = %file.path().display(), "downloaded to temp file");

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_temp_file_removed_on_drop() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"payload").unwrap();
        let path = file.path().to_path_buf();

        assert!(path.exists());
        drop(file);
        assert!(!path.exists());
    }

    #[tokio::test]
    #[ignore = "Requires network access"]
    async fn test_fetch_to_temp() {
        let client = reqwest::Client::new();
        let file = fetch_to_temp(&client, "https://example.com").await.unwrap();
        let content = fs::read_to_string(file.path()).unwrap();
        assert!(!content.is_empty());
    }
}
