//! Whole-file JSON reads and writes.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, StoreError};

/// Read a JSON collection, treating a missing or corrupt file as empty.
pub(crate) async fn read_or_empty<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Store file missing, using empty collection");
            return Vec::new();
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Failed to read store file, using empty collection");
            return Vec::new();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(items) => items,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Store file is not valid, using empty collection");
            Vec::new()
        }
    }
}

/// Overwrite a JSON file via a sibling temp file and rename.
pub(crate) async fn write_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec(value)?;
    let tmp = temp_path(path);

    tokio::fs::write(&tmp, &bytes).await.map_err(|source| StoreError::Io {
        path: tmp.clone(),
        source,
    })?;
    tokio::fs::rename(&tmp, path).await.map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Create an empty JSON array file if nothing exists at `path`.
pub(crate) async fn seed_empty(path: &Path) -> Result<()> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(());
    }
    debug!(path = %path.display(), "Seeding empty store file");
    write_atomic::<[String]>(path, &[]).await
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let items: Vec<String> = read_or_empty(&dir.path().join("nope.json")).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let items: Vec<String> = read_or_empty(&path).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_schema_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        tokio::fs::write(&path, br#"{"urls": ["http://a"]}"#).await.unwrap();

        let items: Vec<String> = read_or_empty(&path).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let urls = vec!["http://a".to_string(), "http://b".to_string()];

        write_atomic(&path, &urls).await.unwrap();
        let loaded: Vec<String> = read_or_empty(&path).await;

        assert_eq!(loaded, urls);
        assert!(!temp_path(&path).exists());
    }

    #[tokio::test]
    async fn test_seed_keeps_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        write_atomic(&path, &["http://a"]).await.unwrap();

        seed_empty(&path).await.unwrap();
        let loaded: Vec<String> = read_or_empty(&path).await;
        assert_eq!(loaded, vec!["http://a".to_string()]);
    }
}
