//! CSV exports written to disk

use crate::core::error::ClientResult;
use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};

/// Downloaded export: raw bytes and a suggested file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// `<prefix>_<today>.csv`
    pub fn csv(prefix: &str, bytes: Vec<u8>) -> Self {
        Self::csv_dated(prefix, Utc::now().date_naive(), bytes)
    }

    pub fn csv_dated(prefix: &str, date: NaiveDate, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("{}_{}.csv", prefix, date.format("%Y-%m-%d")),
            bytes,
        }
    }

    /// Write the export into `dir`, returning the full path
    pub async fn save_to(&self, dir: impl AsRef<Path>) -> ClientResult<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        tokio::fs::write(&path, &self.bytes).await?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "export saved");
        Ok(path)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_name() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let file = ExportFile::csv_dated("customers", date, b"a,b\n".to_vec());
        assert_eq!(file.file_name, "customers_2026-03-09.csv");
        assert_eq!(file.len(), 4);
    }

    #[tokio::test]
    async fn test_save_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = ExportFile::csv("inquiries", b"name,email\nA,a@x.io\n".to_vec());

        let path = file.save_to(dir.path()).await.unwrap();
        assert!(path.starts_with(dir.path()));
        assert_eq!(std::fs::read(&path).unwrap(), file.bytes);
    }

    #[tokio::test]
    async fn test_save_to_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = ExportFile::csv("inquiries", Vec::new());
        let err = file.save_to(dir.path().join("nope")).await.unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
