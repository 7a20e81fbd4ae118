//! Input resolution: turn the uploaded file's path into bytes.
//!
//! The display side decides what was uploaded and hands over a single
//! resolved path; there is no guessing between strings and widget objects
//! here. The file's content is sent as-is: nothing checks that it is
//! actually a PDF, the extraction API is the judge of that.

use crate::error::IcrError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A user upload, identified by where it was stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSource {
    path: PathBuf,
}

impl UploadSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole upload into memory.
    pub async fn read(&self) -> Result<Vec<u8>, IcrError> {
        let path = &self.path;
        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => IcrError::FileNotFound { path: path.clone() },
            std::io::ErrorKind::PermissionDenied => {
                IcrError::PermissionDenied { path: path.clone() }
            }
            _ => IcrError::ReadFailed {
                path: path.clone(),
                source: e,
            },
        })?;
        debug!("Read upload {} ({} bytes)", path.display(), bytes.len());
        Ok(bytes)
    }
}

impl From<PathBuf> for UploadSource {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for UploadSource {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<&str> for UploadSource {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_bytes_verbatim() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"%PDF-1.7\n\x00\xff binary").unwrap();
        let source = UploadSource::from(tmp.path());
        let bytes = tokio_test::block_on(source.read()).unwrap();
        assert_eq!(bytes, b"%PDF-1.7\n\x00\xff binary");
    }

    #[test]
    fn non_pdf_content_is_not_rejected() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"hello").unwrap();
        let bytes = tokio_test::block_on(UploadSource::from(tmp.path()).read()).unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.pdf");
        let err = tokio_test::block_on(UploadSource::new(&path).read()).unwrap_err();
        assert!(matches!(err, IcrError::FileNotFound { path: ref p } if p == &path));
    }

    #[test]
    fn directory_is_a_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = tokio_test::block_on(UploadSource::from(dir.path()).read()).unwrap_err();
        assert!(!matches!(err, IcrError::FileNotFound { .. }));
    }
}
