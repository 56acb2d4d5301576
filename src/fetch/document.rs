//! Temporary storage for a downloaded document.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::{DOCX_FILE_NAME, TEMP_DIR_PREFIX};
use crate::error_handling::DocumentError;

/// A DOCX file living in its own freshly created temporary directory.
///
/// The directory is unique per instance, so concurrent requests never share a
/// path. It is removed by `cleanup()`, or on drop if `cleanup()` was never
/// called; removal failures are logged and never returned.
#[derive(Debug)]
pub struct DownloadedDocument {
    dir: TempDir,
    path: PathBuf,
    size: usize,
}

impl DownloadedDocument {
    /// Creates a new temporary directory under `root` (the system temp
    /// directory when `None`) and writes `bytes` into it.
    ///
    /// If the write fails the directory is removed before the error is returned.
    pub(crate) async fn persist(bytes: &[u8], root: Option<&Path>) -> Result<Self, DocumentError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_DIR_PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        let path = dir.path().join(DOCX_FILE_NAME);
        let document = DownloadedDocument {
            dir,
            path,
            size: bytes.len(),
        };

        if let Err(e) = tokio::fs::write(&document.path, bytes).await {
            document.cleanup();
            return Err(DocumentError::Storage(e));
        }

        log::debug!(
            "Stored {} bytes at {}",
            document.size,
            document.path.display()
        );
        Ok(document)
    }

    /// Path of the stored DOCX file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the stored payload in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Removes the file and its directory, logging (not returning) failures.
    pub fn cleanup(self) {
        let dir_path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            log::warn!(
                "Failed to remove temporary directory {}: {}",
                dir_path.display(),
                e
            );
        }
    }
}
