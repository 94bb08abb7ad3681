use crate::ports::outbound::ScanRepository;
use crate::sbom_upload::domain::is_artifact_name;
use crate::shared::error::UploadError;
use crate::shared::security::{
    validate_file_size, validate_regular_file, validate_scans_directory, MAX_FILE_SIZE,
};
use crate::shared::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// FileSystemScanRepository adapter for the local scans directory
///
/// This adapter implements the ScanRepository port. Reads go through the
/// shared security checks: symbolic links and oversized files are
/// rejected before any bytes are read.
pub struct FileSystemScanRepository {
    max_file_size: u64,
}

impl FileSystemScanRepository {
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Overrides the maximum accepted artifact size
    pub fn with_max_file_size(max_file_size: u64) -> Self {
        Self { max_file_size }
    }
}

impl Default for FileSystemScanRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanRepository for FileSystemScanRepository {
    fn validate_directory(&self, dir: &Path) -> Result<()> {
        validate_scans_directory(dir)
    }

    fn list_artifacts(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to list {}", dir.display()))?;

        let mut artifacts = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
            // file_type() does not follow links
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }
            if is_artifact_name(&entry.file_name().to_string_lossy()) {
                artifacts.push(entry.path());
            }
        }

        artifacts.sort();
        Ok(artifacts)
    }

    fn read_artifact(&self, path: &Path) -> Result<Vec<u8>> {
        let size = validate_regular_file(path)?;
        validate_file_size(size, path, self.max_file_size)?;

        fs::read(path).map_err(|e| {
            UploadError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    fn modified_at(&self, path: &Path) -> Result<SystemTime> {
        let metadata = fs::symlink_metadata(path)
            .with_context(|| format!("Failed to read metadata of {}", path.display()))?;
        Ok(metadata.modified()?)
    }

    fn move_into(&self, path: &Path, dest_dir: &Path) -> Result<PathBuf> {
        let file_name = path
            .file_name()
            .with_context(|| format!("{} has no file name", path.display()))?;

        fs::create_dir_all(dest_dir)
            .with_context(|| format!("Failed to create {}", dest_dir.display()))?;

        let destination = dest_dir.join(file_name);
        fs::rename(path, &destination).with_context(|| {
            format!(
                "Failed to move {} to {}",
                path.display(),
                destination.display()
            )
        })?;

        Ok(destination)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("Failed to delete {}", path.display()))
    }
}
