use crate::shared::error::UploadError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum SBOM size accepted for upload (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path is an existing regular file and not a symbolic link.
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected, never its target.
pub fn validate_regular_file(path: &Path) -> Result<u64> {
    let metadata = fs::symlink_metadata(path).map_err(|e| UploadError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    if metadata.is_symlink() {
        return Err(UploadError::SecurityError {
            path: path.to_path_buf(),
            reason: "File is a symbolic link".to_string(),
            hint: "Place the SBOM itself in the scans directory instead of a link to it"
                .to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(metadata.len())
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(UploadError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
            hint: "Split the scan or remove the oversized file".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Validates the scans directory: it must exist, must not be a symbolic
/// link and must resolve to a directory.
pub fn validate_scans_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(UploadError::ScansDirectoryNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let metadata =
        fs::symlink_metadata(path).map_err(|e| UploadError::InvalidScansDirectory {
            path: path.to_path_buf(),
            reason: format!("Failed to read path metadata: {}", e),
        })?;

    if metadata.is_symlink() {
        return Err(UploadError::SecurityError {
            path: path.to_path_buf(),
            reason: "Scans directory is a symbolic link".to_string(),
            hint: "Point the uploader at the real directory".to_string(),
        }
        .into());
    }

    if !metadata.is_dir() {
        return Err(UploadError::InvalidScansDirectory {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
