use crate::shared::Result;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// ScanRepository port for the directory holding scan artifacts
///
/// This port abstracts the file system operations the uploader performs on
/// the scans directory: listing, reading, archiving and deleting artifacts.
pub trait ScanRepository {
    /// Checks that `dir` exists and is a real directory
    ///
    /// # Errors
    /// Returns an error if the path is missing, is a symbolic link or is
    /// not a directory
    fn validate_directory(&self, dir: &Path) -> Result<()>;

    /// Lists regular `*.cdx.json` files directly inside `dir`
    ///
    /// A missing directory yields an empty list.
    fn list_artifacts(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Reads an artifact's raw bytes
    ///
    /// # Errors
    /// Returns an error if the file is missing, is a symbolic link or
    /// exceeds the size limit
    fn read_artifact(&self, path: &Path) -> Result<Vec<u8>>;

    /// Modification time of an artifact
    fn modified_at(&self, path: &Path) -> Result<SystemTime>;

    /// Moves an artifact into `dest_dir` (created on demand), keeping its
    /// file name
    ///
    /// # Returns
    /// The new path
    fn move_into(&self, path: &Path, dest_dir: &Path) -> Result<PathBuf>;

    /// Deletes an artifact
    fn remove(&self, path: &Path) -> Result<()>;
}
