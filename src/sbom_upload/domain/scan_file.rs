use super::{SbomCategory, ScanTimestamp};
use std::path::{Path, PathBuf};

/// File suffix shared by every uploadable artifact
pub const ARTIFACT_SUFFIX: &str = ".cdx.json";

/// An SBOM artifact discovered in the scans directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFile {
    path: PathBuf,
    timestamp: ScanTimestamp,
    category: Option<SbomCategory>,
}

impl ScanFile {
    pub fn new(path: PathBuf, timestamp: ScanTimestamp, category: Option<SbomCategory>) -> Self {
        Self {
            path,
            timestamp,
            category,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }

    pub fn timestamp(&self) -> ScanTimestamp {
        self.timestamp
    }

    /// Category inferred from the file name, if any key matched
    pub fn category(&self) -> Option<SbomCategory> {
        self.category
    }
}

/// Whether a file name follows the `<...>.cdx.json` artifact convention
pub fn is_artifact_name(file_name: &str) -> bool {
    file_name.len() > ARTIFACT_SUFFIX.len() && file_name.ends_with(ARTIFACT_SUFFIX)
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
