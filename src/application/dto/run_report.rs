use crate::sbom_upload::domain::{ProcessingOutcome, ProjectRef, ScanTimestamp, UploadRecord};
use std::fmt;
use std::path::PathBuf;

/// Why a selected file was not uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnknownCategory,
    ChildProjectFailed(String),
    ReadFailed(String),
    UploadFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownCategory => write!(f, "could not determine SBOM type"),
            SkipReason::ChildProjectFailed(e) => write!(f, "child project unavailable: {}", e),
            SkipReason::ReadFailed(e) => write!(f, "could not read file: {}", e),
            SkipReason::UploadFailed(e) => write!(f, "upload failed: {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// An upload and how its processing ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoredUpload {
    pub record: UploadRecord,
    pub outcome: ProcessingOutcome,
}

/// Everything that happened for one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostReport {
    pub hostname: String,
    /// Parent project; `None` when the host was abandoned
    pub parent: Option<ProjectRef>,
    pub parent_created: bool,
    /// Reason the host was abandoned
    pub failure: Option<String>,
    pub property_failures: usize,
    pub uploads: Vec<UploadRecord>,
    pub skipped: Vec<SkippedFile>,
    pub processing: Vec<MonitoredUpload>,
}

impl HostReport {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            parent: None,
            parent_created: false,
            failure: None,
            property_failures: 0,
            uploads: Vec::new(),
            skipped: Vec::new(),
            processing: Vec::new(),
        }
    }

    pub fn abandoned(hostname: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::new(hostname)
        }
    }

    pub fn is_abandoned(&self) -> bool {
        self.failure.is_some()
    }
}

/// Outcome of the archive and retention steps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    /// New locations of the archived files
    pub archived: Vec<PathBuf>,
    pub archive_failures: Vec<(PathBuf, String)>,
    /// Files deleted by the retention sweep
    pub removed: Vec<PathBuf>,
}

/// RunReport - Response DTO of the upload use case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub scan_timestamp: Option<ScanTimestamp>,
    pub selected: Vec<PathBuf>,
    /// Artifacts ignored for lack of a timestamp segment
    pub skipped_timestamps: Vec<PathBuf>,
    /// Selected files whose host name could not be read
    pub without_host: Vec<PathBuf>,
    pub hosts: Vec<HostReport>,
    pub archive: ArchiveReport,
}

impl RunReport {
    pub fn total_uploads(&self) -> usize {
        self.hosts.iter().map(|h| h.uploads.len()).sum()
    }

    pub fn abandoned_hosts(&self) -> usize {
        self.hosts.iter().filter(|h| h.is_abandoned()).count()
    }
}
