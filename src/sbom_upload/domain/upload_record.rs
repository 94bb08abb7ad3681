use super::SbomCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Handle returned by an artifact upload, used to poll processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadToken(Uuid);

impl UploadToken {
    pub fn new(token: Uuid) -> Self {
        Self(token)
    }
}

impl fmt::Display for UploadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A successful upload awaiting server-side processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    pub token: UploadToken,
    pub project_name: String,
    pub category: SbomCategory,
}

/// Snapshot returned by the processing-status query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ProcessingStatus {
    pub processing: bool,
}

/// How monitoring of one upload ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingOutcome {
    /// The service stopped processing (success or failure is not visible here)
    Completed { attempts: u32 },
    /// The poll bound ran out first; a soft timeout, not an error
    StillProcessing { attempts: u32 },
    /// The service does not know the upload token; polling stops at once
    TokenUnknown { attempts: u32 },
}

impl ProcessingOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ProcessingOutcome::Completed { .. })
    }
}
