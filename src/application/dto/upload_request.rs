use std::path::PathBuf;
use std::time::Duration;

/// Default age after which artifacts are deleted
pub const DEFAULT_RETENTION_DAYS: u32 = 60;
/// Default wait between two processing-status queries
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Default number of processing-status queries per upload
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 30;

/// Bounded polling schedule for server-side processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

/// UploadRequest - Internal request DTO for the upload use case
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Directory holding the `*.cdx.json` artifacts
    pub scans_dir: PathBuf,
    /// Artifacts older than this many days are deleted after the run
    pub retention_days: u32,
    pub poll_policy: PollPolicy,
    /// Base URL of the inventory web UI, used for "view project" links
    pub frontend_url: Option<String>,
}

impl UploadRequest {
    pub fn new(scans_dir: impl Into<PathBuf>) -> Self {
        Self {
            scans_dir: scans_dir.into(),
            retention_days: DEFAULT_RETENTION_DAYS,
            poll_policy: PollPolicy::default(),
            frontend_url: None,
        }
    }

    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.retention_days = days;
        self
    }

    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poll_policy = policy;
        self
    }

    pub fn with_frontend_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_url = Some(url.into());
        self
    }

    /// Location of the archive subdirectory
    pub fn archive_dir(&self) -> PathBuf {
        self.scans_dir.join("archive")
    }
}
