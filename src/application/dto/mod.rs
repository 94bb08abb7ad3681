/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod run_report;
mod upload_request;

pub use run_report::{
    ArchiveReport, HostReport, MonitoredUpload, RunReport, SkipReason, SkippedFile,
};
pub use upload_request::{
    PollPolicy, UploadRequest, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL,
    DEFAULT_RETENTION_DAYS,
};
