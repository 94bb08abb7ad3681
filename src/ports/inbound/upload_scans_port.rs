use crate::application::dto::{RunReport, UploadRequest};
use crate::shared::Result;
use async_trait::async_trait;

/// UploadScansPort - Inbound port for the upload run
///
/// This port defines the interface that driving adapters (the CLI) use to
/// start a run. It represents the application's public API.
#[async_trait(?Send)]
pub trait UploadScansPort {
    /// Uploads the most recent scan in the requested directory
    ///
    /// # Errors
    /// Returns an error only for fatal conditions:
    /// - The scans directory does not exist or is not a directory
    /// - No file of the directory carries a parseable timestamp
    ///
    /// Per-host and per-file failures are recorded in the returned report.
    async fn upload_scans(&self, request: UploadRequest) -> Result<RunReport>;
}
