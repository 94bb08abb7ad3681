use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// A completed run exits with `Success` even when individual hosts or
/// uploads failed; only conditions that stop the whole run are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The run completed (possibly with per-host or per-file failures)
    Success = 0,
    /// Fatal condition: missing scan directory, nothing to upload,
    /// invalid configuration, unexpected error or user interruption
    Fatal = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::Fatal => write!(f, "Fatal (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Fatal, run-level errors for the upload workflow.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping user-facing messages next to the variants.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Scans directory not found: {path}\n\n💡 Hint: Pass the directory holding *.cdx.json files as the first argument or set scans_dir in the config file")]
    ScansDirectoryNotFound { path: PathBuf },

    #[error("Invalid scans directory: {path}\nReason: {reason}\n\n💡 Hint: Please specify a readable directory")]
    InvalidScansDirectory { path: PathBuf, reason: String },

    #[error("No valid SBOM files found in {path}\n\n💡 Hint: Expected files named <host>.<YYYYMMDD-HHMMSS[-TZ]>.<category>.cdx.json")]
    NoScanFiles { path: PathBuf },

    #[error("Invalid configuration: {message}\n\n💡 Hint: {hint}")]
    InvalidConfig { message: String, hint: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

/// Failure kinds reported by the inventory service.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Conflict: {details}")]
    Conflict { details: String },

    #[error("Bad request: {details}")]
    BadRequest { details: String },

    #[error("Unauthorized (HTTP {status}): check the API key and its team permissions")]
    Unauthorized { status: u16 },

    #[error("Not found: {details}")]
    NotFound { details: String },

    #[error("Unexpected HTTP status {status} from {operation}: {body}")]
    UnexpectedStatus {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {operation}: {details}")]
    InvalidResponse {
        operation: &'static str,
        details: String,
    },

    #[error("Transport error during {operation}: {details}")]
    Transport {
        operation: &'static str,
        details: String,
    },
}
