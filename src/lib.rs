//! sbom-uploader - Uploads endpoint SBOMs to Dependency-Track
//!
//! Picks the most recent scan from a directory of CycloneDX files, builds a
//! per-host parent/child project hierarchy on a Dependency-Track server,
//! uploads every SBOM and archives the scan afterwards.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_upload`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use sbom_uploader::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let inventory = CachingInventoryService::new(DependencyTrackClient::new(
//!     "http://localhost:8081",
//!     "odt_api_key",
//! )?);
//! let use_case = UploadScansUseCase::new(
//!     FileSystemScanRepository::new(),
//!     inventory,
//!     StderrProgressReporter::new(),
//! );
//!
//! let report = use_case.execute(UploadRequest::new("scans")).await?;
//! println!("{} upload(s)", report.total_uploads());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod logging;
pub mod ports;
pub mod sbom_upload;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::FileSystemScanRepository;
    pub use crate::adapters::outbound::network::{CachingInventoryService, DependencyTrackClient};
    pub use crate::application::dto::{
        ArchiveReport, HostReport, MonitoredUpload, PollPolicy, RunReport, SkipReason,
        SkippedFile, UploadRequest,
    };
    pub use crate::application::use_cases::{
        ArchiveScansUseCase, HierarchyReconciler, ProcessingMonitor, UploadScansUseCase,
    };
    pub use crate::ports::inbound::UploadScansPort;
    pub use crate::ports::outbound::{InventoryService, ProgressReporter, ScanRepository};
    pub use crate::sbom_upload::domain::{
        format_version, BomMetadata, Classifier, NewProject, ProcessingOutcome, ProcessingStatus,
        ProjectId, ProjectProperty, ProjectRef, SbomCategory, ScanFile, ScanTimestamp,
        UploadRecord, UploadToken,
    };
    pub use crate::sbom_upload::policies::CategoryTable;
    pub use crate::sbom_upload::services::{BomMetadataExtractor, ScanFileSelector};
    pub use crate::shared::error::{ExitCode, InventoryError, UploadError};
    pub use crate::shared::Result;
}
