/// Use cases module containing application business logic orchestration
mod archive_scans;
mod monitor_processing;
mod reconcile_hierarchy;
mod upload_scans;

pub use archive_scans::ArchiveScansUseCase;
pub use monitor_processing::ProcessingMonitor;
pub use reconcile_hierarchy::{HierarchyReconciler, ResolvedProject};
pub use upload_scans::UploadScansUseCase;
