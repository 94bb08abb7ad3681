/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (inventory service, file system, console).
pub mod inventory_service;
pub mod progress_reporter;
pub mod scan_repository;

pub use inventory_service::InventoryService;
pub use progress_reporter::ProgressReporter;
pub use scan_repository::ScanRepository;
