/// Mock implementations for testing
mod mock_inventory_service;
mod mock_progress_reporter;

pub use mock_inventory_service::MockInventoryService;
pub use mock_progress_reporter::MockProgressReporter;
