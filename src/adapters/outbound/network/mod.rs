/// Network adapters for external API calls
mod caching_inventory_service;
mod dependency_track_client;

pub use caching_inventory_service::CachingInventoryService;
pub use dependency_track_client::DependencyTrackClient;
