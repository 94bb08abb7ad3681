pub mod bom_metadata_extractor;
pub mod description_builder;
pub mod host_grouping;
pub mod scan_file_selector;

pub use bom_metadata_extractor::BomMetadataExtractor;
pub use description_builder::DescriptionBuilder;
pub use host_grouping::{group_by_host, HostGroup, InspectedFile};
pub use scan_file_selector::{ScanFileSelector, Selection};
