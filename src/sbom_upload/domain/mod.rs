pub mod bom_metadata;
pub mod project;
pub mod sbom_category;
pub mod scan_file;
pub mod scan_timestamp;
pub mod upload_record;

pub use bom_metadata::{BomMetadata, UNKNOWN};
pub use project::{
    Classifier, NewProject, ProjectId, ProjectProperty, ProjectRef, PropertyType, PARENT_VERSION,
};
pub use sbom_category::SbomCategory;
pub use scan_file::{is_artifact_name, ScanFile, ARTIFACT_SUFFIX};
pub use scan_timestamp::{format_version, format_version_at, ScanTimestamp};
pub use upload_record::{ProcessingOutcome, ProcessingStatus, UploadRecord, UploadToken};
