/// Domain layer for SBOM uploads
///
/// Pure logic with no I/O: timestamp codec, scan file selection, metadata
/// extraction, category dispatch and child project descriptions.
pub mod domain;
pub mod policies;
pub mod services;
