/// Filesystem adapters for the scans directory
mod scan_directory;

pub use scan_directory::FileSystemScanRepository;
