/// Inbound ports (Driving ports) - Use case interfaces
pub mod upload_scans_port;

pub use upload_scans_port::UploadScansPort;
