/// Placeholder shown wherever a metadata field is missing
pub const UNKNOWN: &str = "unknown";

/// Endpoint metadata embedded in an SBOM's `metadata.component`.
///
/// Derived read-only from a file's contents. `Default` is the "nothing
/// could be read" record: no host name, every display accessor returning
/// [`UNKNOWN`], no local IPs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BomMetadata {
    pub hostname: Option<String>,
    pub os: Option<String>,
    pub os_version: Option<String>,
    pub scan_category: Option<String>,
    pub logged_in_user: Option<String>,
    pub local_ips: Vec<String>,
    pub public_ip: Option<String>,
    pub timestamp: Option<String>,
    pub component_count: usize,
}

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or(UNKNOWN)
}

impl BomMetadata {
    pub fn hostname_or_unknown(&self) -> &str {
        or_unknown(&self.hostname)
    }

    pub fn os_or_unknown(&self) -> &str {
        or_unknown(&self.os)
    }

    pub fn os_version_or_unknown(&self) -> &str {
        or_unknown(&self.os_version)
    }

    pub fn scan_category_or_unknown(&self) -> &str {
        or_unknown(&self.scan_category)
    }

    pub fn user_or_unknown(&self) -> &str {
        or_unknown(&self.logged_in_user)
    }

    pub fn public_ip_or_unknown(&self) -> &str {
        or_unknown(&self.public_ip)
    }

    pub fn timestamp_or_unknown(&self) -> &str {
        or_unknown(&self.timestamp)
    }

    /// The non-empty logged-in user, if any
    pub fn user(&self) -> Option<&str> {
        self.logged_in_user.as_deref().filter(|v| !v.is_empty())
    }

    /// The non-empty public IP, if any
    pub fn public_ip(&self) -> Option<&str> {
        self.public_ip.as_deref().filter(|v| !v.is_empty())
    }

    /// The non-empty BOM timestamp, if any
    pub fn bom_timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref().filter(|v| !v.is_empty())
    }
}
