use crate::sbom_upload::domain::BomMetadata;

/// Separator between description fragments
pub const FRAGMENT_SEPARATOR: &str = " | ";

/// DescriptionBuilder service for child project descriptions
pub struct DescriptionBuilder;

impl DescriptionBuilder {
    /// Builds a child project description.
    ///
    /// Starts from the category's base description and appends user,
    /// local IP and public IP fragments, each only when that field has a
    /// non-empty value.
    pub fn child_description(base: &str, metadata: &BomMetadata) -> String {
        let mut parts = vec![base.to_string()];

        if let Some(user) = metadata.user() {
            parts.push(format!("User: {}", user));
        }

        if !metadata.local_ips.is_empty() {
            parts.push(format!("Local IPs: {}", metadata.local_ips.join(", ")));
        }

        if let Some(public_ip) = metadata.public_ip() {
            parts.push(format!("Public IP: {}", public_ip));
        }

        parts.join(FRAGMENT_SEPARATOR)
    }

    /// Description of the host-level parent project
    pub fn parent_description(hostname: &str) -> String {
        format!("Developer workstation: {}", hostname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_and_local_ip() {
        let metadata = BomMetadata {
            logged_in_user: Some("alice".to_string()),
            local_ips: vec!["10.0.0.5".to_string()],
            ..Default::default()
        };

        assert_eq!(
            DescriptionBuilder::child_description("Installed desktop applications", &metadata),
            "Installed desktop applications | User: alice | Local IPs: 10.0.0.5"
        );
    }

    #[test]
    fn test_all_fragments() {
        let metadata = BomMetadata {
            logged_in_user: Some("bob".to_string()),
            local_ips: vec!["10.0.0.5".to_string(), "192.168.1.2".to_string()],
            public_ip: Some("203.0.113.7".to_string()),
            ..Default::default()
        };

        assert_eq!(
            DescriptionBuilder::child_description("Browser extensions and plugins", &metadata),
            "Browser extensions and plugins | User: bob | Local IPs: 10.0.0.5, 192.168.1.2 | Public IP: 203.0.113.7"
        );
    }

    #[test]
    fn test_base_only_when_metadata_empty() {
        assert_eq!(
            DescriptionBuilder::child_description("IDE extensions and MCP servers", &BomMetadata::default()),
            "IDE extensions and MCP servers"
        );
    }

    #[test]
    fn test_empty_user_is_omitted() {
        let metadata = BomMetadata {
            logged_in_user: Some(String::new()),
            public_ip: Some("203.0.113.7".to_string()),
            ..Default::default()
        };
        assert_eq!(
            DescriptionBuilder::child_description("base", &metadata),
            "base | Public IP: 203.0.113.7"
        );
    }

    #[test]
    fn test_parent_description() {
        assert_eq!(
            DescriptionBuilder::parent_description("mbp.local"),
            "Developer workstation: mbp.local"
        );
    }
}
