use crate::sbom_upload::domain::BomMetadata;
use serde_json::Value;

/// BomMetadataExtractor service for reading endpoint metadata out of an SBOM
///
/// Extraction is total: unreadable input yields [`BomMetadata::default`].
/// Each field is read on its own, so an odd property entry never hides the
/// host name or any other well-formed field.
pub struct BomMetadataExtractor;

impl BomMetadataExtractor {
    /// Extracts metadata from the raw text of a CycloneDX JSON document
    pub fn extract(content: &str) -> BomMetadata {
        match serde_json::from_str::<Value>(content) {
            Ok(document) => Self::from_document(&document),
            Err(e) => {
                tracing::debug!(error = %e, "SBOM metadata could not be parsed");
                BomMetadata::default()
            }
        }
    }

    /// Host name only; `None` for unreadable documents or a missing name
    pub fn extract_hostname(content: &str) -> Option<String> {
        Self::extract(content).hostname
    }

    fn from_document(document: &Value) -> BomMetadata {
        let mut metadata = BomMetadata {
            hostname: string_at(document, "/metadata/component/name")
                .filter(|n| !n.trim().is_empty()),
            timestamp: string_at(document, "/metadata/timestamp"),
            component_count: document
                .pointer("/components")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
            ..Default::default()
        };

        let properties = document
            .pointer("/metadata/component/properties")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for property in properties {
            // Entries without a string name and value are skipped
            let (Some(name), Some(value)) = (
                property.get("name").and_then(Value::as_str),
                property.get("value").and_then(Value::as_str),
            ) else {
                continue;
            };
            let value = value.to_string();
            let slot = match name {
                "local_ip" => {
                    metadata.local_ips.push(value);
                    continue;
                }
                "os" => &mut metadata.os,
                "os_version" => &mut metadata.os_version,
                "scan_category" => &mut metadata.scan_category,
                "logged_in_user" => &mut metadata.logged_in_user,
                "public_ip" => &mut metadata.public_ip,
                _ => continue,
            };
            // Scalars keep their first occurrence
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        metadata
    }
}

fn string_at(document: &Value, pointer: &str) -> Option<String> {
    document
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}
