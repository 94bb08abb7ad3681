use crate::sbom_upload::domain::{BomMetadata, ScanFile};
use std::collections::BTreeMap;

/// A selected file together with the metadata read from it
#[derive(Debug, Clone)]
pub struct InspectedFile {
    pub file: ScanFile,
    pub metadata: BomMetadata,
}

/// All files of one host, in selection order
#[derive(Debug, Clone)]
pub struct HostGroup {
    pub hostname: String,
    pub files: Vec<InspectedFile>,
}

impl HostGroup {
    /// Host-level metadata: taken from the first file of the group
    pub fn host_metadata(&self) -> BomMetadata {
        self.files
            .first()
            .map(|f| f.metadata.clone())
            .unwrap_or_default()
    }
}

/// Groups inspected files by host name.
///
/// Files without a host name are returned separately so the caller can
/// report them; they take no part in reconciliation. Groups are ordered by
/// host name.
pub fn group_by_host(files: Vec<InspectedFile>) -> (Vec<HostGroup>, Vec<InspectedFile>) {
    let mut groups: BTreeMap<String, Vec<InspectedFile>> = BTreeMap::new();
    let mut without_host = Vec::new();

    for inspected in files {
        match inspected.metadata.hostname.clone() {
            Some(hostname) => groups.entry(hostname).or_default().push(inspected),
            None => without_host.push(inspected),
        }
    }

    let groups = groups
        .into_iter()
        .map(|(hostname, files)| HostGroup { hostname, files })
        .collect();

    (groups, without_host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_upload::domain::ScanTimestamp;
    use std::path::PathBuf;

    fn inspected(name: &str, hostname: Option<&str>, os: &str) -> InspectedFile {
        InspectedFile {
            file: ScanFile::new(
                PathBuf::from(name),
                ScanTimestamp::parse_filename_token("20250101-000000").unwrap(),
                None,
            ),
            metadata: BomMetadata {
                hostname: hostname.map(str::to_string),
                os: Some(os.to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_groups_by_embedded_hostname() {
        let (groups, orphans) = group_by_host(vec![
            inspected("a.cdx.json", Some("zeta"), "linux"),
            inspected("b.cdx.json", Some("alpha"), "darwin"),
            inspected("c.cdx.json", Some("zeta"), "linux"),
        ]);

        assert!(orphans.is_empty());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].hostname, "alpha");
        assert_eq!(groups[1].hostname, "zeta");
        assert_eq!(groups[1].files.len(), 2);
    }

    #[test]
    fn test_files_without_hostname_are_set_aside() {
        let (groups, orphans) = group_by_host(vec![
            inspected("a.cdx.json", None, "linux"),
            inspected("b.cdx.json", Some("alpha"), "darwin"),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].file.path(), PathBuf::from("a.cdx.json"));
    }

    #[test]
    fn test_host_metadata_comes_from_first_file() {
        let (groups, _) = group_by_host(vec![
            inspected("a.cdx.json", Some("host"), "first"),
            inspected("b.cdx.json", Some("host"), "second"),
        ]);
        assert_eq!(groups[0].host_metadata().os_or_unknown(), "first");
    }
}
