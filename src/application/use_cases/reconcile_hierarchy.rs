use crate::application::dto::{HostReport, SkipReason, SkippedFile};
use crate::ports::outbound::{InventoryService, ProgressReporter, ScanRepository};
use crate::sbom_upload::domain::{
    format_version, BomMetadata, Classifier, NewProject, ProjectId, ProjectProperty, ProjectRef,
    UploadRecord, PARENT_VERSION,
};
use crate::sbom_upload::services::{DescriptionBuilder, HostGroup, InspectedFile};
use crate::shared::error::InventoryError;
use crate::shared::Result;

const ENDPOINT_GROUP: &str = "Endpoint Information";
const COMPLIANCE_GROUP: &str = "Compliance";
const SCAN_FREQUENCY: &str = "daily";

/// A project that was found or created
#[derive(Debug, Clone)]
pub struct ResolvedProject {
    pub project: ProjectRef,
    pub created: bool,
}

/// HierarchyReconciler - Builds the parent/child project tree of one host
/// and uploads its SBOMs
///
/// Borrows the injected ports of the orchestrating use case. Every step
/// is lookup-then-create so reruns never duplicate projects.
pub struct HierarchyReconciler<'a, IS, SR, PR> {
    inventory: &'a IS,
    scan_repository: &'a SR,
    progress_reporter: &'a PR,
}

impl<'a, IS, SR, PR> HierarchyReconciler<'a, IS, SR, PR>
where
    IS: InventoryService,
    SR: ScanRepository,
    PR: ProgressReporter,
{
    pub fn new(inventory: &'a IS, scan_repository: &'a SR, progress_reporter: &'a PR) -> Self {
        Self {
            inventory,
            scan_repository,
            progress_reporter,
        }
    }

    /// Reconciles one host group
    ///
    /// # Returns
    /// A report listing the uploads that succeeded. A parent failure
    /// abandons the whole group and is recorded in the report, never
    /// returned as an error.
    pub async fn reconcile(&self, group: &HostGroup) -> HostReport {
        let host_metadata = group.host_metadata();
        let mut report = HostReport::new(&group.hostname);

        self.progress_reporter.report(&format!(
            "\n📦 STEP 1: Creating parent project for {}",
            group.hostname
        ));
        let parent = match self.resolve_parent(&group.hostname).await {
            Ok(parent) => parent,
            Err(e) => {
                self.progress_reporter.report_error(&format!(
                    "❌ Failed to create parent project for {}: {}",
                    group.hostname, e
                ));
                tracing::warn!(host = %group.hostname, error = %e, "host abandoned");
                return HostReport::abandoned(&group.hostname, e.to_string());
            }
        };
        report.parent_created = parent.created;
        let parent_id = parent.project.id;
        report.parent = Some(parent.project);

        self.progress_reporter
            .report("\n🏷️  STEP 2: Adding metadata properties");
        report.property_failures = self.attach_properties(&parent_id, &host_metadata).await;

        self.progress_reporter.report(&format!(
            "\n📤 STEP 3: Uploading {} SBOM(s)",
            group.files.len()
        ));
        for inspected in &group.files {
            match self
                .reconcile_file(&group.hostname, &parent_id, inspected, &host_metadata)
                .await
            {
                Ok(record) => report.uploads.push(record),
                Err(reason) => {
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: Skipping {}: {}",
                        inspected.file.file_name(),
                        reason
                    ));
                    report.skipped.push(SkippedFile {
                        path: inspected.file.path().to_path_buf(),
                        reason,
                    });
                }
            }
        }

        report
    }

    /// Finds or creates the host-level parent project
    async fn resolve_parent(&self, hostname: &str) -> Result<ResolvedProject> {
        let resolved = self
            .get_or_create(NewProject {
                name: hostname.to_string(),
                version: PARENT_VERSION.to_string(),
                classifier: Classifier::Device,
                description: DescriptionBuilder::parent_description(hostname),
                parent: None,
            })
            .await?;

        let verb = if resolved.created { "Created" } else { "Found existing" };
        self.progress_reporter.report(&format!(
            "   ✅ {} parent project: {} ({})",
            verb, resolved.project.name, resolved.project.id
        ));
        Ok(resolved)
    }

    /// Looks a project up by (name, version) and creates it only if absent.
    ///
    /// A conflict on create means another writer got there first; the
    /// project is looked up once more instead of failing.
    pub async fn get_or_create(&self, project: NewProject) -> Result<ResolvedProject> {
        if let Some(existing) = self
            .inventory
            .lookup_project(&project.name, &project.version)
            .await?
        {
            return Ok(ResolvedProject {
                project: existing,
                created: false,
            });
        }

        match self.inventory.create_project(&project).await {
            Ok(created) => Ok(ResolvedProject {
                project: created,
                created: true,
            }),
            Err(e)
                if matches!(
                    e.downcast_ref::<InventoryError>(),
                    Some(InventoryError::Conflict { .. })
                ) =>
            {
                tracing::debug!(name = %project.name, version = %project.version, "create raced, looking up again");
                let existing = self
                    .inventory
                    .lookup_project(&project.name, &project.version)
                    .await?
                    .ok_or(e)?;
                Ok(ResolvedProject {
                    project: existing,
                    created: false,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Attaches host properties to the parent project
    ///
    /// # Returns
    /// Number of properties that could not be set
    async fn attach_properties(&self, parent: &ProjectId, metadata: &BomMetadata) -> usize {
        let mut failures = 0;

        for property in Self::host_properties(metadata) {
            match self.inventory.set_project_property(parent, &property).await {
                Ok(()) => self.progress_reporter.report(&format!(
                    "   ✅ {}: {}",
                    property.name, property.value
                )),
                Err(e) => {
                    failures += 1;
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: Failed to set property {}: {}",
                        property.name, e
                    ));
                }
            }
        }

        failures
    }

    /// Properties recorded on every parent project
    pub fn host_properties(metadata: &BomMetadata) -> Vec<ProjectProperty> {
        vec![
            ProjectProperty::string(
                ENDPOINT_GROUP,
                "operating_system",
                metadata.os_or_unknown(),
                "Operating system",
            ),
            ProjectProperty::string(
                ENDPOINT_GROUP,
                "os_version",
                metadata.os_version_or_unknown(),
                "Operating system version",
            ),
            ProjectProperty::string(
                ENDPOINT_GROUP,
                "logged_in_user",
                metadata.user_or_unknown(),
                "User logged in at scan time",
            ),
            ProjectProperty::string(
                COMPLIANCE_GROUP,
                "scan_frequency",
                SCAN_FREQUENCY,
                "How often the endpoint is scanned",
            ),
            ProjectProperty::string(
                COMPLIANCE_GROUP,
                "last_scan_time",
                metadata.timestamp_or_unknown(),
                "Timestamp of the most recent scan",
            ),
        ]
    }

    /// Resolves the child project of one file and uploads the file to it
    async fn reconcile_file(
        &self,
        hostname: &str,
        parent: &ProjectId,
        inspected: &InspectedFile,
        host_metadata: &BomMetadata,
    ) -> std::result::Result<UploadRecord, SkipReason> {
        let category = inspected.file.category().ok_or(SkipReason::UnknownCategory)?;

        let timestamp = inspected
            .metadata
            .bom_timestamp()
            .or_else(|| host_metadata.bom_timestamp())
            .unwrap_or_default();
        let child = self
            .get_or_create(NewProject {
                name: format!("{} - {}", hostname, category.key()),
                version: format_version(timestamp),
                classifier: category.classifier(),
                description: DescriptionBuilder::child_description(
                    category.base_description(),
                    &inspected.metadata,
                ),
                parent: Some(*parent),
            })
            .await
            .map_err(|e| SkipReason::ChildProjectFailed(e.to_string()))?
            .project;

        let bom = self
            .scan_repository
            .read_artifact(inspected.file.path())
            .map_err(|e| SkipReason::ReadFailed(e.to_string()))?;

        let token = self
            .inventory
            .upload_artifact(&child.id, &bom)
            .await
            .map_err(|e| SkipReason::UploadFailed(e.to_string()))?;

        self.progress_reporter.report(&format!(
            "   ✅ {} → {} v{} ({} components)",
            category.key(),
            child.name,
            child.version,
            inspected.metadata.component_count
        ));
        tracing::debug!(project = %child.name, %token, "upload accepted");

        Ok(UploadRecord {
            token,
            project_name: child.name,
            category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::console::StderrProgressReporter;
    use crate::adapters::outbound::filesystem::FileSystemScanRepository;
    use crate::sbom_upload::domain::{ProcessingStatus, UploadToken};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use uuid::Uuid;

    type Reconciler<'a> =
        HierarchyReconciler<'a, RacingInventory, FileSystemScanRepository, StderrProgressReporter>;

    /// Reports "absent" on the first lookup and conflicts on create, as
    /// when a concurrent uploader creates the project in between
    struct RacingInventory {
        lookups: Mutex<u32>,
        existing: ProjectRef,
    }

    #[async_trait]
    impl InventoryService for RacingInventory {
        async fn lookup_project(&self, _name: &str, _version: &str) -> Result<Option<ProjectRef>> {
            let mut lookups = self.lookups.lock().unwrap();
            *lookups += 1;
            Ok((*lookups > 1).then(|| self.existing.clone()))
        }

        async fn create_project(&self, project: &NewProject) -> Result<ProjectRef> {
            Err(InventoryError::Conflict {
                details: format!("{} {}", project.name, project.version),
            }
            .into())
        }

        async fn set_project_property(&self, _: &ProjectId, _: &ProjectProperty) -> Result<()> {
            Ok(())
        }

        async fn upload_artifact(&self, _: &ProjectId, _: &[u8]) -> Result<UploadToken> {
            Ok(UploadToken::new(Uuid::new_v4()))
        }

        async fn processing_status(&self, _: &UploadToken) -> Result<ProcessingStatus> {
            Ok(ProcessingStatus { processing: false })
        }
    }

    #[tokio::test]
    async fn test_conflict_on_create_resolves_to_existing_project() {
        let existing = ProjectRef {
            id: ProjectId::new(Uuid::new_v4()),
            name: "mbp.local".to_string(),
            version: PARENT_VERSION.to_string(),
        };
        let inventory = RacingInventory {
            lookups: Mutex::new(0),
            existing: existing.clone(),
        };
        let scans = FileSystemScanRepository::new();
        let reporter = StderrProgressReporter::new();
        let reconciler: Reconciler = HierarchyReconciler::new(&inventory, &scans, &reporter);

        let resolved = reconciler
            .get_or_create(NewProject {
                name: "mbp.local".to_string(),
                version: PARENT_VERSION.to_string(),
                classifier: Classifier::Device,
                description: String::new(),
                parent: None,
            })
            .await
            .unwrap();

        assert!(!resolved.created);
        assert_eq!(resolved.project, existing);
        assert_eq!(*inventory.lookups.lock().unwrap(), 2);
    }

    #[test]
    fn test_host_properties() {
        let metadata = BomMetadata {
            os: Some("darwin".to_string()),
            timestamp: Some("2025-12-13T16:54:43-06:00".to_string()),
            ..Default::default()
        };

        let properties = Reconciler::host_properties(&metadata);
        let pairs: Vec<(&str, &str, &str)> = properties
            .iter()
            .map(|p| (p.group.as_str(), p.name.as_str(), p.value.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("Endpoint Information", "operating_system", "darwin"),
                ("Endpoint Information", "os_version", "unknown"),
                ("Endpoint Information", "logged_in_user", "unknown"),
                ("Compliance", "scan_frequency", "daily"),
                ("Compliance", "last_scan_time", "2025-12-13T16:54:43-06:00"),
            ]
        );
    }
}
