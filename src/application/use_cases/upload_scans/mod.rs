use crate::application::dto::{HostReport, RunReport, UploadRequest};
use crate::application::use_cases::{ArchiveScansUseCase, HierarchyReconciler, ProcessingMonitor};
use crate::ports::inbound::UploadScansPort;
use crate::ports::outbound::{InventoryService, ProgressReporter, ScanRepository};
use crate::sbom_upload::domain::BomMetadata;
use crate::sbom_upload::policies::CategoryTable;
use crate::sbom_upload::services::{
    group_by_host, BomMetadataExtractor, HostGroup, InspectedFile, ScanFileSelector, Selection,
};
use crate::shared::error::UploadError;
use crate::shared::Result;
use async_trait::async_trait;
use std::time::SystemTime;

/// UploadScansUseCase - Core use case for uploading endpoint SBOMs
///
/// Orchestrates one run: select the latest scan, group it by host,
/// reconcile each host's project hierarchy, wait for processing, then
/// archive the scan and apply retention.
///
/// # Type Parameters
/// * `SR` - ScanRepository implementation
/// * `IS` - InventoryService implementation
/// * `PR` - ProgressReporter implementation
pub struct UploadScansUseCase<SR, IS, PR> {
    scan_repository: SR,
    inventory: IS,
    progress_reporter: PR,
}

impl<SR, IS, PR> UploadScansUseCase<SR, IS, PR>
where
    SR: ScanRepository,
    IS: InventoryService,
    PR: ProgressReporter,
{
    /// Creates a new UploadScansUseCase with injected dependencies
    pub fn new(scan_repository: SR, inventory: IS, progress_reporter: PR) -> Self {
        Self {
            scan_repository,
            inventory,
            progress_reporter,
        }
    }

    /// Executes one upload run
    ///
    /// # Arguments
    /// * `request` - Scans directory, retention and polling settings
    ///
    /// # Returns
    /// RunReport describing every host, upload and archived file
    ///
    /// # Errors
    /// Fails only on run-level conditions: an invalid scans directory or
    /// no uploadable files. Host and file failures end up in the report.
    pub async fn execute(&self, request: UploadRequest) -> Result<RunReport> {
        // Step 1: Find the files of the most recent scan
        let selection = self.select_latest_scan(&request)?;
        self.warn_overlapping_keys();

        // Step 2: Read endpoint metadata and group by host
        let inspected = self.inspect_files(&selection);
        let (groups, without_host) = group_by_host(inspected);
        for orphan in &without_host {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Could not read host name from {}; file will not be uploaded",
                orphan.file.file_name()
            ));
        }

        // Step 3: Reconcile, upload and monitor each host in turn
        let mut hosts = Vec::with_capacity(groups.len());
        for group in &groups {
            hosts.push(self.process_host(group, &request).await);
        }

        if hosts.iter().any(|h| !h.uploads.is_empty()) {
            self.progress_reporter
                .report_completion("✅ All uploads complete!");
        }

        // Step 4: Archive the scan and drop expired artifacts
        let selected: Vec<_> = selection
            .files
            .iter()
            .map(|f| f.path().to_path_buf())
            .collect();
        let archive = ArchiveScansUseCase::new(&self.scan_repository, &self.progress_reporter)
            .execute(
                &request.scans_dir,
                &request.archive_dir(),
                &selected,
                request.retention_days,
                SystemTime::now(),
            );

        Ok(RunReport {
            scan_timestamp: selection.timestamp(),
            selected,
            skipped_timestamps: selection.skipped,
            without_host: without_host
                .into_iter()
                .map(|f| f.file.path().to_path_buf())
                .collect(),
            hosts,
            archive,
        })
    }

    /// Lists the scans directory and selects the most recent scan
    ///
    /// # Errors
    /// Returns an error if the directory is invalid or nothing is left
    /// to upload
    fn select_latest_scan(&self, request: &UploadRequest) -> Result<Selection> {
        self.scan_repository.validate_directory(&request.scans_dir)?;

        let paths = self.scan_repository.list_artifacts(&request.scans_dir)?;
        let selection = ScanFileSelector::select_most_recent(paths);

        for skipped in &selection.skipped {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Could not parse timestamp from {}",
                ScanFileSelector::display_name(skipped)
            ));
        }

        let Some(timestamp) = selection.timestamp() else {
            return Err(UploadError::NoScanFiles {
                path: request.scans_dir.clone(),
            }
            .into());
        };

        self.progress_reporter.report(&format!(
            "🔍 Found {} SBOM file(s) from most recent scan ({})",
            selection.files.len(),
            timestamp
        ));
        for file in &selection.files {
            self.progress_reporter
                .report(&format!("   - {}", file.file_name()));
        }

        Ok(selection)
    }

    /// Warns about category keys whose precedence depends on table order
    fn warn_overlapping_keys(&self) {
        for (shadowing, shadowed) in CategoryTable::overlapping_keys() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Category key '{}' is contained in '{}'; matching depends on table order",
                shadowing, shadowed
            ));
        }
    }

    /// Reads the embedded metadata of every selected file.
    ///
    /// An unreadable file yields empty metadata, which drops it from host
    /// grouping.
    fn inspect_files(&self, selection: &Selection) -> Vec<InspectedFile> {
        selection
            .files
            .iter()
            .map(|file| {
                let metadata = match self.scan_repository.read_artifact(file.path()) {
                    Ok(bytes) => BomMetadataExtractor::extract(&String::from_utf8_lossy(&bytes)),
                    Err(e) => {
                        tracing::warn!(file = %file.file_name(), error = %e, "SBOM could not be read");
                        BomMetadata::default()
                    }
                };
                InspectedFile {
                    file: file.clone(),
                    metadata,
                }
            })
            .collect()
    }

    /// Runs the full per-host flow and prints its summary
    async fn process_host(&self, group: &HostGroup, request: &UploadRequest) -> HostReport {
        let metadata = group.host_metadata();
        self.report_host_banner(group, &metadata);

        let mut report = HierarchyReconciler::new(
            &self.inventory,
            &self.scan_repository,
            &self.progress_reporter,
        )
        .reconcile(group)
        .await;

        if report.is_abandoned() {
            return report;
        }

        report.processing =
            ProcessingMonitor::new(&self.inventory, &self.progress_reporter, request.poll_policy)
                .await_all(&report.uploads)
                .await;

        self.report_host_summary(&report, request.frontend_url.as_deref());
        report
    }

    fn report_host_banner(&self, group: &HostGroup, metadata: &BomMetadata) {
        let rule = "=".repeat(60);
        self.progress_reporter.report(&format!(
            "\n{}\n🖥️  Processing host: {}\n{}",
            rule, group.hostname, rule
        ));
        self.progress_reporter.report(&format!(
            "   OS: {} {}",
            metadata.os_or_unknown(),
            metadata.os_version_or_unknown()
        ));
        self.progress_reporter
            .report(&format!("   User: {}", metadata.user_or_unknown()));
        if !metadata.local_ips.is_empty() {
            self.progress_reporter
                .report(&format!("   Local IPs: {}", metadata.local_ips.join(", ")));
        }
        self.progress_reporter
            .report(&format!("   Public IP: {}", metadata.public_ip_or_unknown()));
        self.progress_reporter
            .report(&format!("   SBOM files: {}", group.files.len()));
    }

    fn report_host_summary(&self, report: &HostReport, frontend_url: Option<&str>) {
        let completed = report
            .processing
            .iter()
            .filter(|m| m.outcome.is_completed())
            .count();

        self.progress_reporter
            .report(&format!("\n📊 Summary for {}:", report.hostname));
        if let Some(parent) = &report.parent {
            self.progress_reporter
                .report(&format!("   Parent project: {} ({})", parent.name, parent.id));
        }
        self.progress_reporter.report(&format!(
            "   Uploaded: {}, processed: {}, skipped: {}",
            report.uploads.len(),
            completed,
            report.skipped.len()
        ));
        if report.property_failures > 0 {
            self.progress_reporter.report(&format!(
                "   Property failures: {}",
                report.property_failures
            ));
        }

        if let (Some(base), Some(parent)) = (frontend_url, &report.parent) {
            self.progress_reporter.report(&format!(
                "   🔗 View in Dependency-Track: {}/projects/{}",
                base.trim_end_matches('/'),
                parent.id
            ));
        }
    }
}

#[async_trait(?Send)]
impl<SR, IS, PR> UploadScansPort for UploadScansUseCase<SR, IS, PR>
where
    SR: ScanRepository,
    IS: InventoryService,
    PR: ProgressReporter,
{
    async fn upload_scans(&self, request: UploadRequest) -> Result<RunReport> {
        self.execute(request).await
    }
}
