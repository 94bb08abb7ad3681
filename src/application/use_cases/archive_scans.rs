use crate::application::dto::ArchiveReport;
use crate::ports::outbound::{ProgressReporter, ScanRepository};
use crate::sbom_upload::services::ScanFileSelector;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// ArchiveScansUseCase - Moves processed artifacts out of the scans
/// directory and enforces the retention window
pub struct ArchiveScansUseCase<'a, SR, PR> {
    scan_repository: &'a SR,
    progress_reporter: &'a PR,
}

impl<'a, SR, PR> ArchiveScansUseCase<'a, SR, PR>
where
    SR: ScanRepository,
    PR: ProgressReporter,
{
    pub fn new(scan_repository: &'a SR, progress_reporter: &'a PR) -> Self {
        Self {
            scan_repository,
            progress_reporter,
        }
    }

    /// Archives `files` into `archive_dir`, then deletes expired artifacts
    /// from both directories
    pub fn execute(
        &self,
        scans_dir: &Path,
        archive_dir: &Path,
        files: &[PathBuf],
        retention_days: u32,
        now: SystemTime,
    ) -> ArchiveReport {
        let mut report = self.archive(files, archive_dir);
        report.removed = self.sweep_expired(&[scans_dir, archive_dir], retention_days, now);
        report
    }

    /// Moves every file into the archive directory.
    ///
    /// A file that cannot be moved is reported and left in place.
    pub fn archive(&self, files: &[PathBuf], archive_dir: &Path) -> ArchiveReport {
        let mut report = ArchiveReport::default();

        for path in files {
            match self.scan_repository.move_into(path, archive_dir) {
                Ok(archived) => report.archived.push(archived),
                Err(e) => {
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: Could not archive {}: {}",
                        ScanFileSelector::display_name(path),
                        e
                    ));
                    report.archive_failures.push((path.clone(), e.to_string()));
                }
            }
        }

        if !report.archived.is_empty() {
            self.progress_reporter.report(&format!(
                "📁 Archived {} SBOM file(s) to {}",
                report.archived.len(),
                archive_dir.display()
            ));
        }

        report
    }

    /// Deletes artifacts last modified before `now - retention_days`
    ///
    /// # Returns
    /// The deleted paths
    pub fn sweep_expired(&self, dirs: &[&Path], retention_days: u32, now: SystemTime) -> Vec<PathBuf> {
        let retention = Duration::from_secs(u64::from(retention_days) * SECONDS_PER_DAY);
        let Some(cutoff) = now.checked_sub(retention) else {
            return Vec::new();
        };

        let mut removed = Vec::new();
        for dir in dirs {
            let artifacts = match self.scan_repository.list_artifacts(dir) {
                Ok(artifacts) => artifacts,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "retention sweep skipped");
                    continue;
                }
            };

            for path in artifacts {
                let expired = match self.scan_repository.modified_at(&path) {
                    Ok(modified) => modified < cutoff,
                    Err(e) => {
                        tracing::debug!(path = %path.display(), error = %e, "no modification time");
                        false
                    }
                };
                if !expired {
                    continue;
                }

                match self.scan_repository.remove(&path) {
                    Ok(()) => removed.push(path),
                    Err(e) => self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: Could not delete expired {}: {}",
                        ScanFileSelector::display_name(&path),
                        e
                    )),
                }
            }
        }

        if !removed.is_empty() {
            self.progress_reporter.report(&format!(
                "🗑️  Deleted {} SBOM file(s) older than {} days",
                removed.len(),
                retention_days
            ));
        }

        removed
    }
}
