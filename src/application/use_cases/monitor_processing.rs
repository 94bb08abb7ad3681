use crate::application::dto::{MonitoredUpload, PollPolicy};
use crate::ports::outbound::{InventoryService, ProgressReporter};
use crate::sbom_upload::domain::{ProcessingOutcome, UploadRecord};
use crate::shared::error::InventoryError;

/// ProcessingMonitor - Waits for the inventory service to finish
/// processing uploaded SBOMs
///
/// Uploads are polled one after another. Running out of attempts is a
/// soft timeout reported as [`ProcessingOutcome::StillProcessing`].
pub struct ProcessingMonitor<'a, IS, PR> {
    inventory: &'a IS,
    progress_reporter: &'a PR,
    policy: PollPolicy,
}

impl<'a, IS, PR> ProcessingMonitor<'a, IS, PR>
where
    IS: InventoryService,
    PR: ProgressReporter,
{
    pub fn new(inventory: &'a IS, progress_reporter: &'a PR, policy: PollPolicy) -> Self {
        Self {
            inventory,
            progress_reporter,
            policy,
        }
    }

    /// Monitors every upload until it completes or the poll bound runs out
    ///
    /// # Arguments
    /// * `records` - Successful uploads of one host
    ///
    /// # Returns
    /// One entry per record, in the same order
    pub async fn await_all(&self, records: &[UploadRecord]) -> Vec<MonitoredUpload> {
        if records.is_empty() {
            return Vec::new();
        }

        self.progress_reporter
            .report("\n⏳ STEP 4: Waiting for processing");

        let total = records.len();
        let mut monitored = Vec::with_capacity(total);
        for (index, record) in records.iter().enumerate() {
            self.progress_reporter
                .report_progress(index, total, Some(&record.project_name));

            let outcome = self.await_one(record).await;
            match outcome {
                ProcessingOutcome::Completed { .. } => self.progress_reporter.report(&format!(
                    "   ✅ {} - Processing complete",
                    record.project_name
                )),
                ProcessingOutcome::StillProcessing { .. } => {
                    self.progress_reporter.report(&format!(
                        "   ⏰ {} - Still processing (check the web UI later)",
                        record.project_name
                    ))
                }
                ProcessingOutcome::TokenUnknown { .. } => {
                    self.progress_reporter.report(&format!(
                        "   ❓ {} - Upload token unknown to the server (check the web UI)",
                        record.project_name
                    ))
                }
            }

            monitored.push(MonitoredUpload {
                record: record.clone(),
                outcome,
            });
        }
        self.progress_reporter.report_progress(total, total, None);

        monitored
    }

    /// Polls one upload token
    ///
    /// A "not found" answer ends polling; any other failed status query
    /// counts as "still processing" for that attempt.
    pub async fn await_one(&self, record: &UploadRecord) -> ProcessingOutcome {
        let max_attempts = self.policy.max_attempts;

        for attempt in 1..=max_attempts {
            match self.inventory.processing_status(&record.token).await {
                Ok(status) if !status.processing => {
                    return ProcessingOutcome::Completed { attempts: attempt };
                }
                Ok(_) => {}
                Err(e)
                    if matches!(
                        e.downcast_ref::<InventoryError>(),
                        Some(InventoryError::NotFound { .. })
                    ) =>
                {
                    tracing::debug!(token = %record.token, attempt, "upload token not found");
                    return ProcessingOutcome::TokenUnknown { attempts: attempt };
                }
                Err(e) => {
                    tracing::debug!(token = %record.token, attempt, error = %e, "status query failed");
                }
            }

            if attempt < max_attempts && !self.policy.interval.is_zero() {
                tokio::time::sleep(self.policy.interval).await;
            }
        }

        ProcessingOutcome::StillProcessing {
            attempts: max_attempts,
        }
    }
}
