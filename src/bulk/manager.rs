//! Upload → poll → download orchestration for bulk verification jobs.

use crate::client::{ApiClient, PollOptions};
use crate::core::error::{AppError, Result};
use crate::core::models::{BulkJob, JobState, ResultType};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;

/// Tracks the bulk jobs it started, keyed by provider file id.
///
/// Jobs live only as long as the manager. The job map sits behind a mutex so
/// the manager can be shared across tasks; the lock is never held across a
/// request.
#[derive(Debug)]
pub struct BulkManager {
    client: ApiClient,
    poll: PollOptions,
    jobs: Mutex<HashMap<String, BulkJob>>,
}

impl BulkManager {
    /// Creates a manager polling with the client's configured interval and budget.
    pub fn new(client: ApiClient) -> Self {
        let poll = PollOptions::from(client.config());
        Self::with_poll_options(client, poll)
    }

    pub fn with_poll_options(client: ApiClient, poll: PollOptions) -> Self {
        Self {
            client,
            poll,
            jobs: Mutex::new(HashMap::new()),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Uploads `input_file` and, when `wait_for_completion` is set, waits for
    /// the job and writes the full result to `output_file`, replacing it.
    ///
    /// Errors from any stage are returned as is; the job record keeps whatever
    /// state it last reached.
    pub async fn process_csv_file(
        &self,
        input_file: impl AsRef<Path>,
        output_file: impl AsRef<Path>,
        wait_for_completion: bool,
    ) -> Result<BulkJob> {
        let input_file = input_file.as_ref();
        let output_file = output_file.as_ref();

        let file_id = self.client.bulk_upload(input_file, None).await?;
        let job = BulkJob::started(file_id.clone(), input_file, output_file);
        self.jobs.lock().insert(file_id.clone(), job.clone());
        tracing::info!(target: "elv_bulk", "Tracking bulk job {} for {}", file_id, input_file.display());

        if !wait_for_completion {
            return Ok(job);
        }

        let final_status = self
            .client
            .wait_for_bulk_completion(&file_id, &self.poll)
            .await?;
        let content = self
            .client
            .download_bulk_result_as(&file_id, ResultType::All)
            .await?;
        tokio::fs::write(output_file, content.as_bytes()).await?;
        tracing::info!(target: "elv_bulk", "Wrote {} bytes of results to {}", content.len(), output_file.display());

        let mut jobs = self.jobs.lock();
        let job = jobs
            .entry(file_id.clone())
            .or_insert_with(|| BulkJob::started(file_id.clone(), input_file, output_file));
        job.status = JobState::Completed;
        job.end_time = Some(Utc::now());
        job.final_status = Some(final_status);
        Ok(job.clone())
    }

    /// Refreshes a tracked job from the provider and records the result as its
    /// `last_status`.
    pub async fn get_job_status(&self, file_id: &str) -> Result<BulkJob> {
        if !self.jobs.lock().contains_key(file_id) {
            return Err(AppError::NotFound(format!("unknown job id '{file_id}'")));
        }

        let status = self.client.get_bulk_status(file_id).await?;
        tracing::debug!(target: "elv_bulk", "Job {} is '{}'", file_id, status.status);

        let mut jobs = self.jobs.lock();
        let job = jobs
            .get_mut(file_id)
            .ok_or_else(|| AppError::NotFound(format!("unknown job id '{file_id}'")))?;
        job.last_status = Some(status);
        Ok(job.clone())
    }

    /// Snapshot of every tracked job.
    pub fn get_active_jobs(&self) -> HashMap<String, BulkJob> {
        self.jobs.lock().clone()
    }
}
