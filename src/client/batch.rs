//! Sequential verification of many addresses.

use super::ApiClient;
use crate::core::error::{AppError, Result};
use crate::core::models::{BatchEntry, BatchFailure};
use std::time::Instant;
use tokio::time::sleep;

impl ApiClient {
    /// Verifies `emails` one at a time, in order.
    ///
    /// The list is walked in chunks of at most `max_batch_size` for logging and
    /// pacing only; every address is still a separate request. After each
    /// successful verification the client pauses for the configured batch pause.
    ///
    /// Request failures become [`BatchEntry::Failed`] rows and the run carries
    /// on. Any other error (an empty address, say) aborts the run.
    pub async fn verify_batch<S: AsRef<str>>(
        &self,
        emails: &[S],
        max_batch_size: usize,
    ) -> Result<Vec<BatchEntry>> {
        if max_batch_size == 0 {
            return Err(AppError::Validation(
                "max batch size must be greater than zero".to_string(),
            ));
        }

        let pause = self.config.batch_pause;
        let chunk_count = emails.len().div_ceil(max_batch_size);
        let start_time = Instant::now();
        let mut results = Vec::with_capacity(emails.len());
        let mut failures = 0usize;

        tracing::info!(target: "elv_client", "Verifying {} addresses in {} chunk(s)", emails.len(), chunk_count);

        for (index, chunk) in emails.chunks(max_batch_size).enumerate() {
            tracing::debug!(target: "elv_client", "Chunk {}/{} ({} addresses)", index + 1, chunk_count, chunk.len());

            for email in chunk {
                let email = email.as_ref();
                match self.verify_email(email).await {
                    Ok(outcome) => {
                        results.push(BatchEntry::Verified(outcome));
                        sleep(pause).await;
                    }
                    Err(e) if e.is_request_error() => {
                        tracing::warn!(target: "elv_client", "[{}] verification failed: {}", email, e);
                        failures += 1;
                        results.push(BatchEntry::Failed(BatchFailure::new(email, e.detail())));
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        tracing::info!(
            target: "elv_client",
            "Batch finished in {:.2?}: {} verified, {} failed",
            start_time.elapsed(),
            results.len() - failures,
            failures
        );
        Ok(results)
    }
}
