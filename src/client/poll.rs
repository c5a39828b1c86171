//! Fixed-interval polling of bulk job status.

use super::ApiClient;
use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use crate::core::models::BulkStatus;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Interval and budget for [`ApiClient::wait_for_bulk_completion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub check_interval: Duration,
    pub max_wait: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(10),
            max_wait: Duration::from_secs(3600),
        }
    }
}

impl From<&Config> for PollOptions {
    fn from(config: &Config) -> Self {
        Self {
            check_interval: config.check_interval,
            max_wait: config.max_wait,
        }
    }
}

impl ApiClient {
    /// Polls the job until the provider reports `completed` or `failed`.
    ///
    /// The budget is checked before each poll, so a slow final poll may run
    /// past `max_wait`. Returns the first `completed` status; a `failed`
    /// status is a request error carrying the provider's message.
    pub async fn wait_for_bulk_completion(
        &self,
        file_id: &str,
        options: &PollOptions,
    ) -> Result<BulkStatus> {
        let start_time = Instant::now();
        let mut polls = 0u32;

        while start_time.elapsed() < options.max_wait {
            let status = self.get_bulk_status(file_id).await?;
            polls += 1;

            if status.is_completed() {
                tracing::info!(target: "elv_client", "Bulk job {} completed after {} poll(s) in {:.2?}", file_id, polls, start_time.elapsed());
                return Ok(status);
            }
            if status.is_failed() {
                let reason = status.error().unwrap_or("Unknown error").to_string();
                tracing::error!(target: "elv_client", "Bulk job {} failed: {}", file_id, reason);
                return Err(AppError::Request(reason));
            }

            tracing::debug!(
                target: "elv_client",
                "Bulk job {} is '{}' (progress {:?}), next poll in {:?}",
                file_id,
                status.status,
                status.progress(),
                options.check_interval
            );
            sleep(options.check_interval).await;
        }

        tracing::warn!(target: "elv_client", "Gave up on bulk job {} after {} poll(s)", file_id, polls);
        Err(AppError::Timeout {
            file_id: file_id.to_string(),
            waited: options.max_wait,
        })
    }
}
