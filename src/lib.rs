//! Client library for the EmailListVerify email verification API.
//!
//! * [`ApiClient`] wraps the single-address, credit and bulk-file endpoints,
//!   plus sequential batch verification and bulk status polling.
//! * [`BulkManager`] drives the upload → wait → download workflow and keeps
//!   track of the jobs it started.
//! * [`utils`] holds offline syntax and domain checks.
//!
//! ```no_run
//! use emaillistverify::{ApiClient, BulkManager};
//!
//! # async fn run() -> emaillistverify::Result<()> {
//! let client = ApiClient::new("my-secret")?;
//! let outcome = client.verify_email("someone@example.com").await?;
//! println!("{:?}", outcome.status());
//!
//! let manager = BulkManager::new(client);
//! let job = manager.process_csv_file("in.csv", "out.csv", true).await?;
//! println!("job {} finished at {:?}", job.file_id, job.end_time);
//! # Ok(())
//! # }
//! ```

pub mod bulk;
pub mod client;
pub mod core;
pub mod transport;
pub mod utils;

#[cfg(test)]
mod testing;

pub use bulk::BulkManager;
pub use client::{ApiClient, PollOptions, Secret};
pub use crate::core::config::{Config, ConfigBuilder, ConfigFile, DEFAULT_BASE_URL};
pub use crate::core::error::{AppError, ErrorKind, Result};
pub use crate::core::models::{
    BatchEntry, BatchFailure, BulkJob, BulkStatus, JobState, ResultType, VerificationResult,
    VerificationStatus, VerifyOutcome,
};
pub use transport::{ApiRequest, ApiResponse, Endpoint, HttpTransport, Transport};
