//! Value types exchanged with the EmailListVerify API.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

use crate::core::error::{AppError, Result};

/// Current UTC time in the RFC 3339 form used for result timestamps.
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Verification verdict returned by the provider.
///
/// Unknown tokens are kept as [`VerificationStatus::Other`] so that new
/// provider statuses pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VerificationStatus {
    Ok,
    Invalid,
    InvalidMx,
    AcceptAll,
    OkForAll,
    Disposable,
    Role,
    EmailDisabled,
    DeadServer,
    Unknown,
    Other(String),
}

impl VerificationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            VerificationStatus::Ok => "ok",
            VerificationStatus::Invalid => "invalid",
            VerificationStatus::InvalidMx => "invalid_mx",
            VerificationStatus::AcceptAll => "accept_all",
            VerificationStatus::OkForAll => "ok_for_all",
            VerificationStatus::Disposable => "disposable",
            VerificationStatus::Role => "role",
            VerificationStatus::EmailDisabled => "email_disabled",
            VerificationStatus::DeadServer => "dead_server",
            VerificationStatus::Unknown => "unknown",
            VerificationStatus::Other(raw) => raw,
        }
    }

    /// Whether the token is one of the documented provider statuses.
    pub fn is_known(&self) -> bool {
        !matches!(self, VerificationStatus::Other(_))
    }
}

impl From<&str> for VerificationStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "ok" => VerificationStatus::Ok,
            "invalid" => VerificationStatus::Invalid,
            "invalid_mx" => VerificationStatus::InvalidMx,
            "accept_all" => VerificationStatus::AcceptAll,
            "ok_for_all" => VerificationStatus::OkForAll,
            "disposable" => VerificationStatus::Disposable,
            "role" => VerificationStatus::Role,
            "email_disabled" => VerificationStatus::EmailDisabled,
            "dead_server" => VerificationStatus::DeadServer,
            "unknown" => VerificationStatus::Unknown,
            other => VerificationStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for VerificationStatus {
    fn from(raw: String) -> Self {
        VerificationStatus::from(raw.as_str())
    }
}

impl From<VerificationStatus> for String {
    fn from(status: VerificationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a simple verification answered in plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub email: String,
    pub status: VerificationStatus,
    pub timestamp: String,
}

/// What `verifyEmail` returned: a wrapped plain-text verdict, or a JSON object
/// passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VerifyOutcome {
    Plain(VerificationResult),
    Json(Map<String, Value>),
}

impl VerifyOutcome {
    pub fn email(&self) -> Option<&str> {
        match self {
            VerifyOutcome::Plain(result) => Some(&result.email),
            VerifyOutcome::Json(map) => map.get("email").and_then(Value::as_str),
        }
    }

    pub fn status(&self) -> Option<VerificationStatus> {
        match self {
            VerifyOutcome::Plain(result) => Some(result.status.clone()),
            VerifyOutcome::Json(map) => map
                .get("status")
                .and_then(Value::as_str)
                .map(VerificationStatus::from),
        }
    }
}

/// Per-item failure recorded by a batch run instead of aborting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub email: String,
    /// Always `"error"`.
    pub status: String,
    pub error: String,
    pub timestamp: String,
}

impl BatchFailure {
    pub fn new(email: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            status: "error".to_string(),
            error: error.into(),
            timestamp: now_timestamp(),
        }
    }
}

/// One row of a batch run, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Verified(VerifyOutcome),
    Failed(BatchFailure),
}

impl BatchEntry {
    pub fn email(&self) -> Option<&str> {
        match self {
            BatchEntry::Verified(outcome) => outcome.email(),
            BatchEntry::Failed(failure) => Some(&failure.email),
        }
    }

    /// Status token of the row; `"error"` for failed rows.
    pub fn status(&self) -> Option<String> {
        match self {
            BatchEntry::Verified(outcome) => outcome.status().map(String::from),
            BatchEntry::Failed(failure) => Some(failure.status.clone()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, BatchEntry::Failed(_))
    }
}

/// Provider-reported state of a bulk job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkStatus {
    pub status: String,
    /// Progress counters and any other provider fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl BulkStatus {
    /// Builds a status from a decoded JSON object, which must carry a string `status`.
    pub fn from_map(mut map: Map<String, Value>) -> Result<Self> {
        let status = match map.remove("status") {
            Some(Value::String(status)) => status,
            Some(other) => {
                return Err(AppError::Protocol(format!(
                    "bulk status field is not a string: {other}"
                )))
            }
            None => {
                return Err(AppError::Protocol(
                    "bulk status response has no 'status' field".to_string(),
                ))
            }
        };
        Ok(Self {
            status,
            fields: map,
        })
    }

    pub fn is_completed(&self) -> bool {
        self.status == "completed"
    }

    pub fn is_failed(&self) -> bool {
        self.status == "failed"
    }

    pub fn is_terminal(&self) -> bool {
        self.is_completed() || self.is_failed()
    }

    /// Provider error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.fields.get("error").and_then(Value::as_str)
    }

    pub fn progress(&self) -> Option<f64> {
        self.number_field("progress")
    }

    pub fn total(&self) -> Option<u64> {
        self.number_field("total").map(|n| n as u64)
    }

    pub fn processed(&self) -> Option<u64> {
        self.number_field("processed").map(|n| n as u64)
    }

    fn number_field(&self, key: &str) -> Option<f64> {
        match self.fields.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Which result file to download for a finished bulk job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    #[default]
    All,
    Clean,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::All => "all",
            ResultType::Clean => "clean",
        }
    }
}

impl std::str::FromStr for ResultType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(ResultType::All),
            "clean" => Ok(ResultType::Clean),
            other => Err(AppError::Validation(format!(
                "result type must be 'all' or 'clean', got '{other}'"
            ))),
        }
    }
}

/// Local lifecycle of a tracked bulk job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Processing,
    Completed,
}

/// A bulk job tracked by a [`crate::bulk::BulkManager`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkJob {
    pub file_id: String,
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub status: JobState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_status: Option<BulkStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status: Option<BulkStatus>,
}

impl BulkJob {
    pub(crate) fn started(
        file_id: impl Into<String>,
        input_file: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            file_id: file_id.into(),
            input_file: input_file.into(),
            output_file: output_file.into(),
            start_time: Utc::now(),
            end_time: None,
            status: JobState::Processing,
            final_status: None,
            last_status: None,
        }
    }
}
