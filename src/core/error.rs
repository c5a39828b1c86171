//! Defines the custom error types for the emaillistverify client.

use std::{io, time::Duration};
use thiserror::Error;
use url::ParseError as UrlParseError;

/// The primary error type for every client operation.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid credential, or an unusable configuration value.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// A required argument was empty or malformed. Raised before any network call.
    #[error("Validation Error: {0}")]
    Validation(String),

    /// A referenced local file or tracked job does not exist.
    #[error("Not Found: {0}")]
    NotFound(String),

    /// The request failed, or the provider signalled a failure.
    #[error("Request Error: {0}")]
    Request(String),

    /// The provider answered with a non-2xx HTTP status.
    #[error("HTTP Status Error: status={status}, body='{body}'")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// The (truncated) response body.
        body: String,
    },

    /// Error making HTTP requests via reqwest.
    #[error("HTTP Request Error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response did not match any expected shape.
    #[error("Protocol Error: {0}")]
    Protocol(String),

    /// The bulk polling budget ran out before the job reached a terminal state.
    #[error("Timeout Error: bulk job '{file_id}' did not finish within {waited:?}")]
    Timeout {
        /// The bulk job being waited on.
        file_id: String,
        /// The configured maximum wait.
        waited: Duration,
    },

    /// Error related to local file input/output operations.
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    /// Error during JSON serialization or deserialization.
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing a URL.
    #[error("URL Parsing Error: {0}")]
    UrlParse(#[from] UrlParseError),

    /// Error parsing the TOML configuration file.
    #[error("Config File Parsing Error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Coarse classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Validation,
    NotFound,
    Request,
    Protocol,
    Timeout,
    Io,
}

impl AppError {
    /// Maps the error onto the kind callers branch on.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Config(_) | AppError::UrlParse(_) | AppError::TomlParse(_) => {
                ErrorKind::Configuration
            }
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Request(_) | AppError::HttpStatus { .. } | AppError::Http(_) => {
                ErrorKind::Request
            }
            AppError::Protocol(_) | AppError::Json(_) => ErrorKind::Protocol,
            AppError::Timeout { .. } => ErrorKind::Timeout,
            AppError::Io(_) => ErrorKind::Io,
        }
    }

    /// True for transport failures, non-2xx statuses and provider-signalled failures.
    pub fn is_request_error(&self) -> bool {
        self.kind() == ErrorKind::Request
    }

    /// The message without the variant prefix, as recorded in batch error entries.
    pub fn detail(&self) -> String {
        match self {
            AppError::Request(msg) => msg.clone(),
            AppError::HttpStatus { status, body } => format!("HTTP {status}: {body}"),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
