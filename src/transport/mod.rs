//! The seam between the API client and the network.
//!
//! [`ApiClient`](crate::client::ApiClient) describes each call as an
//! [`ApiRequest`] and hands it to a [`Transport`]. [`HttpTransport`] is the
//! reqwest-backed implementation; tests substitute their own.

pub mod decode;
pub mod http;

pub use decode::{decode, Decoded};
pub use http::HttpTransport;

use crate::core::error::Result;
use async_trait::async_trait;

/// Remote operations exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    VerifyEmail,
    VerifyEmailDetailed,
    GetCredits,
    BulkUpload,
    BulkStatus,
    DownloadAll,
    DownloadClean,
}

impl Endpoint {
    /// Path segment appended to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::VerifyEmail => "verifyEmail",
            Endpoint::VerifyEmailDetailed => "verifyEmailDetailed",
            Endpoint::GetCredits => "getCredits",
            Endpoint::BulkUpload => "verifApiFile",
            Endpoint::BulkStatus => "getApiFileInfo",
            Endpoint::DownloadAll => "downloadApiFile",
            Endpoint::DownloadClean => "downloadCleanFile",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::BulkUpload => Method::Post,
            _ => Method::Get,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// File part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub contents: Vec<u8>,
}

/// A single outbound call: endpoint, query parameters and optional file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub query: Vec<(String, String)>,
    pub upload: Option<FileUpload>,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            query: Vec::new(),
            upload: None,
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn upload(mut self, upload: FileUpload) -> Self {
        self.upload = Some(upload);
        self
    }

    /// Looks up a query parameter by name.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw outcome of a request that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the raw status and body.
///
/// Implementations report connection-level failures as errors and must not
/// interpret the status code; that is the client's job.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}
