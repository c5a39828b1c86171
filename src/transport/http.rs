//! reqwest-backed [`Transport`].

use super::decode::truncate_for_log;
use super::{ApiRequest, ApiResponse, Method, Transport};
use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Instant;
use url::Url;

/// Multipart field carrying the uploaded CSV.
const UPLOAD_FIELD: &str = "file_contents";

/// Issues requests against the configured base URL with a per-request timeout
/// and the configured user agent.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint_url(&self, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Config(format!("base URL '{}' cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .push(path);
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let path = request.endpoint.path();
        let url = self.endpoint_url(path)?;

        let builder = match request.endpoint.method() {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        let mut builder = builder.query(&request.query);

        if let Some(upload) = request.upload {
            tracing::debug!(target: "elv_transport", "Attaching '{}' ({} bytes)", upload.filename, upload.contents.len());
            let part = Part::bytes(upload.contents)
                .file_name(upload.filename)
                .mime_str("text/csv")?;
            builder = builder.multipart(Form::new().part(UPLOAD_FIELD, part));
        }

        tracing::debug!(target: "elv_transport", "{:?} {}", request.endpoint.method(), path);
        let start_time = Instant::now();

        // The URL carries the secret, strip it from any error we surface.
        let response = builder.send().await.map_err(|e| {
            let e = e.without_url();
            tracing::warn!(target: "elv_transport", "{} failed after {:.2?}: {}", path, start_time.elapsed(), e);
            AppError::Http(e)
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Http(e.without_url()))?;

        tracing::debug!(
            target: "elv_transport",
            "{} -> {} in {:.2?}: {}",
            path,
            status,
            start_time.elapsed(),
            truncate_for_log(&body)
        );
        Ok(ApiResponse { status, body })
    }
}
