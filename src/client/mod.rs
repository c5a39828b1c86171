//! Typed client for the EmailListVerify API.
//!
//! Every operation maps to exactly one [`ApiRequest`], except for the batch
//! runner and the bulk poll loop which are sequential loops over the single
//! calls (see [`batch`] and [`poll`]).

pub mod batch;
pub mod poll;

pub use poll::PollOptions;

use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use crate::core::models::{now_timestamp, BulkStatus, ResultType, VerificationResult, VerifyOutcome};
use crate::transport::decode::truncate_for_log;
use crate::transport::{decode, ApiRequest, Decoded, Endpoint, FileUpload, HttpTransport, Transport};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// API credential. Never empty; redacted in debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Config("API secret is required".to_string()));
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Client for the EmailListVerify API.
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Clone)]
pub struct ApiClient {
    secret: Secret,
    transport: Arc<dyn Transport>,
    config: Config,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("secret", &self.secret)
            .field("config", &self.config)
            .finish()
    }
}

impl ApiClient {
    /// Creates a client with the default 30 second request timeout.
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        Self::from_config(secret, &Config::default())
    }

    /// Creates a client whose requests time out after `timeout_secs`.
    pub fn with_timeout(secret: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        if timeout_secs == 0 {
            return Err(AppError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        let config = Config {
            request_timeout: Duration::from_secs(timeout_secs),
            ..Config::default()
        };
        Self::from_config(secret, &config)
    }

    pub fn from_config(secret: impl Into<String>, config: &Config) -> Result<Self> {
        let secret = Secret::new(secret)?;
        let transport = HttpTransport::new(config)?;
        Ok(Self {
            secret,
            transport: Arc::new(transport),
            config: config.clone(),
        })
    }

    /// Creates a client that sends through a caller-supplied transport.
    pub fn with_transport(
        secret: impl Into<String>,
        config: &Config,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        Ok(Self {
            secret: Secret::new(secret)?,
            transport,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Verifies one address.
    ///
    /// A plain-text verdict is wrapped into a [`VerificationResult`]; a JSON
    /// object is returned as is.
    pub async fn verify_email(&self, email: &str) -> Result<VerifyOutcome> {
        require_non_empty(email, "email")?;
        let request = ApiRequest::new(Endpoint::VerifyEmail).query("email", email);
        match self.call(request).await? {
            Decoded::Text(status) => {
                tracing::debug!(target: "elv_client", "[{}] verdict: {}", email, status);
                Ok(VerifyOutcome::Plain(VerificationResult {
                    email: email.to_string(),
                    status: status.into(),
                    timestamp: now_timestamp(),
                }))
            }
            Decoded::Object(map) => Ok(VerifyOutcome::Json(map)),
            Decoded::Array(_) => Err(AppError::Protocol(
                "verifyEmail returned a JSON array".to_string(),
            )),
        }
    }

    /// Verifies one address and returns every field the provider reports.
    pub async fn verify_email_detailed(&self, email: &str) -> Result<Map<String, Value>> {
        require_non_empty(email, "email")?;
        let request = ApiRequest::new(Endpoint::VerifyEmailDetailed).query("email", email);
        self.call_object(request).await
    }

    /// Returns the account's remaining credits.
    pub async fn get_credits(&self) -> Result<Map<String, Value>> {
        self.call_object(ApiRequest::new(Endpoint::GetCredits)).await
    }

    /// Uploads a CSV file for bulk verification and returns the provider's file id.
    ///
    /// `filename` defaults to `bulk_verify_<unix seconds>.csv`.
    pub async fn bulk_upload(&self, path: impl AsRef<Path>, filename: Option<&str>) -> Result<String> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AppError::NotFound(format!(
                "file '{}' does not exist",
                path.display()
            )));
        }
        let contents = tokio::fs::read(path).await?;
        let filename = match filename {
            Some(name) => name.to_string(),
            None => format!("bulk_verify_{}.csv", chrono::Utc::now().timestamp()),
        };
        tracing::info!(target: "elv_client", "Uploading {} as '{}' ({} bytes)", path.display(), filename, contents.len());

        let request = ApiRequest::new(Endpoint::BulkUpload)
            .query("filename", filename.as_str())
            .upload(FileUpload { filename, contents });

        let file_id = match self.call(request).await? {
            Decoded::Text(text) if !text.is_empty() => text,
            Decoded::Object(map) => match map.get("file_id") {
                Some(Value::String(id)) if !id.is_empty() => id.clone(),
                Some(Value::Number(id)) => id.to_string(),
                _ => {
                    return Err(AppError::Protocol(
                        "upload response has no 'file_id'".to_string(),
                    ))
                }
            },
            other => {
                return Err(AppError::Protocol(format!(
                    "unexpected upload response: {other:?}"
                )))
            }
        };
        tracing::info!(target: "elv_client", "Upload accepted, file id {}", file_id);
        Ok(file_id)
    }

    /// Fetches the provider-side state of a bulk job.
    pub async fn get_bulk_status(&self, file_id: &str) -> Result<BulkStatus> {
        require_non_empty(file_id, "file id")?;
        let request = ApiRequest::new(Endpoint::BulkStatus).query("file_id", file_id);
        BulkStatus::from_map(self.call_object(request).await?)
    }

    /// Downloads a finished bulk job. `result_type` must be `"all"` or `"clean"`.
    ///
    /// The body is returned unmodified, typically CSV.
    pub async fn download_bulk_result(&self, file_id: &str, result_type: &str) -> Result<String> {
        require_non_empty(file_id, "file id")?;
        let result_type: ResultType = result_type.parse()?;
        self.download_bulk_result_as(file_id, result_type).await
    }

    pub async fn download_bulk_result_as(&self, file_id: &str, result_type: ResultType) -> Result<String> {
        require_non_empty(file_id, "file id")?;
        let endpoint = match result_type {
            ResultType::All => Endpoint::DownloadAll,
            ResultType::Clean => Endpoint::DownloadClean,
        };
        let request = ApiRequest::new(endpoint).query("file_id", file_id);
        let body = self.send(request).await?;
        tracing::info!(target: "elv_client", "Downloaded {} result for {} ({} bytes)", result_type.as_str(), file_id, body.len());
        Ok(body)
    }

    /// Attaches the credential, sends, and rejects non-2xx responses.
    async fn send(&self, request: ApiRequest) -> Result<String> {
        let endpoint = request.endpoint;
        let mut request = request;
        request
            .query
            .insert(0, ("secret".to_string(), self.secret.expose().to_string()));

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            tracing::warn!(target: "elv_client", "{} returned HTTP {}", endpoint.path(), response.status);
            return Err(AppError::HttpStatus {
                status: response.status,
                body: truncate_for_log(response.body.trim()),
            });
        }
        Ok(response.body)
    }

    async fn call(&self, request: ApiRequest) -> Result<Decoded> {
        let body = self.send(request).await?;
        Ok(decode(&body))
    }

    async fn call_object(&self, request: ApiRequest) -> Result<Map<String, Value>> {
        let endpoint = request.endpoint;
        match self.call(request).await? {
            Decoded::Object(map) => Ok(map),
            other => Err(AppError::Protocol(format!(
                "{} expected a JSON object, got {:?}",
                endpoint.path(),
                other
            ))),
        }
    }
}

fn require_non_empty(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AppError::Validation(format!("{what} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::core::models::VerificationStatus;
    use crate::testing::{fake_client, FakeTransport};
    use std::io::Write;

    #[test]
    fn empty_secret_is_a_configuration_error() {
        let err = ApiClient::new("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(ApiClient::with_timeout("key", 0).is_err());
        assert!(ApiClient::with_timeout("key", 5).is_ok());
    }

    #[test]
    fn secret_is_redacted_in_debug() {
        let client = ApiClient::new("super-secret").unwrap();
        assert!(!format!("{client:?}").contains("super-secret"));
    }

    #[tokio::test]
    async fn plain_text_verdict_is_wrapped() {
        let transport = FakeTransport::new();
        transport.ok("ok\n");
        let client = fake_client(&transport);

        let outcome = client.verify_email("user@example.com").await.unwrap();
        match outcome {
            VerifyOutcome::Plain(result) => {
                assert_eq!(result.email, "user@example.com");
                assert_eq!(result.status, VerificationStatus::Ok);
                assert!(!result.timestamp.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].endpoint, Endpoint::VerifyEmail);
        assert_eq!(requests[0].param("secret"), Some("test-secret"));
        assert_eq!(requests[0].param("email"), Some("user@example.com"));
    }

    #[tokio::test]
    async fn json_verdict_is_returned_unmodified() {
        let transport = FakeTransport::new();
        transport.ok(r#"{"email":"a@b.com","result":"ok","score":9}"#);
        let client = fake_client(&transport);

        match client.verify_email("a@b.com").await.unwrap() {
            VerifyOutcome::Json(map) => {
                assert_eq!(map.len(), 3);
                assert_eq!(map["score"], 9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_status_token_passes_through() {
        let transport = FakeTransport::new();
        transport.ok("antispam_system");
        let client = fake_client(&transport);

        let outcome = client.verify_email("a@b.com").await.unwrap();
        assert_eq!(
            outcome.status(),
            Some(VerificationStatus::Other("antispam_system".into()))
        );
    }

    #[tokio::test]
    async fn empty_email_never_reaches_the_network() {
        let transport = FakeTransport::new();
        let client = fake_client(&transport);

        let err = client.verify_email("").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = client.verify_email_detailed("").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn non_2xx_is_a_request_error() {
        let transport = FakeTransport::new();
        transport.reply(401, "bad key");
        let client = fake_client(&transport);

        let err = client.get_credits().await.unwrap_err();
        assert!(err.is_request_error());
        assert!(matches!(err, AppError::HttpStatus { status: 401, .. }));
    }

    #[tokio::test]
    async fn transport_failure_is_a_request_error() {
        let transport = FakeTransport::new();
        transport.fail("connection refused");
        let client = fake_client(&transport);

        let err = client.verify_email("a@b.com").await.unwrap_err();
        assert!(err.is_request_error());
    }

    #[tokio::test]
    async fn detailed_and_credits_return_objects() {
        let transport = FakeTransport::new();
        transport
            .ok(r#"{"email":"a@b.com","domain":"b.com","mx_found":true}"#)
            .ok(r#"{"credits": 1200}"#)
            .ok("not json");
        let client = fake_client(&transport);

        let detailed = client.verify_email_detailed("a@b.com").await.unwrap();
        assert_eq!(detailed["mx_found"], true);
        let credits = client.get_credits().await.unwrap();
        assert_eq!(credits["credits"], 1200);

        let err = client.get_credits().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);

        let credit_request = &transport.requests()[1];
        assert_eq!(credit_request.endpoint, Endpoint::GetCredits);
        assert_eq!(credit_request.query.len(), 1);
    }

    #[tokio::test]
    async fn upload_missing_file_is_not_found() {
        let transport = FakeTransport::new();
        let client = fake_client(&transport);

        let err = client
            .bulk_upload("/no/such/file.csv", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn upload_accepts_text_or_file_id_object() {
        let mut csv = tempfile::NamedTempFile::new().unwrap();
        writeln!(csv, "email\na@b.com").unwrap();

        let transport = FakeTransport::new();
        transport
            .ok("  98765\n")
            .ok(r#"{"file_id": "abc-1"}"#)
            .ok(r#"{"message": "queued"}"#);
        let client = fake_client(&transport);

        let id = client.bulk_upload(csv.path(), Some("mine.csv")).await.unwrap();
        assert_eq!(id, "98765");
        let id = client.bulk_upload(csv.path(), None).await.unwrap();
        assert_eq!(id, "abc-1");
        let err = client.bulk_upload(csv.path(), None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);

        let requests = transport.requests();
        assert_eq!(requests[0].endpoint, Endpoint::BulkUpload);
        assert_eq!(requests[0].param("filename"), Some("mine.csv"));
        let upload = requests[0].upload.as_ref().unwrap();
        assert_eq!(upload.contents, b"email\na@b.com\n");

        let default_name = requests[1].param("filename").unwrap();
        assert!(default_name.starts_with("bulk_verify_"));
        assert!(default_name.ends_with(".csv"));
    }

    #[tokio::test]
    async fn bulk_status_requires_file_id() {
        let transport = FakeTransport::new();
        transport.ok(r#"{"status":"processing","progress":10}"#);
        let client = fake_client(&transport);

        let err = client.get_bulk_status("").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let status = client.get_bulk_status("f1").await.unwrap();
        assert_eq!(status.status, "processing");
        assert_eq!(transport.requests()[0].param("file_id"), Some("f1"));
    }

    #[tokio::test]
    async fn download_routes_by_result_type() {
        let transport = FakeTransport::new();
        transport.ok("email,result\na@b.com,ok\n").ok("email\na@b.com\n");
        let client = fake_client(&transport);

        let all = client.download_bulk_result("f1", "all").await.unwrap();
        assert_eq!(all, "email,result\na@b.com,ok\n");
        let clean = client.download_bulk_result("f1", "clean").await.unwrap();
        assert_eq!(clean, "email\na@b.com\n");

        assert_eq!(
            transport.endpoints(),
            vec![Endpoint::DownloadAll, Endpoint::DownloadClean]
        );
    }

    #[tokio::test]
    async fn bogus_result_type_never_reaches_the_network() {
        let transport = FakeTransport::new();
        let client = fake_client(&transport);

        for id in ["f1", ""] {
            let err = client.download_bulk_result(id, "bogus").await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        assert_eq!(transport.request_count(), 0);
    }
}
