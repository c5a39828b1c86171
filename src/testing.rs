//! Scripted [`Transport`] used by the unit tests.

use crate::client::ApiClient;
use crate::core::config::{Config, ConfigBuilder};
use crate::core::error::{AppError, Result};
use crate::transport::{ApiRequest, ApiResponse, Endpoint, Transport};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

enum Scripted {
    Reply(ApiResponse),
    Fail(String),
}

/// Replays queued replies in order and records every request it receives.
#[derive(Default)]
pub(crate) struct FakeTransport {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn reply(&self, status: u16, body: &str) -> &Self {
        self.replies
            .lock()
            .push_back(Scripted::Reply(ApiResponse::new(status, body)));
        self
    }

    pub(crate) fn ok(&self, body: &str) -> &Self {
        self.reply(200, body)
    }

    /// Queues a transport-level failure.
    pub(crate) fn fail(&self, message: &str) -> &Self {
        self.replies
            .lock()
            .push_back(Scripted::Fail(message.to_string()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn endpoints(&self) -> Vec<Endpoint> {
        self.requests.lock().iter().map(|r| r.endpoint).collect()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().push(request);
        match self.replies.lock().pop_front() {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(AppError::Request(message)),
            None => Err(AppError::Request("no scripted reply left".to_string())),
        }
    }
}

pub(crate) fn test_config() -> Config {
    ConfigBuilder::new()
        .check_interval(Duration::from_secs(10))
        .build()
        .expect("default test config")
}

pub(crate) fn fake_client(transport: &Arc<FakeTransport>) -> ApiClient {
    ApiClient::with_transport("test-secret", &test_config(), transport.clone())
        .expect("fake client")
}
