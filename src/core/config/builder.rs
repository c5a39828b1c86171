//! Layers defaults, the config file and explicit overrides into a [`Config`].

use super::file::ConfigFile;
use super::validation::validate_config;
use super::Config;
use crate::core::error::Result;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Builds a validated [`Config`]. Later calls override earlier ones.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
    base_url: Option<String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies every value present in a parsed configuration file.
    pub fn with_file(mut self, file: &ConfigFile, source: Option<&Path>) -> Self {
        if let Some(url) = &file.api.base_url {
            self.base_url = Some(url.clone());
        }
        if let Some(secs) = file.api.request_timeout {
            self.config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = &file.api.user_agent {
            self.config.user_agent = agent.clone();
        }
        if let Some(size) = file.batch.max_batch_size {
            self.config.max_batch_size = size;
        }
        if let Some(ms) = file.batch.pause_ms {
            self.config.batch_pause = Duration::from_millis(ms);
        }
        if let Some(secs) = file.bulk.check_interval {
            self.config.check_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = file.bulk.max_wait {
            self.config.max_wait = Duration::from_secs(secs);
        }
        self.config.loaded_config_path = source.map(|p| p.display().to_string());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    pub fn max_batch_size(mut self, size: usize) -> Self {
        self.config.max_batch_size = size;
        self
    }

    pub fn batch_pause(mut self, pause: Duration) -> Self {
        self.config.batch_pause = pause;
        self
    }

    pub fn check_interval(mut self, interval: Duration) -> Self {
        self.config.check_interval = interval;
        self
    }

    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.config.max_wait = max_wait;
        self
    }

    pub fn build(self) -> Result<Config> {
        let mut config = self.config;
        if let Some(raw) = self.base_url {
            config.base_url = Url::parse(raw.trim_end_matches('/'))?;
        }
        validate_config(&config)?;
        tracing::debug!("Built configuration: {:?}", config);
        Ok(config)
    }
}
