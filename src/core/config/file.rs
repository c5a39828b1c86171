//! Defines the structure mirroring the TOML configuration file format.

use serde::Deserialize;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub(crate) api: ApiConfig,
    #[serde(default)]
    pub(crate) batch: BatchConfig,
    #[serde(default)]
    pub(crate) bulk: BulkConfig,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ApiConfig {
    pub(crate) base_url: Option<String>,
    /// Seconds.
    pub(crate) request_timeout: Option<u64>,
    pub(crate) user_agent: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct BatchConfig {
    pub(crate) max_batch_size: Option<usize>,
    pub(crate) pause_ms: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct BulkConfig {
    /// Seconds between status polls.
    pub(crate) check_interval: Option<u64>,
    /// Seconds.
    pub(crate) max_wait: Option<u64>,
}
