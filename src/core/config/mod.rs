//! Defines the core runtime `Config` struct, its defaults, and related utilities.
//! Submodules handle loading, building, and validation.

pub(crate) mod builder;
pub(crate) mod file;
pub(crate) mod loading;
pub(crate) mod validation;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;
pub use loading::load_config_file;

use std::time::Duration;
use url::Url;

/// Production endpoint of the EmailListVerify API.
pub const DEFAULT_BASE_URL: &str = "https://apps.emaillistverify.com/api";

/// Runtime configuration settings used by the client.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub request_timeout: Duration,
    pub user_agent: String,

    pub max_batch_size: usize,
    pub batch_pause: Duration,

    pub check_interval: Duration,
    pub max_wait: Duration,

    pub loaded_config_path: Option<String>,
}

impl Config {
    fn build_default() -> Self {
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .expect("Default base URL failed to parse. This is a bug.");

        Config {
            base_url,
            request_timeout: Duration::from_secs(30),
            user_agent: format!("emaillistverify-rs/{}", env!("CARGO_PKG_VERSION")),
            max_batch_size: 100,
            batch_pause: Duration::from_millis(100),
            check_interval: Duration::from_secs(10),
            max_wait: Duration::from_secs(3600),
            loaded_config_path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::build_default()
    }
}
