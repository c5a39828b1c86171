//! Sanity checks applied to a fully built [`Config`].

use super::Config;
use crate::core::error::{AppError, Result};

pub(crate) fn validate_config(config: &Config) -> Result<()> {
    if config.request_timeout.is_zero() {
        return Err(AppError::Config(
            "request timeout must be greater than zero".to_string(),
        ));
    }
    if config.max_batch_size == 0 {
        return Err(AppError::Config(
            "max batch size must be greater than zero".to_string(),
        ));
    }
    if config.check_interval.is_zero() {
        return Err(AppError::Config(
            "bulk check interval must be greater than zero".to_string(),
        ));
    }
    if config.user_agent.trim().is_empty() {
        return Err(AppError::Config("user agent must not be empty".to_string()));
    }

    match config.base_url.scheme() {
        "https" => {}
        // Plain HTTP only for local test servers.
        "http" if is_loopback(config.base_url.host_str()) => {
            tracing::warn!("Using plain HTTP base URL {}", config.base_url);
        }
        other => {
            return Err(AppError::Config(format!(
                "base URL must use https, got '{other}'"
            )))
        }
    }
    if config.base_url.cannot_be_a_base() {
        return Err(AppError::Config(format!(
            "base URL '{}' cannot carry endpoint paths",
            config.base_url
        )));
    }
    Ok(())
}

fn is_loopback(host: Option<&str>) -> bool {
    matches!(host, Some("localhost" | "127.0.0.1" | "[::1]"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;

    #[test]
    fn zero_timeout_is_rejected() {
        let config = Config {
            request_timeout: Duration::ZERO,
            ..Config::default()
        };
        assert!(matches!(validate_config(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn plain_http_only_for_loopback() {
        let remote = Config {
            base_url: Url::parse("http://example.test/api").unwrap(),
            ..Config::default()
        };
        assert!(validate_config(&remote).is_err());

        let local = Config {
            base_url: Url::parse("http://127.0.0.1:8080").unwrap(),
            ..Config::default()
        };
        assert!(validate_config(&local).is_ok());
    }
}
