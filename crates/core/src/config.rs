//! Site runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! services. Request handlers never read process-wide environment
//! variables, which keeps behaviour consistent across multi-threaded
//! runtimes and test harnesses.

use std::time::Duration;

use storyblok::cdn::{DEFAULT_CDN_BASE_URL, DEFAULT_TIMEOUT};
use storyblok::{CdnClient, FetchResult, Version};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Content-delivery configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    cdn_base_url: String,
    cdn_token: String,
    version: Version,
    http_timeout: Duration,
}

impl SiteConfig {
    /// Create a new `SiteConfig`.
    ///
    /// An empty access token is allowed: startup must not fail on missing
    /// configuration. It is reported once as a warning here, and requests
    /// fail later with a missing-token error.
    pub fn new(
        cdn_base_url: String,
        cdn_token: String,
        version: Version,
        http_timeout: Duration,
    ) -> Self {
        if cdn_token.trim().is_empty() {
            tracing::warn!(
                "HENGSTE_CDN_TOKEN is not set; storyblok requests will fail until it is configured"
            );
        }

        Self {
            cdn_base_url,
            cdn_token,
            version,
            http_timeout,
        }
    }

    /// Resolve configuration from the environment.
    ///
    /// Recognized variables: `HENGSTE_CDN_BASE_URL`, `HENGSTE_CDN_TOKEN`,
    /// `HENGSTE_CONTENT_VERSION` (`draft`/`published`),
    /// `HENGSTE_HTTP_TIMEOUT_SECS`. Empty or whitespace values count as
    /// unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cdn_base_url =
            env_value("HENGSTE_CDN_BASE_URL").unwrap_or_else(|| DEFAULT_CDN_BASE_URL.to_owned());
        let cdn_token = env_value("HENGSTE_CDN_TOKEN").unwrap_or_default();

        let version = env_value("HENGSTE_CONTENT_VERSION")
            .map(|v| v.parse::<Version>())
            .transpose()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?
            .unwrap_or(Version::Draft);

        let http_timeout = env_value("HENGSTE_HTTP_TIMEOUT_SECS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .map_err(|_| {
                ConfigError::Invalid("HENGSTE_HTTP_TIMEOUT_SECS must be a whole number".into())
            })?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self::new(cdn_base_url, cdn_token, version, http_timeout))
    }

    pub fn cdn_base_url(&self) -> &str {
        &self.cdn_base_url
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }

    /// Build the content-delivery client this configuration describes.
    pub fn cdn_client(&self) -> FetchResult<CdnClient> {
        CdnClient::new(
            self.cdn_base_url.clone(),
            self.cdn_token.clone(),
            self.http_timeout,
        )
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builds_cdn_client() {
        let config = SiteConfig::new(
            DEFAULT_CDN_BASE_URL.to_owned(),
            "token-123".to_owned(),
            Version::Published,
            Duration::from_secs(5),
        );
        assert_eq!(config.version(), Version::Published);
        assert!(config.cdn_client().is_ok());
    }

    #[test]
    fn empty_token_is_allowed_at_construction() {
        let config = SiteConfig::new(
            DEFAULT_CDN_BASE_URL.to_owned(),
            String::new(),
            Version::Draft,
            DEFAULT_TIMEOUT,
        );
        assert!(config.cdn_client().is_ok());
    }
}
