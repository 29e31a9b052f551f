//! Content-delivery API client.

use std::time::Duration;

use hengste_types::Locale;

use crate::story::{StoryResponse, Version};
use crate::{FetchError, FetchResult};

/// Public content-delivery endpoint.
pub const DEFAULT_CDN_BASE_URL: &str = "https://api.storyblok.com/v2/cdn";

/// Default per-request timeout. A timed-out lookup is treated by callers
/// like any other failed attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the read-only content-delivery API.
///
/// One outbound HTTP call per [`CdnClient::fetch_story`] invocation; no
/// retries. An empty access token is tolerated at construction (startup
/// must not fail on missing configuration) and surfaces as
/// [`FetchError::MissingToken`] on first use.
#[derive(Debug, Clone)]
pub struct CdnClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl CdnClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> FetchResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let token = token.into();
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Fetch one story by slug and language.
    ///
    /// The slug may be plain (`home`) or locale-prefixed (`de/home`);
    /// callers decide which variants to try. `resolve_relations` names
    /// relation fields the API should inline, comma-joined on the wire.
    pub async fn fetch_story(
        &self,
        slug: &str,
        language: Locale,
        version: Version,
        resolve_relations: &[String],
    ) -> FetchResult<StoryResponse> {
        if self.token.trim().is_empty() {
            return Err(FetchError::MissingToken);
        }

        let url = format!("{}/stories/{}", self.base_url, slug);
        let mut query: Vec<(&str, String)> = vec![
            ("token", self.token.clone()),
            ("version", version.as_str().to_owned()),
            ("language", language.as_str().to_owned()),
        ];
        if !resolve_relations.is_empty() {
            query.push(("resolve_relations", resolve_relations.join(",")));
        }

        tracing::debug!(slug, language = %language, version = %version, "fetching story");

        let response = self.http.get(&url).query(&query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status { url, status, body });
        }

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_token_fails_before_any_request() {
        let client =
            CdnClient::new(DEFAULT_CDN_BASE_URL, "", DEFAULT_TIMEOUT).expect("build client");
        let err = client
            .fetch_story("home", Locale::En, Version::Draft, &[])
            .await
            .expect_err("should fail without a token");
        assert!(matches!(err, FetchError::MissingToken));
    }
}
