//! Management API client, used by seed tooling only.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use hengste_types::Locale;

use crate::{FetchError, FetchResult};

/// Management (read/write) endpoint.
pub const DEFAULT_MANAGEMENT_BASE_URL: &str = "https://mapi.storyblok.com/v1";

/// Story fields the seed tool needs back from the management API.
#[derive(Debug, Clone, Deserialize)]
pub struct ManagedStory {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub full_slug: String,
}

#[derive(Debug, Clone, Deserialize)]
struct StoriesEnvelope {
    #[serde(default)]
    stories: Vec<ManagedStory>,
}

/// Payload for creating or updating a story.
#[derive(Debug, Clone, Serialize)]
pub struct StoryPayload {
    pub name: String,
    pub slug: String,
    pub is_startpage: bool,
    pub default_root: bool,
    pub content: Value,
    pub lang: Locale,
    /// Placement under the language folder.
    pub path: String,
}

/// Client for the management API.
///
/// Personal access tokens come in two header schemes; requests go out with
/// `Bearer` auth first and are retried once with the legacy
/// `Token token=…` scheme on 401.
#[derive(Debug, Clone)]
pub struct ManagementClient {
    http: reqwest::Client,
    base_url: String,
    space_id: String,
    token: String,
}

impl ManagementClient {
    pub fn new(
        base_url: impl Into<String>,
        space_id: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> FetchResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            space_id: space_id.into(),
            token: token.into(),
        })
    }

    fn space_url(&self, path: &str) -> String {
        format!("{}/spaces/{}/{}", self.base_url, self.space_id, path)
    }

    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> FetchResult<Value> {
        if self.token.trim().is_empty() {
            return Err(FetchError::MissingToken);
        }

        let send = |auth: String| {
            let mut builder = self
                .http
                .request(method.clone(), url)
                .header(AUTHORIZATION, auth);
            if let Some(body) = body {
                builder = builder.json(body);
            }
            builder.send()
        };

        let mut response = send(format!("Bearer {}", self.token)).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::debug!(url, "bearer auth rejected, retrying with token scheme");
            response = send(format!("Token token={}", self.token)).await?;
        }

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_owned(),
                status,
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|source| FetchError::Decode {
            url: url.to_owned(),
            source,
        })
    }

    /// Cheap credentials probe; fails with the underlying status on bad auth.
    pub async fn auth_check(&self) -> FetchResult<()> {
        let url = self.space_url("stories?per_page=1");
        self.request(Method::GET, &url, None).await.map(|_| ())
    }

    /// Look a story up by its full (locale-prefixed) slug.
    pub async fn find_story_by_full_slug(
        &self,
        full_slug: &str,
    ) -> FetchResult<Option<ManagedStory>> {
        let url = self.space_url(&format!("stories?with_slug={full_slug}"));
        let value = self.request(Method::GET, &url, None).await?;
        let envelope: StoriesEnvelope =
            serde_json::from_value(value).map_err(|source| FetchError::Decode { url, source })?;
        Ok(envelope
            .stories
            .into_iter()
            .find(|story| story.full_slug == full_slug))
    }

    pub async fn create_story(&self, payload: &StoryPayload) -> FetchResult<()> {
        let url = self.space_url("stories");
        self.request(Method::POST, &url, Some(&json!({ "story": payload })))
            .await
            .map(|_| ())
    }

    pub async fn update_story(&self, id: u64, payload: &StoryPayload) -> FetchResult<()> {
        let url = self.space_url(&format!("stories/{id}"));
        self.request(Method::PUT, &url, Some(&json!({ "story": payload })))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_payload_serializes_wire_fields() {
        let payload = StoryPayload {
            name: "Startseite".to_owned(),
            slug: "home".to_owned(),
            is_startpage: false,
            default_root: false,
            content: json!({"component": "page", "body": []}),
            lang: Locale::De,
            path: "de".to_owned(),
        };
        let wire = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(wire["lang"], "de");
        assert_eq!(wire["slug"], "home");
        assert_eq!(wire["content"]["component"], "page");
    }

    #[tokio::test]
    async fn empty_token_fails_before_any_request() {
        let client = ManagementClient::new(
            DEFAULT_MANAGEMENT_BASE_URL,
            "123",
            "",
            Duration::from_secs(5),
        )
        .expect("build client");
        let err = client.auth_check().await.expect_err("should fail");
        assert!(matches!(err, FetchError::MissingToken));
    }
}
