//! Story envelope types for the content-delivery API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a content version.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("unsupported content version: {0}")]
    Unknown(String),
}

/// Which editorial state of a story to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    Draft,
    Published,
}

impl Version {
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Draft => "draft",
            Version::Published => "published",
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Version {
    type Err = VersionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Version::Draft),
            "published" => Ok(Version::Published),
            other => Err(VersionError::Unknown(other.to_owned())),
        }
    }
}

/// A CMS story: one page document with its content block tree.
///
/// `content` stays an untyped JSON tree here because locale-fallback
/// merging operates field-by-field on the raw document. Blocks are only
/// lifted into [`crate::Blok`] at render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub full_slug: String,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub content: serde_json::Value,
}

impl Story {
    /// The top-level block array of the content tree, if any.
    pub fn body(&self) -> &[serde_json::Value] {
        self.content
            .get("body")
            .and_then(|body| body.as_array())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// The envelope the content-delivery API wraps a single story in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryResponse {
    pub story: Story,
}
