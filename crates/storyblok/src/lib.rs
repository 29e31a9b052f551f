//! Storyblok wire/boundary support.
//!
//! This crate is responsible for talking to the Storyblok content-delivery
//! and management HTTP APIs and for translating their JSON payloads into
//! typed stories and content blocks.
//!
//! Locale-fallback resolution lives in `hengste-core`; this crate handles
//! wire formats and transport only.

pub mod blok;
pub mod cdn;
pub mod management;
pub mod story;

use thiserror::Error;

pub use blok::{Asset, Blok, Cta, LinkField};
pub use cdn::CdnClient;
pub use management::{ManagementClient, StoryPayload};
pub use story::{Story, StoryResponse, Version};

/// Errors returned by the Storyblok HTTP clients.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No access token was configured; requests cannot be authenticated.
    #[error("storyblok access token is not configured")]
    MissingToken,

    /// Transport-level failure (connection, timeout, invalid URL).
    #[error("storyblok request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("storyblok returned {status} for {url}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("failed to decode storyblok response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;
