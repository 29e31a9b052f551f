//! Best-effort story resolution with locale fallback.
//!
//! A page request resolves through an ordered list of slug/locale lookup
//! attempts: plain slug then locale-prefixed slug, first at the requested
//! locale, always also at the English baseline. Attempt failures are
//! logged and swallowed so the remaining attempts can proceed; only total
//! exhaustion surfaces as [`ResolveError::NotFound`].

use async_trait::async_trait;

use hengste_types::{Locale, SlugPath};
use storyblok::{CdnClient, FetchResult, Story, StoryResponse, Version};

use crate::merge::merge_values;
use crate::{ResolveError, ResolveResult};

/// A source of stories keyed by slug and language.
///
/// The resolver only needs this one operation, which keeps it testable
/// against an in-memory source.
#[async_trait]
pub trait StorySource: Send + Sync {
    async fn lookup(&self, slug: &str, language: Locale) -> FetchResult<StoryResponse>;
}

/// Binds a [`CdnClient`] to a content version for resolver lookups.
#[derive(Debug, Clone)]
pub struct CdnStorySource {
    client: CdnClient,
    version: Version,
    resolve_relations: Vec<String>,
}

impl CdnStorySource {
    pub fn new(client: CdnClient, version: Version) -> Self {
        Self {
            client,
            version,
            resolve_relations: Vec::new(),
        }
    }

    /// Relation fields the CDN should inline on every lookup.
    pub fn with_resolve_relations(mut self, relations: Vec<String>) -> Self {
        self.resolve_relations = relations;
        self
    }
}

#[async_trait]
impl StorySource for CdnStorySource {
    async fn lookup(&self, slug: &str, language: Locale) -> FetchResult<StoryResponse> {
        self.client
            .fetch_story(slug, language, self.version, &self.resolve_relations)
            .await
    }
}

/// Where a resolved story's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Only the localized document was found; returned as-is.
    Localized,
    /// The baseline document was returned unmerged (baseline locale was
    /// requested, or no localized document exists).
    Baseline,
    /// Localized document with baseline fallback merged in field-by-field.
    Merged,
}

/// Outcome of [`resolve_story`].
#[derive(Debug, Clone)]
pub struct ResolvedStory {
    pub story: Story,
    pub origin: Origin,
}

/// The ordered slug variants tried for one locale track:
/// plain slug first, then the locale-prefixed form.
pub fn lookup_attempts(slug: &SlugPath, locale: Locale) -> [String; 2] {
    [slug.as_str().to_owned(), slug.prefixed(locale)]
}

/// Try each attempt in order and take the first success.
///
/// Failed attempts (HTTP errors, timeouts, not-found) are logged at warn
/// and swallowed; `None` means every attempt failed.
async fn first_found<S>(source: &S, slug: &SlugPath, locale: Locale) -> Option<Story>
where
    S: StorySource + ?Sized,
{
    for attempt in lookup_attempts(slug, locale) {
        match source.lookup(&attempt, locale).await {
            Ok(response) => return Some(response.story),
            Err(error) => {
                tracing::warn!(slug = %attempt, locale = %locale, %error, "story lookup attempt failed");
            }
        }
    }
    None
}

/// Resolve a story for `slug` at `locale`, falling back to the English
/// baseline field-by-field.
///
/// The localized and baseline tracks are independent and run concurrently;
/// localized precedence is applied at merge time, so the result is the
/// same as trying them in sequence. When the baseline locale itself is
/// requested, only the baseline track runs and no merge ever happens.
pub async fn resolve_story<S>(
    source: &S,
    slug: &SlugPath,
    locale: Locale,
) -> ResolveResult<ResolvedStory>
where
    S: StorySource + ?Sized,
{
    let baseline_track = first_found(source, slug, Locale::FALLBACK);

    let (localized, baseline) = if locale.is_fallback() {
        (None, baseline_track.await)
    } else {
        tokio::join!(first_found(source, slug, locale), baseline_track)
    };

    match (localized, baseline) {
        (None, None) => Err(ResolveError::NotFound {
            slug: slug.clone(),
            locale,
        }),
        (Some(story), None) => Ok(ResolvedStory {
            story,
            origin: Origin::Localized,
        }),
        (None, Some(story)) => Ok(ResolvedStory {
            story,
            origin: Origin::Baseline,
        }),
        (Some(mut localized), Some(baseline)) => {
            localized.content = merge_values(&localized.content, &baseline.content);
            // The display name follows the same non-empty rule as content
            // fields, independently of the tree merge.
            if localized.name.trim().is_empty() {
                localized.name = baseline.name;
            }
            Ok(ResolvedStory {
                story: localized,
                origin: Origin::Merged,
            })
        }
    }
}
