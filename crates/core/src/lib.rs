//! # Hengste Core
//!
//! Locale-fallback content resolution for the site:
//! - Field-level deep merge of localized and baseline stories (`merge`)
//! - Ordered best-effort slug/locale lookup and merge orchestration
//!   (`resolver`)
//! - Runtime configuration resolved once at startup (`config`)
//!
//! **No transport or rendering concerns**: HTTP wire formats and clients
//! belong in `storyblok`; HTML rendering belongs in the server binary.

pub mod config;
pub mod merge;
pub mod resolver;

mod error;

pub use error::{ResolveError, ResolveResult};
pub use resolver::{resolve_story, CdnStorySource, Origin, ResolvedStory, StorySource};
