use hengste_types::{Locale, SlugPath};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// No document was found under any attempted slug/locale combination.
    ///
    /// Individual lookup failures never surface here; they are logged and
    /// swallowed so later attempts can proceed. Only total exhaustion of
    /// the attempt list is an error.
    #[error("no story found for slug \"{slug}\" ({locale} or {fallback})", fallback = Locale::FALLBACK)]
    NotFound { slug: SlugPath, locale: Locale },
}

pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
