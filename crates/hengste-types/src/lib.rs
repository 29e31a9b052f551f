/// Errors that can occur when parsing a locale tag.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    /// The tag did not name a supported locale
    #[error("unsupported locale: {0}")]
    Unknown(String),
}

/// A supported site locale.
///
/// The set is closed: content is authored in English and German only, and
/// English is the designated fallback baseline for every other locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    En,
    De,
}

impl Locale {
    /// The baseline language that untranslated fields fall back to.
    pub const FALLBACK: Locale = Locale::En;

    /// All supported locales, baseline first.
    pub fn all() -> [Locale; 2] {
        [Locale::En, Locale::De]
    }

    /// Returns the lowercase language tag used on the wire and in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
        }
    }

    /// Whether this locale is the fallback baseline itself.
    pub fn is_fallback(&self) -> bool {
        *self == Self::FALLBACK
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = LocaleError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "de" => Ok(Locale::De),
            other => Err(LocaleError::Unknown(other.to_owned())),
        }
    }
}

impl serde::Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when creating a validated slug path.
#[derive(Debug, thiserror::Error)]
pub enum SlugError {
    /// The input was empty or contained only whitespace and slashes
    #[error("slug path cannot be empty")]
    Empty,
}

/// A story slug path that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one
/// character that is not whitespace or a path separator. Surrounding
/// whitespace and leading/trailing slashes are stripped during
/// construction, so `"/home/"` and `"home"` are the same path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlugPath(String);

impl SlugPath {
    /// Creates a new `SlugPath` from the given input.
    ///
    /// The input is trimmed of whitespace and surrounding slashes. If the
    /// result is empty, an error is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, SlugError> {
        let normalized = input.as_ref().trim().trim_matches('/');
        if normalized.is_empty() {
            return Err(SlugError::Empty);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the inner path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the locale-prefixed form of this slug, e.g. `de/home`.
    pub fn prefixed(&self, locale: Locale) -> String {
        format!("{}/{}", locale.as_str(), self.0)
    }
}

impl std::fmt::Display for SlugPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SlugPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for SlugPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for SlugPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SlugPath::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_parses_known_tags() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("de".parse::<Locale>().unwrap(), Locale::De);
        assert_eq!(" DE ".parse::<Locale>().unwrap(), Locale::De);
    }

    #[test]
    fn locale_rejects_unknown_tags() {
        let err = "fr".parse::<Locale>().expect_err("should reject fr");
        assert!(matches!(err, LocaleError::Unknown(tag) if tag == "fr"));
    }

    #[test]
    fn locale_fallback_is_english() {
        assert_eq!(Locale::FALLBACK, Locale::En);
        assert!(Locale::En.is_fallback());
        assert!(!Locale::De.is_fallback());
    }

    #[test]
    fn slug_path_normalizes_slashes_and_whitespace() {
        assert_eq!(SlugPath::new(" /home/ ").unwrap().as_str(), "home");
        assert_eq!(
            SlugPath::new("industries/automotive").unwrap().as_str(),
            "industries/automotive"
        );
    }

    #[test]
    fn slug_path_rejects_empty_input() {
        assert!(matches!(SlugPath::new(""), Err(SlugError::Empty)));
        assert!(matches!(SlugPath::new("  // "), Err(SlugError::Empty)));
    }

    #[test]
    fn slug_path_prefixes_locale() {
        let slug = SlugPath::new("home").unwrap();
        assert_eq!(slug.prefixed(Locale::De), "de/home");
        assert_eq!(slug.prefixed(Locale::En), "en/home");
    }

    #[test]
    fn locale_serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&Locale::De).unwrap();
        assert_eq!(json, "\"de\"");
        let back: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(back, Locale::En);
    }
}
