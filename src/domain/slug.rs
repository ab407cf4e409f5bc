//! Validated URL segment identifying a node among its siblings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A human-readable node identifier used as one segment of a link href.
///
/// Slugs are unique among siblings, not globally: two chapters under
/// different units may both be `introduction`.
///
/// # Validation Rules
/// - Non-empty after trimming
/// - Lowercase ASCII letters, digits and hyphens only
/// - No leading, trailing or doubled hyphens
///
/// # Examples
///
/// ```
/// use syllabus::domain::Slug;
///
/// let slug = Slug::new("organic-chemistry").unwrap();
/// assert_eq!(slug.as_str(), "organic-chemistry");
/// assert!(Slug::new("Organic Chemistry").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slug(String);

/// Error returned when parsing an invalid slug.
#[derive(Debug, Clone)]
pub struct ParseSlugError(String);

impl fmt::Display for ParseSlugError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseSlugError {}

impl Slug {
    /// Creates a new Slug, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ParseSlugError` if the value is empty or breaks any
    /// validation rule.
    pub fn new(s: &str) -> Result<Self, ParseSlugError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ParseSlugError("slug cannot be empty".to_string()));
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ParseSlugError(format!(
                "invalid slug '{}': slugs must contain only lowercase letters, digits, and hyphens",
                trimmed
            )));
        }

        if trimmed.starts_with('-') || trimmed.ends_with('-') || trimmed.contains("--") {
            return Err(ParseSlugError(format!(
                "invalid slug '{}': hyphens must separate words",
                trimmed
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slug(\"{}\")", self.0)
    }
}

impl FromStr for Slug {
    type Err = ParseSlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Slug {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Slug {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Slug::new(&s).map_err(serde::de::Error::custom)
    }
}
