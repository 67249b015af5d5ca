//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`PageId`] - Opaque, immutable page identifier
//! - [`Slug`] - Validated URL-safe token
//! - [`UtcTimestamp`] - RFC3339 timestamp
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use pagetree::core::types::{PageId, Slug};
//!
//! let id = PageId::new();
//! let parsed: PageId = id.to_string().parse().unwrap();
//! assert_eq!(id, parsed);
//!
//! let slug = Slug::new("about-us").unwrap();
//! assert_eq!(slug.as_str(), "about-us");
//!
//! // Invalid constructions fail at creation time
//! assert!(Slug::new("About Us").is_err());
//! assert!(Slug::new("").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::naming::{slugify, SLUG_MAX_LEN};

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid page id: {0}")]
    InvalidPageId(String),

    #[error("invalid slug: {0}")]
    InvalidSlug(String),
}

/// Unique identifier for a page.
///
/// Assigned once on creation and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(Uuid);

impl PageId {
    /// Generate a new random page id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Short prefix for display.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| TypeError::InvalidPageId(format!("'{}': {}", s, e)))
    }
}

/// A validated URL slug.
///
/// A slug is non-empty and already in normalized form: lowercase ASCII
/// letters, digits and single hyphens, never starting or ending with a
/// hyphen. Equivalently, `slugify(s) == s`.
///
/// # Example
///
/// ```
/// use pagetree::core::types::Slug;
///
/// assert!(Slug::new("welcome").is_ok());
/// assert!(Slug::new("page-2").is_ok());
///
/// assert!(Slug::new("-leading").is_err());
/// assert!(Slug::new("double--hyphen").is_err());
/// assert!(Slug::new("UPPER").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Create a new validated slug.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidSlug` if the value is empty or not in
    /// normalized slug form.
    pub fn new(value: impl Into<String>) -> Result<Self, TypeError> {
        let value = value.into();
        if value.is_empty() {
            return Err(TypeError::InvalidSlug("slug cannot be empty".into()));
        }
        let normalized = slugify(&value);
        if normalized != value {
            return Err(TypeError::InvalidSlug(format!(
                "'{}' is not a normalized slug (expected '{}')",
                value, normalized
            )));
        }
        Ok(Self(value))
    }

    /// Derive a slug from free text.
    ///
    /// Returns `None` if the text contains nothing slug-worthy.
    pub fn from_text(text: &str) -> Option<Self> {
        let slug = slugify(text);
        if slug.is_empty() {
            None
        } else {
            Some(Self(slug))
        }
    }

    /// Return this slug with a numeric suffix, e.g. `about-2`.
    ///
    /// The base is shortened if needed so the result stays within
    /// [`SLUG_MAX_LEN`].
    pub fn with_suffix(&self, n: u32) -> Self {
        let suffix = format!("-{}", n);
        let keep = SLUG_MAX_LEN.saturating_sub(suffix.len()).min(self.0.len());
        // Slugs are ASCII, so any byte index is a char boundary
        let mut base = self.0[..keep].to_string();
        while base.ends_with('-') {
            base.pop();
        }
        Self(base + &suffix)
    }

    /// Get the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A UTC timestamp serialized as RFC3339.
///
/// # Example
///
/// ```
/// use pagetree::core::types::UtcTimestamp;
///
/// let now = UtcTimestamp::now();
/// println!("Current time: {}", now);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }
}

impl fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
