//! core::page
//!
//! The page record.
//!
//! # Fields
//!
//! Structural (owned by the core):
//! - `slug`, `path`, `parent`, `is_home`
//!
//! Stored attributes (opaque to the core):
//! - `template`, `seo_title`, `seo_description`, `style`
//!
//! # Limits
//!
//! Field limits are enforced by [`Page::validate`] before a record is
//! staged for commit. Violations surface as [`PageFieldError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{PageId, Slug, UtcTimestamp};

/// Maximum title length in characters.
pub const TITLE_MAX_LEN: usize = 120;

/// Maximum materialized path length in characters.
pub const PATH_MAX_LEN: usize = 800;

/// Maximum template identifier length in characters.
pub const TEMPLATE_MAX_LEN: usize = 300;

/// Maximum SEO title length in characters.
pub const SEO_TITLE_MAX_LEN: usize = 120;

/// Maximum SEO description length in characters.
pub const SEO_DESCRIPTION_MAX_LEN: usize = 255;

/// Template used when none is given.
pub const DEFAULT_TEMPLATE: &str = "page.html";

/// Separator following every slug in a materialized path.
pub const PATH_SEPARATOR: char = '/';

/// A page field failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageFieldError {
    #[error("title cannot be empty")]
    EmptyTitle,

    #[error("{field} is too long ({len} > {max} characters)")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("template cannot be empty")]
    EmptyTemplate,
}

/// A page in the tree.
///
/// Records are plain data; the tree and lifecycle keep `path`, `parent`
/// and `is_home` consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub slug: Slug,
    /// Materialized path, e.g. `about/team/`. Empty for the home page.
    pub path: String,
    #[serde(default)]
    pub parent: Option<PageId>,
    #[serde(default)]
    pub is_home: bool,
    pub template: String,
    #[serde(default)]
    pub seo_title: String,
    #[serde(default)]
    pub seo_description: String,
    /// Page-specific CSS.
    #[serde(default)]
    pub style: String,
    pub created_at: UtcTimestamp,
    pub updated_at: UtcTimestamp,
}

impl Page {
    /// Create a root page with an empty path.
    ///
    /// The path is filled in by the lifecycle when the page is saved.
    pub fn new(id: PageId, title: impl Into<String>, slug: Slug) -> Self {
        let now = UtcTimestamp::now();
        Self {
            id,
            title: title.into(),
            slug,
            path: String::new(),
            parent: None,
            is_home: false,
            template: DEFAULT_TEMPLATE.to_string(),
            seo_title: String::new(),
            seo_description: String::new(),
            style: String::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// URL for this page on the serving side.
    ///
    /// # Example
    ///
    /// ```
    /// use pagetree::core::page::Page;
    /// use pagetree::core::types::{PageId, Slug};
    ///
    /// let mut page = Page::new(PageId::new(), "About", Slug::new("about").unwrap());
    /// page.path = "about/".into();
    /// assert_eq!(page.absolute_url(), "/about/");
    ///
    /// page.path.clear();
    /// assert_eq!(page.absolute_url(), "/");
    /// ```
    pub fn absolute_url(&self) -> String {
        format!("{}{}", PATH_SEPARATOR, self.path)
    }

    /// Depth below the root, counting path segments.
    pub fn depth(&self) -> usize {
        self.path.matches(PATH_SEPARATOR).count()
    }

    /// Update the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = UtcTimestamp::now();
    }

    /// Borrow the attributes the core stores but does not interpret.
    pub fn attributes_mut(&mut self) -> AttributesMut<'_> {
        AttributesMut {
            template: &mut self.template,
            seo_title: &mut self.seo_title,
            seo_description: &mut self.seo_description,
            style: &mut self.style,
        }
    }

    /// Check field limits.
    ///
    /// # Errors
    ///
    /// Returns the first violated limit.
    pub fn validate(&self) -> Result<(), PageFieldError> {
        validate_title(&self.title)?;
        check_len("path", &self.path, PATH_MAX_LEN)?;
        if self.template.trim().is_empty() {
            return Err(PageFieldError::EmptyTemplate);
        }
        check_len("template", &self.template, TEMPLATE_MAX_LEN)?;
        check_len("seo_title", &self.seo_title, SEO_TITLE_MAX_LEN)?;
        check_len("seo_description", &self.seo_description, SEO_DESCRIPTION_MAX_LEN)?;
        Ok(())
    }
}

/// Mutable view over a page's opaque attributes.
///
/// Structural fields stay behind the tree's setters so its indexes
/// cannot drift.
#[derive(Debug)]
pub struct AttributesMut<'a> {
    pub template: &'a mut String,
    pub seo_title: &'a mut String,
    pub seo_description: &'a mut String,
    pub style: &'a mut String,
}

/// Check that a title is non-blank and within limits.
pub fn validate_title(title: &str) -> Result<(), PageFieldError> {
    if title.trim().is_empty() {
        return Err(PageFieldError::EmptyTitle);
    }
    check_len("title", title, TITLE_MAX_LEN)
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), PageFieldError> {
    let len = value.chars().count();
    if len > max {
        return Err(PageFieldError::TooLong { field, len, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Page {
        Page::new(PageId::new(), "About", Slug::new("about").unwrap())
    }

    #[test]
    fn new_page_defaults() {
        let page = sample();
        assert_eq!(page.template, DEFAULT_TEMPLATE);
        assert!(page.path.is_empty());
        assert!(page.parent.is_none());
        assert!(!page.is_home);
        assert_eq!(page.created_at, page.updated_at);
    }

    #[test]
    fn validate_accepts_sample() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_blank_title() {
        let mut page = sample();
        page.title = "   ".into();
        assert_eq!(page.validate(), Err(PageFieldError::EmptyTitle));
    }

    #[test]
    fn validate_rejects_long_fields() {
        let mut page = sample();
        page.title = "x".repeat(TITLE_MAX_LEN + 1);
        assert!(matches!(
            page.validate(),
            Err(PageFieldError::TooLong { field: "title", .. })
        ));

        let mut page = sample();
        page.seo_description = "x".repeat(SEO_DESCRIPTION_MAX_LEN + 1);
        assert!(matches!(
            page.validate(),
            Err(PageFieldError::TooLong {
                field: "seo_description",
                ..
            })
        ));

        let mut page = sample();
        page.path = "a/".repeat(PATH_MAX_LEN);
        assert!(matches!(
            page.validate(),
            Err(PageFieldError::TooLong { field: "path", .. })
        ));
    }

    #[test]
    fn validate_rejects_empty_template() {
        let mut page = sample();
        page.template = String::new();
        assert_eq!(page.validate(), Err(PageFieldError::EmptyTemplate));
    }

    #[test]
    fn depth_counts_segments() {
        let mut page = sample();
        assert_eq!(page.depth(), 0);
        page.path = "a/b/c/".into();
        assert_eq!(page.depth(), 3);
    }

    #[test]
    fn serde_roundtrip_rejects_unknown_fields() {
        let page = sample();
        let mut value = serde_json::to_value(&page).unwrap();
        let parsed: Page = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(parsed, page);

        value["unexpected"] = serde_json::json!(true);
        assert!(serde_json::from_value::<Page>(value).is_err());
    }
}
