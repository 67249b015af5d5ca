//! core::naming
//!
//! Slug generation for page titles.
//!
//! # Rules
//!
//! - Non-ASCII text is transliterated to ASCII first (`Café` reads `Cafe`)
//! - Letters are lowercased, digits are kept
//! - Whitespace and punctuation become hyphens
//! - Hyphen runs collapse; leading and trailing hyphens are trimmed
//! - Output is capped at [`SLUG_MAX_LEN`] characters
//!
//! The output alphabet is `[a-z0-9-]`, so slugifying a slug is a no-op.

/// Maximum slug length in characters.
pub const SLUG_MAX_LEN: usize = 200;

/// Generate a URL slug from free text.
///
/// # Example
///
/// ```
/// use pagetree::core::naming::slugify;
///
/// assert_eq!(slugify("My Page!"), "my-page");
/// assert_eq!(slugify("About  us / Team"), "about-us-team");
/// assert_eq!(slugify("Café"), "cafe");
/// assert_eq!(slugify(&slugify("Hello, World")), slugify("Hello, World"));
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = slug::slugify(text);

    if slug.len() > SLUG_MAX_LEN {
        slug.truncate(SLUG_MAX_LEN);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    slug
}
