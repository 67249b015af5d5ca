//! engine::resolver
//!
//! Request-time lookup of a page by its materialized path.
//!
//! Matching is exact and case sensitive. `about` and `about/` are
//! different paths; the home page is `''`.

use crate::core::page::{Page, PATH_SEPARATOR};
use crate::core::tree::PageTree;

use super::PageError;

/// Find the page whose path equals `request_path`.
///
/// If legacy data has several pages on one path, the lowest id wins and a
/// warning is logged.
///
/// # Errors
///
/// [`PageError::NotFound`] if no page has the path.
///
/// # Example
///
/// ```
/// use pagetree::core::tree::PageTree;
/// use pagetree::engine::{lifecycle, resolve, NewPage, SaveSettings};
///
/// let mut tree = PageTree::new();
/// let settings = SaveSettings::default();
/// let report = lifecycle::create(&mut tree, NewPage::new("About"), &settings).unwrap();
///
/// assert_eq!(resolve(&tree, "about/").unwrap().id, report.page);
/// assert!(resolve(&tree, "about").is_err());
/// assert!(resolve(&tree, "About/").is_err());
/// ```
pub fn resolve<'a>(tree: &'a PageTree, request_path: &str) -> Result<&'a Page, PageError> {
    let owners = tree.path_owners(request_path);
    if owners.len() > 1 {
        tracing::warn!(
            path = request_path,
            count = owners.len(),
            "several pages share a path, serving the first"
        );
    }

    tree.path_owner(request_path)
        .ok_or_else(|| PageError::NotFound(request_path.to_string()))
}

/// Resolve an absolute URL path such as `/about/`.
///
/// Strips exactly one leading separator, the inverse of
/// [`Page::absolute_url`]; everything else is matched as in [`resolve`].
pub fn resolve_url<'a>(tree: &'a PageTree, url: &str) -> Result<&'a Page, PageError> {
    let path = url.strip_prefix(PATH_SEPARATOR).unwrap_or(url);
    resolve(tree, path)
}
