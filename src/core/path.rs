//! core::path
//!
//! Materialized path construction.
//!
//! A page's path is the slug of every ancestor (self included), root
//! first, each followed by `/`. The home page contributes its own path,
//! the empty string, so its children are rooted at `''`:
//!
//! ```text
//! docs (docs/)
//! └── guide (docs/guide/)
//! home [home] ('')
//! └── about (about/)
//! ```

use super::page::{Page, PATH_SEPARATOR};
use super::tree::{PageTree, TreeError};
use super::types::PageId;

/// Compute the canonical path of a page from the current tree.
///
/// Pure function of the tree at call time; callers must re-run it after
/// an ancestor's slug or parent changes.
///
/// # Errors
///
/// Returns [`TreeError::PageNotFound`] if the page or an ancestor is missing.
///
/// # Example
///
/// ```
/// use pagetree::core::page::Page;
/// use pagetree::core::path::build_path;
/// use pagetree::core::tree::PageTree;
/// use pagetree::core::types::{PageId, Slug};
///
/// let mut tree = PageTree::new();
/// let home = Page::new(PageId::new(), "Home", Slug::new("home").unwrap());
/// let mut about = Page::new(PageId::new(), "About", Slug::new("about").unwrap());
/// about.parent = Some(home.id);
/// let about_id = about.id;
/// tree.insert(home).unwrap();
/// tree.insert(about).unwrap();
///
/// assert_eq!(build_path(&tree, about_id).unwrap(), "home/about/");
/// ```
pub fn build_path(tree: &PageTree, id: PageId) -> Result<String, TreeError> {
    let chain = tree.ancestors(id, true)?;
    Ok(join_slugs(&chain))
}

/// Path for a root-first chain of pages.
///
/// A home page in the chain contributes nothing; a home page at the end
/// of the chain yields `''`.
pub fn join_slugs(chain: &[&Page]) -> String {
    let mut path = String::new();
    for page in chain {
        if page.is_home {
            continue;
        }
        path = child_path(&path, page.slug.as_str());
    }
    path
}

/// Path of a child with the given slug under a parent path.
pub fn child_path(parent_path: &str, slug: &str) -> String {
    format!("{}{}{}", parent_path, slug, PATH_SEPARATOR)
}
