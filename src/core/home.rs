//! core::home
//!
//! The single-home-page invariant.
//!
//! # Invariant
//!
//! At most one page in the tree has `is_home = true`. The home page has no
//! parent and an empty path.
//!
//! # Transactions
//!
//! [`promote_to_home`] mutates several pages. It must run inside the
//! caller's transaction (the lifecycle works on a private copy of the
//! tree that is committed as a whole) or a concurrent promotion can leave
//! zero or two home pages behind.

use super::tree::{PageTree, TreeError};
use super::types::PageId;

/// The current home page, if exactly one exists.
///
/// Returns `None` when there is no home page or when legacy state holds
/// more than one.
pub fn current_home(tree: &PageTree) -> Option<PageId> {
    match tree.homes().as_slice() {
        [home] => Some(*home),
        _ => None,
    }
}

/// Make `id` the only home page.
///
/// 1. Every other page flagged as home is demoted (several are tolerated
///    and corrected)
/// 2. `id` is flagged as home, detached from its parent and given the
///    empty path
///
/// Returns the demoted pages. Their paths are stale (still `''`) and must
/// be re-derived by the caller along with their descendants.
///
/// # Errors
///
/// Returns [`TreeError::PageNotFound`] if `id` is not in the tree.
///
/// # Example
///
/// ```
/// use pagetree::core::home::promote_to_home;
/// use pagetree::core::page::Page;
/// use pagetree::core::tree::PageTree;
/// use pagetree::core::types::{PageId, Slug};
///
/// let mut tree = PageTree::new();
/// let old = Page::new(PageId::new(), "Old", Slug::new("old").unwrap());
/// let new = Page::new(PageId::new(), "New", Slug::new("new").unwrap());
/// let (old_id, new_id) = (old.id, new.id);
/// tree.insert(old).unwrap();
/// tree.insert(new).unwrap();
///
/// promote_to_home(&mut tree, old_id).unwrap();
/// let demoted = promote_to_home(&mut tree, new_id).unwrap();
///
/// assert_eq!(demoted, vec![old_id]);
/// assert_eq!(tree.homes(), vec![new_id]);
/// ```
pub fn promote_to_home(tree: &mut PageTree, id: PageId) -> Result<Vec<PageId>, TreeError> {
    tree.require(id)?;

    let demoted: Vec<PageId> = tree.homes().into_iter().filter(|&h| h != id).collect();
    if demoted.len() > 1 {
        tracing::warn!(
            count = demoted.len(),
            "found several home pages, demoting all but the promoted page"
        );
    }

    for &other in &demoted {
        tree.set_home(other, false)?;
        tree.touch(other)?;
        tracing::debug!(page = %other, "demoted home page");
    }

    tree.set_home(id, true)?;
    tree.reparent(id, None)?;
    tree.set_path(id, "")?;
    tracing::debug!(page = %id, "promoted page to home");

    Ok(demoted)
}
