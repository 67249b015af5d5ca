//! core::verify
//!
//! Page tree invariant verification.
//!
//! # Checks
//!
//! - Acyclic parent pointers
//! - At most one home page; the home page has no parent and an empty path
//! - Every non-home path equals the concatenation of its ancestors' slugs
//! - Paths are unique
//! - Slugs are unique among the children of one parent, roots included
//!
//! # Invariants
//!
//! - Never mutates the tree
//! - Must be deterministic

use thiserror::Error;

use super::path::build_path;
use super::tree::PageTree;
use super::types::PageId;

/// An invariant violation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("cycle detected in page tree at page: {0}")]
    CycleDetected(PageId),

    #[error("{} pages are flagged as home", .0.len())]
    MultipleHomes(Vec<PageId>),

    #[error("home page {0} has a parent")]
    HomeHasParent(PageId),

    #[error("home page {page} has non-empty path '{path}'")]
    HomePathNotEmpty { page: PageId, path: String },

    #[error("page {page} has path '{actual}', expected '{expected}'")]
    StalePath {
        page: PageId,
        expected: String,
        actual: String,
    },

    #[error("path '{path}' is shared by {} pages", .pages.len())]
    SharedPath { path: String, pages: Vec<PageId> },

    #[error("slug '{slug}' is shared by {} sibling pages", .pages.len())]
    SharedSlug {
        parent: Option<PageId>,
        slug: String,
        pages: Vec<PageId>,
    },
}

impl VerifyError {
    /// Pages involved in this violation.
    pub fn pages(&self) -> Vec<PageId> {
        match self {
            VerifyError::CycleDetected(page) | VerifyError::HomeHasParent(page) => vec![*page],
            VerifyError::HomePathNotEmpty { page, .. } | VerifyError::StalePath { page, .. } => {
                vec![*page]
            }
            VerifyError::MultipleHomes(pages)
            | VerifyError::SharedPath { pages, .. }
            | VerifyError::SharedSlug { pages, .. } => pages.clone(),
        }
    }
}

/// Result of verification.
#[derive(Debug)]
pub struct VerifyResult {
    /// Whether verification passed
    pub ok: bool,
    /// Errors found during verification
    pub errors: Vec<VerifyError>,
}

impl VerifyResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: vec![],
        }
    }

    /// Create a failed result with errors.
    pub fn failure(errors: Vec<VerifyError>) -> Self {
        Self { ok: false, errors }
    }
}

/// Verify every invariant of the tree.
pub fn fast_verify(tree: &PageTree) -> VerifyResult {
    let mut errors = Vec::new();

    if let Some(page) = tree.find_cycle() {
        // Paths are meaningless on a cyclic tree
        return VerifyResult::failure(vec![VerifyError::CycleDetected(page)]);
    }

    let homes = tree.homes();
    if homes.len() > 1 {
        errors.push(VerifyError::MultipleHomes(homes.clone()));
    }

    for (_, page) in tree.preorder() {
        if page.is_home {
            if page.parent.is_some() {
                errors.push(VerifyError::HomeHasParent(page.id));
            }
            if !page.path.is_empty() {
                errors.push(VerifyError::HomePathNotEmpty {
                    page: page.id,
                    path: page.path.clone(),
                });
            }
            continue;
        }

        if let Ok(expected) = build_path(tree, page.id) {
            if expected != page.path {
                errors.push(VerifyError::StalePath {
                    page: page.id,
                    expected,
                    actual: page.path.clone(),
                });
            }
        }
    }

    for (path, pages) in tree.shared_paths() {
        // Several legacy homes share '' and are already reported
        if path.is_empty() && pages.iter().all(|id| homes.contains(id)) {
            continue;
        }
        errors.push(VerifyError::SharedPath {
            path: path.to_string(),
            pages,
        });
    }

    for (parent, slug, pages) in tree.shared_slugs() {
        // Siblings stored on one non-empty path are already reported
        let path_of = |id: &PageId| tree.get(*id).map(|p| p.path.as_str());
        let first = path_of(&pages[0]);
        if first != Some("") && pages.iter().all(|id| path_of(id) == first) {
            continue;
        }
        errors.push(VerifyError::SharedSlug {
            parent,
            slug: slug.to_string(),
            pages,
        });
    }

    if errors.is_empty() {
        VerifyResult::success()
    } else {
        VerifyResult::failure(errors)
    }
}
