//! engine
//!
//! Orchestrates page saves: Load -> Lifecycle -> Verify -> Commit.
//!
//! # Architecture
//!
//! 1. **Load**: Read a snapshot from the store and build a [`PageTree`]
//! 2. **Lifecycle**: Run the save pipeline on a private copy of the tree
//! 3. **Verify**: Check invariants for every page the save touched
//! 4. **Commit**: Hand every touched record to the store in one
//!    compare-and-swap commit
//!
//! # Invariants
//!
//! - The committed tree is never mutated in place; a failed save leaves
//!   no partial state behind
//! - All mutations flow through [`PageService`]
//! - Verification failure after a save indicates a bug and aborts the save
//!
//! [`PageTree`]: crate::core::tree::PageTree

pub mod lifecycle;
pub mod propagate;
pub mod resolver;
pub mod service;

pub use lifecycle::{NewPage, PageChanges, SaveReport, SaveState};
pub use resolver::resolve;
pub use service::{PageService, SaveOutcome};

use thiserror::Error;

use crate::core::config::{Config, PathConflictPolicy};
use crate::core::page::{PageFieldError, DEFAULT_TEMPLATE};
use crate::core::store::StoreError;
use crate::core::tree::TreeError;
use crate::core::types::{PageId, TypeError};

/// Settings that shape a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSettings {
    /// What to do when a computed path is taken.
    pub path_conflict: PathConflictPolicy,
    /// Template for pages created without one.
    pub default_template: String,
}

impl Default for SaveSettings {
    fn default() -> Self {
        Self {
            path_conflict: PathConflictPolicy::default(),
            default_template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl SaveSettings {
    /// Settings with configured values applied.
    pub fn from_config(config: &Config) -> Self {
        Self {
            path_conflict: config.path_conflict(),
            default_template: config.default_template().to_string(),
        }
    }

    /// Replace the conflict policy.
    pub fn with_path_conflict(mut self, policy: PathConflictPolicy) -> Self {
        self.path_conflict = policy;
        self
    }
}

/// Input rejected before anything was saved.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Field(#[from] PageFieldError),

    #[error(transparent)]
    Slug(#[from] TypeError),

    #[error("title '{0}' produces an empty slug; set a slug explicitly")]
    EmptySlug(String),

    #[error("parent page does not exist: {0}")]
    UnknownParent(PageId),
}

/// Errors from page operations.
#[derive(Debug, Error)]
pub enum PageError {
    /// Input failed validation.
    #[error("invalid page: {0}")]
    Validation(#[from] ValidationError),

    /// A reparent would make a page its own ancestor.
    #[error("cannot move page {page} under {parent}: it would become its own ancestor")]
    Cycle { page: PageId, parent: PageId },

    /// No page has the requested path.
    #[error("no page at path '{0}'")]
    NotFound(String),

    /// No page has the requested id.
    #[error("page not found: {0}")]
    PageNotFound(PageId),

    /// A computed path is already held by another page.
    #[error("path '{path}' is already used by page {holder}")]
    PathConflict {
        path: String,
        page: PageId,
        holder: PageId,
    },

    /// A sibling already holds the page's slug.
    #[error("slug '{slug}' is already used by sibling page {holder}")]
    SlugConflict {
        slug: String,
        page: PageId,
        holder: PageId,
    },

    /// Stored or computed state violates a tree invariant.
    #[error("inconsistent page tree: {0}")]
    Consistency(String),

    /// The store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<TreeError> for PageError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::PageNotFound(id) => PageError::PageNotFound(id),
            TreeError::Cycle { page, parent } => PageError::Cycle { page, parent },
            other => PageError::Consistency(other.to_string()),
        }
    }
}

impl From<PageFieldError> for PageError {
    fn from(err: PageFieldError) -> Self {
        PageError::Validation(err.into())
    }
}

impl From<TypeError> for PageError {
    fn from(err: TypeError) -> Self {
        PageError::Validation(err.into())
    }
}
