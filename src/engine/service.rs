//! engine::service
//!
//! The inbound API for page mutations and lookups.
//!
//! # Service Contract
//!
//! Every mutation:
//! 1. Loads a snapshot and builds the tree
//! 2. Runs the lifecycle on a private copy
//! 3. Verifies the copy; a new violation involving a touched page aborts
//! 4. Commits every touched record in one compare-and-swap commit
//!
//! A concurrent writer surfaces as [`StoreError::RevisionMismatch`] wrapped
//! in [`PageError::Store`]. The service never retries.
//!
//! # Example
//!
//! ```
//! use pagetree::core::store::MemoryStore;
//! use pagetree::engine::{NewPage, PageChanges, PageService};
//!
//! let service = PageService::new(MemoryStore::new());
//!
//! let home = service.create(NewPage::new("Home")).unwrap().page;
//! let about = service
//!     .create(NewPage::new("About").with_parent(home.id))
//!     .unwrap()
//!     .page;
//! assert_eq!(about.path, "home/about/");
//!
//! service.update(home.id, PageChanges::new().title("Welcome")).unwrap();
//! assert_eq!(service.resolve("welcome/about/").unwrap().id, about.id);
//! ```
//!
//! [`StoreError::RevisionMismatch`]: crate::core::store::StoreError::RevisionMismatch

use crate::core::page::Page;
use crate::core::store::{PageStore, Revision};
use crate::core::tree::PageTree;
use crate::core::types::PageId;
use crate::core::verify::{fast_verify, VerifyError, VerifyResult};

use super::lifecycle::{self, NewPage, PageChanges, SaveReport};
use super::{resolver, PageError, SaveSettings};

/// Result of a committed save.
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    /// The saved page as committed.
    pub page: Page,
    pub report: SaveReport,
    /// Store revision after the commit.
    pub revision: Revision,
}

/// Page operations over a store.
#[derive(Debug)]
pub struct PageService<S> {
    store: S,
    settings: SaveSettings,
}

impl<S: PageStore> PageService<S> {
    /// Create a service with default settings.
    pub fn new(store: S) -> Self {
        Self::with_settings(store, SaveSettings::default())
    }

    /// Create a service with explicit settings.
    pub fn with_settings(store: S, settings: SaveSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &SaveSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a page.
    pub fn create(&self, new: NewPage) -> Result<SaveOutcome, PageError> {
        self.transact("create", |tree, settings| {
            lifecycle::create(tree, new, settings)
        })
    }

    /// Apply changes to a page.
    pub fn update(&self, id: PageId, changes: PageChanges) -> Result<SaveOutcome, PageError> {
        self.transact("update", |tree, settings| {
            lifecycle::update(tree, id, changes, settings)
        })
    }

    /// Make a page the home page, demoting any other.
    pub fn promote_to_home(&self, id: PageId) -> Result<SaveOutcome, PageError> {
        self.transact("promote", |tree, settings| {
            lifecycle::promote(tree, id, settings)
        })
    }

    /// Move a page under `parent`, or to the root.
    pub fn reparent(&self, id: PageId, parent: Option<PageId>) -> Result<SaveOutcome, PageError> {
        self.transact("reparent", |tree, settings| {
            lifecycle::reparent(tree, id, parent, settings)
        })
    }

    /// Find the page at a request path.
    pub fn resolve(&self, path: &str) -> Result<Page, PageError> {
        let (_, tree) = self.load_tree()?;
        resolver::resolve(&tree, path).cloned()
    }

    /// Get a page by id.
    pub fn get(&self, id: PageId) -> Result<Page, PageError> {
        let (_, tree) = self.load_tree()?;
        Ok(tree.require(id)?.clone())
    }

    /// The current home page, if exactly one exists.
    pub fn home(&self) -> Result<Option<Page>, PageError> {
        let (_, tree) = self.load_tree()?;
        Ok(crate::core::home::current_home(&tree).and_then(|id| tree.get(id).cloned()))
    }

    /// The whole tree at the current revision.
    pub fn tree(&self) -> Result<PageTree, PageError> {
        Ok(self.load_tree()?.1)
    }

    /// Check every invariant of the stored tree.
    pub fn verify(&self) -> Result<VerifyResult, PageError> {
        let (_, tree) = self.load_tree()?;
        Ok(fast_verify(&tree))
    }

    fn load_tree(&self) -> Result<(Revision, PageTree), PageError> {
        let snapshot = self.store.load()?;
        let tree = PageTree::from_pages(snapshot.pages).map_err(|e| {
            PageError::Consistency(format!("stored pages do not form a tree: {}", e))
        })?;
        Ok((snapshot.revision, tree))
    }

    fn transact<F>(&self, op: &'static str, f: F) -> Result<SaveOutcome, PageError>
    where
        F: FnOnce(&mut PageTree, &SaveSettings) -> Result<SaveReport, PageError>,
    {
        let (revision, committed) = self.load_tree()?;
        let before = fast_verify(&committed).errors;

        let mut working = committed.clone();
        let report = f(&mut working, &self.settings)?;

        check_save(&report, &before, fast_verify(&working).errors)?;

        let pages: Vec<Page> = report
            .changed
            .iter()
            .filter_map(|id| working.get(*id).cloned())
            .collect();
        let revision = self.store.commit(revision, &pages)?;

        tracing::info!(
            op,
            page = %report.page,
            changed = pages.len(),
            revision = %revision,
            "saved page"
        );

        let page = working
            .get(report.page)
            .cloned()
            .ok_or(PageError::PageNotFound(report.page))?;
        Ok(SaveOutcome {
            page,
            report,
            revision,
        })
    }
}

/// Fail on violations the save introduced that involve a page it touched.
///
/// Anything else is pre-existing or unrelated and only logged.
fn check_save(
    report: &SaveReport,
    before: &[VerifyError],
    after: Vec<VerifyError>,
) -> Result<(), PageError> {
    for err in after {
        let touched = err.pages().iter().any(|p| report.changed.contains(p));
        if touched && !before.contains(&err) {
            return Err(PageError::Consistency(err.to_string()));
        }
        tracing::warn!(error = %err, "page tree has a pre-existing violation");
    }
    Ok(())
}
