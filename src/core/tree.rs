//! core::tree
//!
//! Page tree representation and operations.
//!
//! # Architecture
//!
//! The page tree is a forest where:
//! - Nodes are pages, owned by the tree and keyed by [`PageId`]
//! - Edges point from child to parent (stored as the page's `parent`)
//! - A children index (parent → ordered child ids) is derived from the
//!   parent pointers; root pages are listed under `None`
//! - A path index maps each materialized path to the pages holding it
//!
//! # Invariants
//!
//! - The tree is acyclic; [`PageTree::reparent`] refuses to create a cycle
//! - Every `parent` reference points at a page in the tree
//! - Siblings are ordered by title, then id
//!
//! Structural fields (`title`, `slug`, `path`, `parent`, `is_home`) only
//! change through the setters here so the indexes stay in sync.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use thiserror::Error;

use super::page::{AttributesMut, Page};
use super::types::{PageId, Slug};

/// Errors from tree operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("page not found: {0}")]
    PageNotFound(PageId),

    #[error("page already exists: {0}")]
    DuplicateId(PageId),

    #[error("cannot place page {page} under {parent}: it would become its own ancestor")]
    Cycle { page: PageId, parent: PageId },

    #[error("page {page} references missing parent {parent}")]
    DanglingParent { page: PageId, parent: PageId },
}

/// The page hierarchy.
#[derive(Debug, Clone, Default)]
pub struct PageTree {
    pages: HashMap<PageId, Page>,
    /// Ordered child ids per parent; roots live under `None`.
    children: HashMap<Option<PageId>, Vec<PageId>>,
    /// Pages per materialized path. More than one entry means a conflict.
    path_index: HashMap<String, BTreeSet<PageId>>,
}

impl PageTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from stored records.
    ///
    /// Duplicate paths and multiple home pages are accepted here so that
    /// legacy state can be loaded and corrected; [`verify`](super::verify)
    /// reports them.
    ///
    /// # Errors
    ///
    /// - [`TreeError::DuplicateId`] if two records share an id
    /// - [`TreeError::DanglingParent`] if a parent is missing
    /// - [`TreeError::Cycle`] if the parent pointers form a loop
    pub fn from_pages(pages: impl IntoIterator<Item = Page>) -> Result<Self, TreeError> {
        let mut tree = Self::new();

        for page in pages {
            if tree.pages.contains_key(&page.id) {
                return Err(TreeError::DuplicateId(page.id));
            }
            tree.index_path(page.path.clone(), page.id);
            tree.pages.insert(page.id, page);
        }

        let mut children: HashMap<Option<PageId>, Vec<PageId>> = HashMap::new();
        for page in tree.pages.values() {
            if let Some(parent) = page.parent {
                if !tree.pages.contains_key(&parent) {
                    return Err(TreeError::DanglingParent {
                        page: page.id,
                        parent,
                    });
                }
            }
            children.entry(page.parent).or_default().push(page.id);
        }
        for siblings in children.values_mut() {
            siblings.sort_by(|a, b| sibling_order(&tree.pages, a, b));
        }
        tree.children = children;

        if let Some(page) = tree.find_cycle() {
            let parent = tree.parent(page).unwrap_or(page);
            return Err(TreeError::Cycle { page, parent });
        }

        Ok(tree)
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the tree has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Check if a page exists.
    pub fn contains(&self, id: PageId) -> bool {
        self.pages.contains_key(&id)
    }

    /// Get a page.
    pub fn get(&self, id: PageId) -> Option<&Page> {
        self.pages.get(&id)
    }

    /// Get a page or fail with [`TreeError::PageNotFound`].
    pub fn require(&self, id: PageId) -> Result<&Page, TreeError> {
        self.pages.get(&id).ok_or(TreeError::PageNotFound(id))
    }

    /// Iterate over all pages in no particular order.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    /// Consume the tree, returning its pages in pre-order.
    pub fn into_pages(mut self) -> Vec<Page> {
        let order: Vec<PageId> = self.preorder().into_iter().map(|(_, p)| p.id).collect();
        order
            .into_iter()
            .filter_map(|id| self.pages.remove(&id))
            .collect()
    }

    /// Get the parent id of a page.
    pub fn parent(&self, id: PageId) -> Option<PageId> {
        self.pages.get(&id).and_then(|p| p.parent)
    }

    /// Ordered child ids of a parent (`None` for roots).
    pub fn child_ids(&self, parent: Option<PageId>) -> &[PageId] {
        self.children.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Children of a page, ordered by title.
    pub fn children(&self, id: PageId) -> Vec<&Page> {
        self.resolve_ids(self.child_ids(Some(id)))
    }

    /// Root pages, ordered by title.
    pub fn roots(&self) -> Vec<&Page> {
        self.resolve_ids(self.child_ids(None))
    }

    /// Ancestors of a page, ordered root first.
    ///
    /// # Example
    ///
    /// ```
    /// use pagetree::core::page::Page;
    /// use pagetree::core::tree::PageTree;
    /// use pagetree::core::types::{PageId, Slug};
    ///
    /// let mut tree = PageTree::new();
    /// let docs = Page::new(PageId::new(), "Docs", Slug::new("docs").unwrap());
    /// let mut guide = Page::new(PageId::new(), "Guide", Slug::new("guide").unwrap());
    /// guide.parent = Some(docs.id);
    /// let (docs_id, guide_id) = (docs.id, guide.id);
    /// tree.insert(docs).unwrap();
    /// tree.insert(guide).unwrap();
    ///
    /// let chain: Vec<_> = tree
    ///     .ancestors(guide_id, true)
    ///     .unwrap()
    ///     .iter()
    ///     .map(|p| p.id)
    ///     .collect();
    /// assert_eq!(chain, vec![docs_id, guide_id]);
    /// ```
    pub fn ancestors(&self, id: PageId, include_self: bool) -> Result<Vec<&Page>, TreeError> {
        let page = self.require(id)?;
        let mut chain = Vec::new();
        if include_self {
            chain.push(page);
        }

        let mut current = page.parent;
        while let Some(parent_id) = current {
            let parent = self.require(parent_id)?;
            chain.push(parent);
            current = parent.parent;
        }

        chain.reverse();
        Ok(chain)
    }

    /// All descendants of a page (children, grandchildren, etc.).
    ///
    /// Breadth-first, siblings in title order.
    pub fn descendants(&self, id: PageId) -> Vec<PageId> {
        let mut result = Vec::new();
        let mut seen = HashSet::new();
        let mut queue: VecDeque<PageId> = self.child_ids(Some(id)).iter().copied().collect();

        while let Some(current) = queue.pop_front() {
            if seen.insert(current) {
                result.push(current);
                queue.extend(self.child_ids(Some(current)).iter().copied());
            }
        }

        result
    }

    /// Check whether `candidate` lies strictly below `ancestor`.
    pub fn is_descendant(&self, candidate: PageId, ancestor: PageId) -> bool {
        let mut current = self.parent(candidate);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Pages in depth-first pre-order with their depth, siblings in title order.
    pub fn preorder(&self) -> Vec<(usize, &Page)> {
        let mut result = Vec::with_capacity(self.pages.len());
        let mut stack: Vec<(usize, PageId)> = self
            .child_ids(None)
            .iter()
            .rev()
            .map(|&id| (0, id))
            .collect();

        while let Some((depth, id)) = stack.pop() {
            if let Some(page) = self.pages.get(&id) {
                result.push((depth, page));
                stack.extend(
                    self.child_ids(Some(id))
                        .iter()
                        .rev()
                        .map(|&child| (depth + 1, child)),
                );
            }
        }

        result
    }

    /// Ids of every page flagged as home, sorted.
    pub fn homes(&self) -> Vec<PageId> {
        let mut homes: Vec<PageId> = self
            .pages
            .values()
            .filter(|p| p.is_home)
            .map(|p| p.id)
            .collect();
        homes.sort();
        homes
    }

    /// The page holding a materialized path.
    ///
    /// If several pages share the path (a conflict), the lowest id wins.
    pub fn path_owner(&self, path: &str) -> Option<&Page> {
        self.path_index
            .get(path)
            .and_then(|ids| ids.iter().next())
            .and_then(|id| self.pages.get(id))
    }

    /// Every page holding a materialized path.
    pub fn path_owners(&self, path: &str) -> Vec<PageId> {
        self.path_index
            .get(path)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Paths held by more than one page, sorted.
    pub fn shared_paths(&self) -> Vec<(&str, Vec<PageId>)> {
        let mut shared: Vec<(&str, Vec<PageId>)> = self
            .path_index
            .iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(path, ids)| (path.as_str(), ids.iter().copied().collect()))
            .collect();
        shared.sort();
        shared
    }

    /// Lowest-id sibling of `id` holding the same slug.
    ///
    /// Roots, the home page included, are siblings of each other.
    pub fn slug_twin(&self, id: PageId) -> Option<PageId> {
        let page = self.pages.get(&id)?;
        self.child_ids(page.parent)
            .iter()
            .filter(|other| **other != id)
            .filter(|other| self.pages.get(other).is_some_and(|p| p.slug == page.slug))
            .min()
            .copied()
    }

    /// Slugs held by more than one child of the same parent, sorted.
    pub fn shared_slugs(&self) -> Vec<(Option<PageId>, &Slug, Vec<PageId>)> {
        let mut groups: HashMap<(Option<PageId>, &Slug), Vec<PageId>> = HashMap::new();
        for page in self.pages.values() {
            groups
                .entry((page.parent, &page.slug))
                .or_default()
                .push(page.id);
        }

        let mut shared: Vec<(Option<PageId>, &Slug, Vec<PageId>)> = groups
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|((parent, slug), mut ids)| {
                ids.sort();
                (parent, slug, ids)
            })
            .collect();
        shared.sort();
        shared
    }

    /// Check the parent pointers for a loop.
    ///
    /// Returns `Some(page)` for a page on a cycle. Deterministic.
    pub fn find_cycle(&self) -> Option<PageId> {
        let mut cleared: HashSet<PageId> = HashSet::new();
        let mut ids: Vec<PageId> = self.pages.keys().copied().collect();
        ids.sort();

        for start in ids {
            let mut trail = HashSet::new();
            let mut current = Some(start);
            while let Some(id) = current {
                if cleared.contains(&id) {
                    break;
                }
                if !trail.insert(id) {
                    return Some(id);
                }
                current = self.parent(id);
            }
            cleared.extend(trail);
        }

        None
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Add a page.
    ///
    /// # Errors
    ///
    /// - [`TreeError::DuplicateId`] if the id is taken
    /// - [`TreeError::PageNotFound`] if the parent is missing
    pub fn insert(&mut self, page: Page) -> Result<(), TreeError> {
        if self.pages.contains_key(&page.id) {
            return Err(TreeError::DuplicateId(page.id));
        }
        if let Some(parent) = page.parent {
            if !self.pages.contains_key(&parent) {
                return Err(TreeError::PageNotFound(parent));
            }
        }

        let (id, parent) = (page.id, page.parent);
        self.index_path(page.path.clone(), id);
        self.pages.insert(id, page);
        self.link_child(parent, id);
        Ok(())
    }

    /// Move a page under a new parent (`None` makes it a root).
    ///
    /// The tree is unchanged on failure.
    ///
    /// # Errors
    ///
    /// - [`TreeError::PageNotFound`] if either page is missing
    /// - [`TreeError::Cycle`] if `new_parent` is the page or one of its descendants
    pub fn reparent(&mut self, id: PageId, new_parent: Option<PageId>) -> Result<(), TreeError> {
        let old_parent = self.require(id)?.parent;

        if let Some(parent) = new_parent {
            if !self.pages.contains_key(&parent) {
                return Err(TreeError::PageNotFound(parent));
            }
            if parent == id || self.is_descendant(parent, id) {
                return Err(TreeError::Cycle { page: id, parent });
            }
        }

        if old_parent == new_parent {
            return Ok(());
        }

        self.unlink_child(old_parent, id);
        if let Some(page) = self.pages.get_mut(&id) {
            page.parent = new_parent;
        }
        self.link_child(new_parent, id);
        Ok(())
    }

    /// Change a page's title, keeping sibling order.
    pub fn set_title(&mut self, id: PageId, title: impl Into<String>) -> Result<(), TreeError> {
        let parent = self.require(id)?.parent;
        self.unlink_child(parent, id);
        if let Some(page) = self.pages.get_mut(&id) {
            page.title = title.into();
        }
        self.link_child(parent, id);
        Ok(())
    }

    /// Change a page's slug. The path is not touched.
    pub fn set_slug(&mut self, id: PageId, slug: Slug) -> Result<(), TreeError> {
        let page = self.pages.get_mut(&id).ok_or(TreeError::PageNotFound(id))?;
        page.slug = slug;
        Ok(())
    }

    /// Change a page's materialized path.
    pub fn set_path(&mut self, id: PageId, path: impl Into<String>) -> Result<(), TreeError> {
        let path = path.into();
        let page = self.pages.get_mut(&id).ok_or(TreeError::PageNotFound(id))?;
        let old = std::mem::replace(&mut page.path, path.clone());
        self.unindex_path(&old, id);
        self.index_path(path, id);
        Ok(())
    }

    /// Set or clear the home flag. Parent and path are left to the caller.
    pub fn set_home(&mut self, id: PageId, is_home: bool) -> Result<(), TreeError> {
        let page = self.pages.get_mut(&id).ok_or(TreeError::PageNotFound(id))?;
        page.is_home = is_home;
        Ok(())
    }

    /// Bump a page's modification timestamp.
    pub fn touch(&mut self, id: PageId) -> Result<(), TreeError> {
        let page = self.pages.get_mut(&id).ok_or(TreeError::PageNotFound(id))?;
        page.touch();
        Ok(())
    }

    /// Mutable access to a page's opaque attributes.
    pub fn attributes_mut(&mut self, id: PageId) -> Result<AttributesMut<'_>, TreeError> {
        self.pages
            .get_mut(&id)
            .map(Page::attributes_mut)
            .ok_or(TreeError::PageNotFound(id))
    }

    // =========================================================================
    // Index maintenance
    // =========================================================================

    fn resolve_ids(&self, ids: &[PageId]) -> Vec<&Page> {
        ids.iter().filter_map(|id| self.pages.get(id)).collect()
    }

    fn link_child(&mut self, parent: Option<PageId>, id: PageId) {
        let pages = &self.pages;
        let siblings = self.children.entry(parent).or_default();
        let pos = siblings
            .binary_search_by(|probe| sibling_order(pages, probe, &id))
            .unwrap_or_else(|pos| pos);
        siblings.insert(pos, id);
    }

    fn unlink_child(&mut self, parent: Option<PageId>, id: PageId) {
        if let Some(siblings) = self.children.get_mut(&parent) {
            siblings.retain(|&c| c != id);
            if siblings.is_empty() {
                self.children.remove(&parent);
            }
        }
    }

    fn index_path(&mut self, path: String, id: PageId) {
        self.path_index.entry(path).or_default().insert(id);
    }

    fn unindex_path(&mut self, path: &str, id: PageId) {
        if let Some(ids) = self.path_index.get_mut(path) {
            ids.remove(&id);
            if ids.is_empty() {
                self.path_index.remove(path);
            }
        }
    }
}

/// Sibling ordering: title, then id.
fn sibling_order(pages: &HashMap<PageId, Page>, a: &PageId, b: &PageId) -> Ordering {
    let key = |id: &PageId| pages.get(id).map(|p| (p.title.as_str(), p.id));
    key(a).cmp(&key(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str, parent: Option<PageId>) -> Page {
        let mut page = Page::new(PageId::new(), title, Slug::from_text(title).unwrap());
        page.parent = parent;
        page
    }

    /// Build a tree from (title, parent index) pairs; returns ids in input order.
    fn build(spec: &[(&str, Option<usize>)]) -> (PageTree, Vec<PageId>) {
        let mut tree = PageTree::new();
        let mut ids = Vec::new();
        for (title, parent) in spec {
            let p = page(title, parent.map(|i| ids[i]));
            ids.push(p.id);
            tree.insert(p).unwrap();
        }
        (tree, ids)
    }

    fn titles(pages: &[&Page]) -> Vec<String> {
        pages.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn empty_tree_has_no_cycles() {
        let tree = PageTree::new();
        assert!(tree.find_cycle().is_none());
        assert!(tree.is_empty());
    }

    #[test]
    fn children_are_ordered_by_title() {
        let (tree, ids) = build(&[
            ("Root", None),
            ("Zeta", Some(0)),
            ("Alpha", Some(0)),
            ("Mu", Some(0)),
        ]);
        assert_eq!(titles(&tree.children(ids[0])), vec!["Alpha", "Mu", "Zeta"]);
    }

    #[test]
    fn roots_are_ordered_by_title() {
        let (tree, _) = build(&[("b", None), ("a", None), ("c", None)]);
        assert_eq!(titles(&tree.roots()), vec!["a", "b", "c"]);
    }

    #[test]
    fn set_title_resorts_siblings() {
        let (mut tree, ids) = build(&[("Root", None), ("Alpha", Some(0)), ("Beta", Some(0))]);
        tree.set_title(ids[1], "Zulu").unwrap();
        assert_eq!(titles(&tree.children(ids[0])), vec!["Beta", "Zulu"]);
    }

    #[test]
    fn ancestors_root_first() {
        let (tree, ids) = build(&[("a", None), ("b", Some(0)), ("c", Some(1))]);

        let with_self: Vec<PageId> = tree
            .ancestors(ids[2], true)
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(with_self, vec![ids[0], ids[1], ids[2]]);

        let without_self: Vec<PageId> = tree
            .ancestors(ids[2], false)
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(without_self, vec![ids[0], ids[1]]);

        assert!(tree.ancestors(ids[0], false).unwrap().is_empty());
    }

    #[test]
    fn ancestors_unknown_page() {
        let tree = PageTree::new();
        let id = PageId::new();
        assert_eq!(
            tree.ancestors(id, true).unwrap_err(),
            TreeError::PageNotFound(id)
        );
    }

    #[test]
    fn descendants_breadth_first() {
        // a -> (b -> d), c
        let (tree, ids) = build(&[("a", None), ("b", Some(0)), ("c", Some(0)), ("d", Some(1))]);
        assert_eq!(tree.descendants(ids[0]), vec![ids[1], ids[2], ids[3]]);
        assert_eq!(tree.descendants(ids[1]), vec![ids[3]]);
        assert!(tree.descendants(ids[3]).is_empty());
    }

    #[test]
    fn reparent_moves_subtree() {
        let (mut tree, ids) = build(&[("a", None), ("b", None), ("c", Some(0))]);
        tree.reparent(ids[2], Some(ids[1])).unwrap();

        assert_eq!(tree.parent(ids[2]), Some(ids[1]));
        assert!(tree.children(ids[0]).is_empty());
        assert_eq!(titles(&tree.children(ids[1])), vec!["c"]);
    }

    #[test]
    fn reparent_to_root() {
        let (mut tree, ids) = build(&[("a", None), ("b", Some(0))]);
        tree.reparent(ids[1], None).unwrap();
        assert_eq!(tree.parent(ids[1]), None);
        assert_eq!(titles(&tree.roots()), vec!["a", "b"]);
    }

    #[test]
    fn reparent_under_self_is_cycle() {
        let (mut tree, ids) = build(&[("a", None)]);
        assert_eq!(
            tree.reparent(ids[0], Some(ids[0])).unwrap_err(),
            TreeError::Cycle {
                page: ids[0],
                parent: ids[0]
            }
        );
    }

    #[test]
    fn reparent_under_descendant_is_cycle_and_leaves_tree_unchanged() {
        let (mut tree, ids) = build(&[("a", None), ("b", Some(0)), ("c", Some(1))]);

        let err = tree.reparent(ids[0], Some(ids[2])).unwrap_err();
        assert!(matches!(err, TreeError::Cycle { .. }));

        assert_eq!(tree.parent(ids[0]), None);
        assert_eq!(tree.parent(ids[1]), Some(ids[0]));
        assert_eq!(tree.parent(ids[2]), Some(ids[1]));
        assert_eq!(tree.descendants(ids[0]), vec![ids[1], ids[2]]);
    }

    #[test]
    fn reparent_unknown_parent() {
        let (mut tree, ids) = build(&[("a", None)]);
        let ghost = PageId::new();
        assert_eq!(
            tree.reparent(ids[0], Some(ghost)).unwrap_err(),
            TreeError::PageNotFound(ghost)
        );
    }

    #[test]
    fn insert_rejects_duplicates_and_missing_parent() {
        let mut tree = PageTree::new();
        let p = page("a", None);
        tree.insert(p.clone()).unwrap();
        assert_eq!(tree.insert(p.clone()), Err(TreeError::DuplicateId(p.id)));

        let ghost = PageId::new();
        let orphan = page("b", Some(ghost));
        assert_eq!(tree.insert(orphan), Err(TreeError::PageNotFound(ghost)));
    }

    #[test]
    fn path_index_follows_set_path() {
        let (mut tree, ids) = build(&[("a", None)]);
        tree.set_path(ids[0], "a/").unwrap();
        assert_eq!(tree.path_owner("a/").map(|p| p.id), Some(ids[0]));

        tree.set_path(ids[0], "b/").unwrap();
        assert!(tree.path_owner("a/").is_none());
        assert_eq!(tree.path_owner("b/").map(|p| p.id), Some(ids[0]));
    }

    #[test]
    fn shared_paths_reports_conflicts() {
        let (mut tree, ids) = build(&[("a", None), ("b", None)]);
        tree.set_path(ids[0], "x/").unwrap();
        tree.set_path(ids[1], "x/").unwrap();

        let shared = tree.shared_paths();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].0, "x/");
        assert_eq!(shared[0].1.len(), 2);
    }

    #[test]
    fn slug_twins_are_siblings_only() {
        let (mut tree, ids) = build(&[
            ("Home", None),
            ("Home", None),
            ("Docs", None),
            ("Home", Some(2)),
        ]);
        tree.set_home(ids[0], true).unwrap();

        assert_eq!(tree.slug_twin(ids[1]), Some(ids[0]));
        assert_eq!(tree.slug_twin(ids[0]), Some(ids[1]));
        assert_eq!(tree.slug_twin(ids[3]), None);
        assert_eq!(tree.slug_twin(ids[2]), None);

        let shared = tree.shared_slugs();
        assert_eq!(shared.len(), 1);
        let (parent, slug, pages) = &shared[0];
        assert_eq!(*parent, None);
        assert_eq!(slug.as_str(), "home");
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn from_pages_rebuilds_indexes() {
        let (tree, ids) = build(&[("a", None), ("c", Some(0)), ("b", Some(0))]);
        let pages: Vec<Page> = tree.pages().cloned().collect();

        let rebuilt = PageTree::from_pages(pages).unwrap();
        assert_eq!(titles(&rebuilt.children(ids[0])), vec!["b", "c"]);
        assert_eq!(rebuilt.len(), 3);
    }

    #[test]
    fn from_pages_rejects_dangling_parent() {
        let ghost = PageId::new();
        let orphan = page("a", Some(ghost));
        let id = orphan.id;
        assert_eq!(
            PageTree::from_pages(vec![orphan]).unwrap_err(),
            TreeError::DanglingParent {
                page: id,
                parent: ghost
            }
        );
    }

    #[test]
    fn from_pages_rejects_cycle() {
        let mut a = page("a", None);
        let mut b = page("b", None);
        a.parent = Some(b.id);
        b.parent = Some(a.id);

        let err = PageTree::from_pages(vec![a, b]).unwrap_err();
        assert!(matches!(err, TreeError::Cycle { .. }));
    }

    #[test]
    fn preorder_walks_depth_first() {
        let (tree, _) = build(&[("b", None), ("a", None), ("a2", Some(1)), ("a1", Some(1))]);
        let walk: Vec<(usize, String)> = tree
            .preorder()
            .into_iter()
            .map(|(d, p)| (d, p.title.clone()))
            .collect();
        assert_eq!(
            walk,
            vec![
                (0, "a".to_string()),
                (1, "a1".to_string()),
                (1, "a2".to_string()),
                (0, "b".to_string()),
            ]
        );
    }

    #[test]
    fn into_pages_is_preorder() {
        let (tree, ids) = build(&[("b", None), ("a", None)]);
        let pages = tree.into_pages();
        assert_eq!(pages.iter().map(|p| p.id).collect::<Vec<_>>(), vec![ids[1], ids[0]]);
    }

    #[test]
    fn homes_lists_flagged_pages() {
        let (mut tree, ids) = build(&[("a", None), ("b", None)]);
        assert!(tree.homes().is_empty());
        tree.set_home(ids[1], true).unwrap();
        assert_eq!(tree.homes(), vec![ids[1]]);
    }

    #[test]
    fn attributes_mut_edits_opaque_fields() {
        let (mut tree, ids) = build(&[("a", None)]);
        *tree.attributes_mut(ids[0]).unwrap().template = "landing.html".into();
        assert_eq!(tree.get(ids[0]).unwrap().template, "landing.html");
    }
}
