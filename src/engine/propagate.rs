//! engine::propagate
//!
//! Path recomputation for a changed page and everything below it.
//!
//! # Architecture
//!
//! Propagation is two-phase:
//!
//! 1. **Plan**: walk the affected subtrees breadth-first with an explicit
//!    worklist and compute every new path without touching the tree
//! 2. **Apply**: once the plan is free of conflicts, write the paths
//!
//! A conflict is a planned path already held by a page that is not
//! moving, or two moving pages planned onto the same path. Under
//! [`PathConflictPolicy::Suffix`], a conflicting page owned by the save
//! gets a numbered slug and the plan is rebuilt.
//!
//! # Invariants
//!
//! - Planning never mutates the tree
//! - Each page is planned at most once, even if reachable from several roots
//! - Nothing is applied while a conflict remains

use std::collections::{HashMap, HashSet, VecDeque};

use crate::core::config::PathConflictPolicy;
use crate::core::page::{PageFieldError, PATH_MAX_LEN};
use crate::core::path::build_path;
use crate::core::tree::{PageTree, TreeError};
use crate::core::types::{PageId, Slug};

use super::{PageError, ValidationError};

/// Highest numeric suffix tried before giving up.
pub const MAX_SUFFIX: u32 = 100;

/// A page's current and planned path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPath {
    pub page: PageId,
    pub old: String,
    pub new: String,
}

impl PlannedPath {
    /// Whether the page's path changes.
    pub fn is_move(&self) -> bool {
        self.old != self.new
    }
}

/// Two pages would share a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub path: String,
    /// The moving page that hit the conflict.
    pub page: PageId,
    /// The page already holding (or also claiming) the path.
    pub holder: PageId,
    /// Whether `holder` is itself moving.
    pub holder_moving: bool,
}

/// Plan paths for `roots` and all their descendants, breadth-first.
///
/// # Errors
///
/// Returns [`TreeError::PageNotFound`] if a root is missing.
pub fn plan_paths(tree: &PageTree, roots: &[PageId]) -> Result<Vec<PlannedPath>, TreeError> {
    let mut plan = Vec::new();
    let mut visited = HashSet::new();
    let mut worklist: VecDeque<PageId> = roots.iter().copied().collect();

    while let Some(id) = worklist.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        let page = tree.require(id)?;
        plan.push(PlannedPath {
            page: id,
            old: page.path.clone(),
            new: build_path(tree, id)?,
        });
        worklist.extend(tree.child_ids(Some(id)).iter().copied());
    }

    Ok(plan)
}

/// First conflict in a plan, in plan order.
pub fn find_conflict(tree: &PageTree, plan: &[PlannedPath]) -> Option<Conflict> {
    let moving: HashSet<PageId> = plan.iter().filter(|p| p.is_move()).map(|p| p.page).collect();
    let mut claimed: HashMap<&str, PageId> = HashMap::new();

    for entry in plan.iter().filter(|p| p.is_move()) {
        let stationary = tree
            .path_owners(&entry.new)
            .into_iter()
            .find(|owner| *owner != entry.page && !moving.contains(owner));
        if let Some(holder) = stationary {
            return Some(Conflict {
                path: entry.new.clone(),
                page: entry.page,
                holder,
                holder_moving: false,
            });
        }

        if let Some(&holder) = claimed.get(entry.new.as_str()) {
            return Some(Conflict {
                path: entry.new.clone(),
                page: entry.page,
                holder,
                holder_moving: true,
            });
        }
        claimed.insert(entry.new.as_str(), entry.page);
    }

    None
}

/// Plan paths for `roots` and settle conflicts under `policy`.
///
/// `owned` lists the pages whose slug this save may change. Under
/// [`PathConflictPolicy::Suffix`] their slug is replaced with `slug-2`,
/// `slug-3`, ... until the plan is clean; the tree is updated with the
/// chosen slug.
///
/// # Errors
///
/// [`PageError::PathConflict`] if a conflict involves no owned page, the
/// policy is [`PathConflictPolicy::Reject`], or the suffixes run out.
pub fn settle(
    tree: &mut PageTree,
    roots: &[PageId],
    owned: &[PageId],
    policy: PathConflictPolicy,
) -> Result<Vec<PlannedPath>, PageError> {
    let mut suffixes: HashMap<PageId, (Slug, u32)> = HashMap::new();

    loop {
        let plan = plan_paths(tree, roots)?;
        let Some(conflict) = find_conflict(tree, &plan) else {
            return Ok(plan);
        };

        let renamable = [
            (conflict.page, true),
            (conflict.holder, conflict.holder_moving),
        ]
        .into_iter()
        .find(|(id, moving)| *moving && owned.contains(id))
        .map(|(id, _)| id);

        let target = match (policy, renamable) {
            (PathConflictPolicy::Suffix, Some(target)) => target,
            _ => return Err(conflict_error(conflict)),
        };

        let (base, n) = match suffixes.get(&target) {
            Some((base, n)) => (base.clone(), *n),
            None => (tree.require(target)?.slug.clone(), 2),
        };
        if n > MAX_SUFFIX {
            return Err(conflict_error(conflict));
        }

        let slug = base.with_suffix(n);
        tracing::debug!(
            page = %target,
            path = %conflict.path,
            slug = %slug,
            "path taken, retrying with suffixed slug"
        );
        tree.set_slug(target, slug)?;
        suffixes.insert(target, (base, n + 1));
    }
}

/// Give `page` a slug none of its siblings holds.
///
/// Returns whether the slug was changed. Under
/// [`PathConflictPolicy::Suffix`] the slug becomes `slug-2`, `slug-3`, ...
/// until it is free.
///
/// # Errors
///
/// [`PageError::SlugConflict`] if a sibling holds the slug and the policy
/// is [`PathConflictPolicy::Reject`], or the suffixes run out.
pub fn settle_slug(
    tree: &mut PageTree,
    page: PageId,
    policy: PathConflictPolicy,
) -> Result<bool, PageError> {
    let Some(holder) = tree.slug_twin(page) else {
        return Ok(false);
    };
    let base = tree.require(page)?.slug.clone();
    let clash = || PageError::SlugConflict {
        slug: base.to_string(),
        page,
        holder,
    };

    if policy == PathConflictPolicy::Reject {
        return Err(clash());
    }
    for n in 2..=MAX_SUFFIX {
        let slug = base.with_suffix(n);
        tree.set_slug(page, slug.clone())?;
        if tree.slug_twin(page).is_none() {
            tracing::debug!(page = %page, slug = %slug, "slug taken by a sibling, suffixed");
            return Ok(true);
        }
    }
    Err(clash())
}

/// Write planned paths to the tree.
///
/// Returns the pages whose path changed, in plan order.
///
/// # Errors
///
/// Fails before writing anything if a planned path is too long.
pub fn apply(tree: &mut PageTree, plan: &[PlannedPath]) -> Result<Vec<PageId>, PageError> {
    for entry in plan.iter().filter(|p| p.is_move()) {
        let len = entry.new.chars().count();
        if len > PATH_MAX_LEN {
            return Err(ValidationError::Field(PageFieldError::TooLong {
                field: "path",
                len,
                max: PATH_MAX_LEN,
            })
            .into());
        }
    }

    let mut moved = Vec::new();
    for entry in plan.iter().filter(|p| p.is_move()) {
        tree.set_path(entry.page, entry.new.as_str())?;
        tree.touch(entry.page)?;
        tracing::trace!(page = %entry.page, from = %entry.old, to = %entry.new, "path updated");
        moved.push(entry.page);
    }
    Ok(moved)
}

fn conflict_error(conflict: Conflict) -> PageError {
    PageError::PathConflict {
        path: conflict.path,
        page: conflict.page,
        holder: conflict.holder,
    }
}
