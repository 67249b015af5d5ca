//! engine::lifecycle
//!
//! The save pipeline for a single page.
//!
//! # States
//!
//! ```text
//! New -> SlugResolved -> HomeResolved -> PathResolved -> Persisted -> DescendantsPropagated
//!                              |                            ^
//!                              +------- (home page) --------+
//! ```
//!
//! - **SlugResolved**: explicit slug, or one derived from the title
//! - **HomeResolved**: the single-home invariant is settled
//! - **PathResolved**: the page's path is computed and conflicts settled
//! - **Persisted**: the page record is final and validated
//! - **DescendantsPropagated**: every page below a moved page is re-derived
//!
//! # Transactions
//!
//! Stages mutate the tree they are given. On error that tree is left in an
//! unspecified state: callers run the pipeline on a private copy and
//! discard it on failure (see [`PageService`](super::PageService)).

use std::fmt;

use crate::core::home::promote_to_home;
use crate::core::naming::slugify;
use crate::core::page::{validate_title, Page};
use crate::core::path::build_path;
use crate::core::tree::PageTree;
use crate::core::types::{PageId, Slug};

use super::propagate::{self, PlannedPath};
use super::{PageError, SaveSettings, ValidationError};

/// Pipeline stage reached by a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    New,
    SlugResolved,
    HomeResolved,
    PathResolved,
    Persisted,
    DescendantsPropagated,
}

impl fmt::Display for SaveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SaveState::New => "new",
            SaveState::SlugResolved => "slug-resolved",
            SaveState::HomeResolved => "home-resolved",
            SaveState::PathResolved => "path-resolved",
            SaveState::Persisted => "persisted",
            SaveState::DescendantsPropagated => "descendants-propagated",
        };
        f.write_str(name)
    }
}

/// A page to create.
///
/// # Example
///
/// ```
/// use pagetree::engine::NewPage;
///
/// let page = NewPage::new("About Us").with_slug("about");
/// assert_eq!(page.slug.as_deref(), Some("about"));
/// assert!(!page.is_home);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPage {
    pub title: String,
    /// Explicit slug; derived from the title when absent.
    pub slug: Option<String>,
    pub parent: Option<PageId>,
    pub is_home: bool,
    /// Template; the configured default when absent.
    pub template: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub style: Option<String>,
}

impl NewPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_parent(mut self, parent: PageId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn as_home(mut self) -> Self {
        self.is_home = true;
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

/// Field changes to an existing page. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    /// `Some(None)` moves the page to the root.
    pub parent: Option<Option<PageId>>,
    pub is_home: Option<bool>,
    pub template: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub style: Option<String>,
}

impl PageChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn parent(mut self, parent: Option<PageId>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn home(mut self, is_home: bool) -> Self {
        self.is_home = Some(is_home);
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn seo_title(mut self, seo_title: impl Into<String>) -> Self {
        self.seo_title = Some(seo_title.into());
        self
    }

    pub fn seo_description(mut self, seo_description: impl Into<String>) -> Self {
        self.seo_description = Some(seo_description.into());
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

/// What a save did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// The saved page.
    pub page: PageId,
    /// Stages passed, in order.
    pub transitions: Vec<SaveState>,
    /// Every page to commit: the saved page first, then demoted homes and
    /// re-derived descendants.
    pub changed: Vec<PageId>,
    /// Pages that lost the home flag.
    pub demoted: Vec<PageId>,
    /// Pages other than the saved one whose path was re-derived.
    pub propagated: Vec<PageId>,
}

impl SaveReport {
    fn new(page: PageId) -> Self {
        Self {
            page,
            transitions: vec![SaveState::New],
            changed: Vec::new(),
            demoted: Vec::new(),
            propagated: Vec::new(),
        }
    }

    fn advance(&mut self, state: SaveState) {
        tracing::debug!(page = %self.page, state = %state, "save stage");
        self.transitions.push(state);
    }

    fn mark_changed(&mut self, id: PageId) {
        if !self.changed.contains(&id) {
            self.changed.push(id);
        }
    }

    /// Final stage reached.
    pub fn state(&self) -> SaveState {
        self.transitions.last().copied().unwrap_or(SaveState::New)
    }
}

/// Decide a page's slug.
///
/// - An explicit slug wins and must already be in slug form.
/// - A new page (`stored` is `None`) gets the slugified title.
/// - On update, the slug follows a title change only while it still equals
///   the slugified old title; an edited slug is kept.
///
/// `stored` is the current slug and title of an existing page.
///
/// # Errors
///
/// - [`ValidationError::Slug`] for a malformed explicit slug
/// - [`ValidationError::EmptySlug`] if the title has nothing slug-worthy
///
/// # Example
///
/// ```
/// use pagetree::core::types::Slug;
/// use pagetree::engine::lifecycle::resolve_slug;
///
/// let derived = resolve_slug(None, "Old Name", None).unwrap();
/// assert_eq!(derived.as_str(), "old-name");
///
/// // Derived slugs follow the title
/// let renamed = resolve_slug(None, "New Name", Some((&derived, "Old Name"))).unwrap();
/// assert_eq!(renamed.as_str(), "new-name");
///
/// // Edited slugs do not
/// let custom = Slug::new("custom").unwrap();
/// let kept = resolve_slug(None, "New Name", Some((&custom, "Old Name"))).unwrap();
/// assert_eq!(kept, custom);
/// ```
pub fn resolve_slug(
    explicit: Option<&str>,
    title: &str,
    stored: Option<(&Slug, &str)>,
) -> Result<Slug, ValidationError> {
    if let Some(explicit) = explicit {
        return Ok(Slug::new(explicit)?);
    }

    let derive = || Slug::from_text(title).ok_or_else(|| ValidationError::EmptySlug(title.into()));

    match stored {
        None => derive(),
        Some((slug, old_title)) if old_title != title && slug.as_str() == slugify(old_title) => {
            derive()
        }
        Some((slug, _)) => Ok(slug.clone()),
    }
}

/// Create a page and settle the tree around it.
///
/// # Errors
///
/// - [`PageError::Validation`] for bad input or an unknown parent
/// - [`PageError::PathConflict`] if the computed path is taken
/// - [`PageError::SlugConflict`] if the home page and a root share a slug
pub fn create(
    tree: &mut PageTree,
    new: NewPage,
    settings: &SaveSettings,
) -> Result<SaveReport, PageError> {
    validate_title(&new.title).map_err(ValidationError::from)?;
    if let Some(parent) = new.parent {
        if !tree.contains(parent) {
            return Err(ValidationError::UnknownParent(parent).into());
        }
    }

    let slug = resolve_slug(new.slug.as_deref(), &new.title, None)?;

    let mut page = Page::new(PageId::new(), new.title, slug);
    page.parent = new.parent;
    page.template = new
        .template
        .unwrap_or_else(|| settings.default_template.clone());
    page.seo_title = new.seo_title.unwrap_or_default();
    page.seo_description = new.seo_description.unwrap_or_default();
    page.style = new.style.unwrap_or_default();

    let id = page.id;
    tree.insert(page)?;

    let mut report = SaveReport::new(id);
    report.advance(SaveState::SlugResolved);
    settle(tree, &mut report, new.is_home, false, true, settings)?;
    Ok(report)
}

/// Apply changes to a page and settle the tree around it.
///
/// # Errors
///
/// - [`PageError::PageNotFound`] if the page does not exist
/// - [`PageError::Validation`] for bad input or an unknown parent
/// - [`PageError::Cycle`] if the new parent lies below the page
/// - [`PageError::PathConflict`] if a computed path is taken
/// - [`PageError::SlugConflict`] if the home page and a root share a slug
pub fn update(
    tree: &mut PageTree,
    id: PageId,
    changes: PageChanges,
    settings: &SaveSettings,
) -> Result<SaveReport, PageError> {
    let current = tree.require(id)?.clone();

    if let Some(title) = &changes.title {
        validate_title(title).map_err(ValidationError::from)?;
    }
    if let Some(Some(parent)) = changes.parent {
        if !tree.contains(parent) {
            return Err(ValidationError::UnknownParent(parent).into());
        }
    }

    let mut report = SaveReport::new(id);

    // New -> SlugResolved
    let title = changes.title.unwrap_or_else(|| current.title.clone());
    let slug = resolve_slug(
        changes.slug.as_deref(),
        &title,
        Some((&current.slug, &current.title)),
    )?;
    if title != current.title {
        tree.set_title(id, title)?;
    }
    let slug_changed = slug != current.slug;
    if slug_changed {
        tree.set_slug(id, slug)?;
    }
    report.advance(SaveState::SlugResolved);

    let is_home = changes.is_home.unwrap_or(current.is_home);
    match changes.parent {
        // A home page has no parent; the enforcer detaches it
        Some(_) if is_home => {
            tracing::debug!(page = %id, "ignoring parent change for home page");
        }
        Some(parent) => tree.reparent(id, parent)?,
        None => {}
    }

    let mut attrs = tree.attributes_mut(id)?;
    if let Some(template) = changes.template {
        *attrs.template = template;
    }
    if let Some(seo_title) = changes.seo_title {
        *attrs.seo_title = seo_title;
    }
    if let Some(seo_description) = changes.seo_description {
        *attrs.seo_description = seo_description;
    }
    if let Some(style) = changes.style {
        *attrs.style = style;
    }

    let relocated =
        slug_changed || is_home != current.is_home || tree.parent(id) != current.parent;
    settle(tree, &mut report, is_home, current.is_home, relocated, settings)?;
    Ok(report)
}

/// Make a page the home page.
pub fn promote(
    tree: &mut PageTree,
    id: PageId,
    settings: &SaveSettings,
) -> Result<SaveReport, PageError> {
    update(tree, id, PageChanges::new().home(true), settings)
}

/// Move a page under a new parent, or to the root.
pub fn reparent(
    tree: &mut PageTree,
    id: PageId,
    parent: Option<PageId>,
    settings: &SaveSettings,
) -> Result<SaveReport, PageError> {
    update(tree, id, PageChanges::new().parent(parent), settings)
}

/// Stages from `SlugResolved` on.
///
/// `relocated` is set when the page's slug, parent or home flag changed;
/// only then is its slug checked against its siblings.
fn settle(
    tree: &mut PageTree,
    report: &mut SaveReport,
    is_home: bool,
    was_home: bool,
    relocated: bool,
    settings: &SaveSettings,
) -> Result<(), PageError> {
    let id = report.page;
    let old_path = tree.require(id)?.path.clone();

    // SlugResolved -> HomeResolved
    let mut roots = Vec::new();
    if is_home {
        report.demoted = promote_to_home(tree, id)?;
        // The enforcer already gave the page its path
        if old_path != tree.require(id)?.path {
            roots.push(id);
        }
    } else {
        if was_home {
            tree.set_home(id, false)?;
            tracing::debug!(page = %id, "page is no longer home");
        }
        if build_path(tree, id)? != old_path {
            roots.push(id);
        }
    }
    roots.extend(report.demoted.iter().copied());
    report.advance(SaveState::HomeResolved);

    // HomeResolved -> PathResolved
    let owned: Vec<PageId> = std::iter::once(id)
        .chain(report.demoted.iter().copied())
        .collect();
    let mut plan = propagate::settle(tree, &roots, &owned, settings.path_conflict)?;
    // Paths keep non-home siblings apart; the home page's empty path does not
    if relocated && propagate::settle_slug(tree, id, settings.path_conflict)? {
        if !roots.contains(&id) {
            roots.insert(0, id);
        }
        plan = propagate::settle(tree, &roots, &owned, settings.path_conflict)?;
    }
    if !is_home {
        report.advance(SaveState::PathResolved);
    }

    // PathResolved -> Persisted
    let (own, rest): (Vec<PlannedPath>, Vec<PlannedPath>) =
        plan.into_iter().partition(|entry| entry.page == id);
    propagate::apply(tree, &own)?;
    tree.touch(id)?;
    tree.require(id)?
        .validate()
        .map_err(ValidationError::from)?;
    report.mark_changed(id);
    report.advance(SaveState::Persisted);

    // Persisted -> DescendantsPropagated
    for demoted in report.demoted.clone() {
        report.mark_changed(demoted);
    }
    let moved = propagate::apply(tree, &rest)?;
    for page in moved {
        report.mark_changed(page);
        if !report.propagated.contains(&page) {
            report.propagated.push(page);
        }
    }
    report.advance(SaveState::DescendantsPropagated);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PathConflictPolicy;
    use crate::core::verify::fast_verify;

    fn settings() -> SaveSettings {
        SaveSettings::default()
    }

    fn create_page(tree: &mut PageTree, new: NewPage) -> PageId {
        create(tree, new, &settings()).unwrap().page
    }

    fn path(tree: &PageTree, id: PageId) -> &str {
        &tree.get(id).unwrap().path
    }

    mod slugs {
        use super::*;

        #[test]
        fn explicit_slug_wins() {
            let slug = resolve_slug(Some("custom"), "Title", None).unwrap();
            assert_eq!(slug.as_str(), "custom");
        }

        #[test]
        fn explicit_slug_must_be_normalized() {
            assert!(matches!(
                resolve_slug(Some("Not A Slug"), "Title", None),
                Err(ValidationError::Slug(_))
            ));
        }

        #[test]
        fn empty_derived_slug_rejected() {
            assert_eq!(
                resolve_slug(None, "!!!", None),
                Err(ValidationError::EmptySlug("!!!".into()))
            );
        }

        #[test]
        fn unchanged_title_keeps_slug() {
            let slug = Slug::new("custom").unwrap();
            assert_eq!(
                resolve_slug(None, "Title", Some((&slug, "Title"))).unwrap(),
                slug
            );
        }
    }

    mod create {
        use super::*;

        #[test]
        fn root_page() {
            let mut tree = PageTree::new();
            let report = create(&mut tree, NewPage::new("My Page!"), &settings()).unwrap();

            let page = tree.get(report.page).unwrap();
            assert_eq!(page.slug.as_str(), "my-page");
            assert_eq!(page.path, "my-page/");
            assert_eq!(page.template, "page.html");
            assert_eq!(report.changed, vec![report.page]);
            assert_eq!(
                report.transitions,
                vec![
                    SaveState::New,
                    SaveState::SlugResolved,
                    SaveState::HomeResolved,
                    SaveState::PathResolved,
                    SaveState::Persisted,
                    SaveState::DescendantsPropagated,
                ]
            );
        }

        #[test]
        fn child_page() {
            let mut tree = PageTree::new();
            let parent = create_page(&mut tree, NewPage::new("Home"));
            let child = create_page(&mut tree, NewPage::new("About").with_parent(parent));
            assert_eq!(path(&tree, child), "home/about/");
        }

        #[test]
        fn home_page_skips_path_stage() {
            let mut tree = PageTree::new();
            let report = create(&mut tree, NewPage::new("Home").as_home(), &settings()).unwrap();

            assert_eq!(path(&tree, report.page), "");
            assert!(!report.transitions.contains(&SaveState::PathResolved));
            assert_eq!(report.state(), SaveState::DescendantsPropagated);
        }

        #[test]
        fn home_page_with_parent_is_detached() {
            let mut tree = PageTree::new();
            let docs = create_page(&mut tree, NewPage::new("Docs"));
            let home = create_page(&mut tree, NewPage::new("Start").with_parent(docs).as_home());

            let page = tree.get(home).unwrap();
            assert!(page.parent.is_none());
            assert_eq!(page.path, "");
        }

        #[test]
        fn configured_template_applies() {
            let mut tree = PageTree::new();
            let settings = SaveSettings {
                default_template: "landing.html".into(),
                ..SaveSettings::default()
            };
            let report = create(&mut tree, NewPage::new("Start"), &settings).unwrap();
            assert_eq!(tree.get(report.page).unwrap().template, "landing.html");
        }

        #[test]
        fn unknown_parent_rejected() {
            let mut tree = PageTree::new();
            let ghost = PageId::new();
            let err = create(&mut tree, NewPage::new("Orphan").with_parent(ghost), &settings())
                .unwrap_err();
            assert!(matches!(
                err,
                PageError::Validation(ValidationError::UnknownParent(p)) if p == ghost
            ));
        }

        #[test]
        fn blank_title_rejected() {
            let mut tree = PageTree::new();
            let err = create(&mut tree, NewPage::new("  "), &settings()).unwrap_err();
            assert!(matches!(err, PageError::Validation(_)));
        }

        #[test]
        fn duplicate_path_rejected() {
            let mut tree = PageTree::new();
            create_page(&mut tree, NewPage::new("About"));
            let err = create(&mut tree, NewPage::new("About"), &settings()).unwrap_err();
            assert!(matches!(err, PageError::PathConflict { ref path, .. } if path == "about/"));
        }

        #[test]
        fn duplicate_path_suffixed() {
            let mut tree = PageTree::new();
            let settings = settings().with_path_conflict(PathConflictPolicy::Suffix);
            create(&mut tree, NewPage::new("About"), &settings).unwrap();
            let report = create(&mut tree, NewPage::new("About"), &settings).unwrap();

            let page = tree.get(report.page).unwrap();
            assert_eq!(page.slug.as_str(), "about-2");
            assert_eq!(page.path, "about-2/");
        }
    }

    mod update {
        use super::*;

        #[test]
        fn rename_propagates_to_descendants() {
            let mut tree = PageTree::new();
            let home = create_page(&mut tree, NewPage::new("Home"));
            let about = create_page(&mut tree, NewPage::new("About").with_parent(home));
            let team = create_page(&mut tree, NewPage::new("Team").with_parent(about));

            let report =
                update(&mut tree, home, PageChanges::new().title("Welcome"), &settings()).unwrap();

            assert_eq!(path(&tree, home), "welcome/");
            assert_eq!(path(&tree, about), "welcome/about/");
            assert_eq!(path(&tree, team), "welcome/about/team/");
            assert_eq!(report.changed, vec![home, about, team]);
            assert_eq!(report.propagated, vec![about, team]);
        }

        #[test]
        fn edited_slug_survives_rename() {
            let mut tree = PageTree::new();
            let id = create_page(&mut tree, NewPage::new("About").with_slug("info"));

            update(&mut tree, id, PageChanges::new().title("About Us"), &settings()).unwrap();

            assert_eq!(tree.get(id).unwrap().slug.as_str(), "info");
            assert_eq!(path(&tree, id), "info/");
        }

        #[test]
        fn title_only_change_without_move_commits_one_page() {
            let mut tree = PageTree::new();
            let id = create_page(&mut tree, NewPage::new("About").with_slug("info"));
            let child = create_page(&mut tree, NewPage::new("Team").with_parent(id));

            let report =
                update(&mut tree, id, PageChanges::new().title("Info"), &settings()).unwrap();

            assert_eq!(report.changed, vec![id]);
            assert_eq!(path(&tree, child), "info/team/");
        }

        #[test]
        fn explicit_slug_change() {
            let mut tree = PageTree::new();
            let id = create_page(&mut tree, NewPage::new("About"));
            update(&mut tree, id, PageChanges::new().slug("about-us"), &settings()).unwrap();
            assert_eq!(path(&tree, id), "about-us/");
        }

        #[test]
        fn attributes_updated() {
            let mut tree = PageTree::new();
            let id = create_page(&mut tree, NewPage::new("About"));
            update(
                &mut tree,
                id,
                PageChanges::new()
                    .template("wide.html")
                    .seo_title("About us")
                    .style("body { margin: 0 }"),
                &settings(),
            )
            .unwrap();

            let page = tree.get(id).unwrap();
            assert_eq!(page.template, "wide.html");
            assert_eq!(page.seo_title, "About us");
            assert_eq!(page.style, "body { margin: 0 }");
        }

        #[test]
        fn empty_template_rejected() {
            let mut tree = PageTree::new();
            let id = create_page(&mut tree, NewPage::new("About"));
            let err =
                update(&mut tree, id, PageChanges::new().template(""), &settings()).unwrap_err();
            assert!(matches!(err, PageError::Validation(_)));
        }

        #[test]
        fn unknown_page() {
            let mut tree = PageTree::new();
            let ghost = PageId::new();
            let err = update(&mut tree, ghost, PageChanges::new(), &settings()).unwrap_err();
            assert!(matches!(err, PageError::PageNotFound(p) if p == ghost));
        }
    }

    mod reparenting {
        use super::*;

        #[test]
        fn move_subtree() {
            let mut tree = PageTree::new();
            let a = create_page(&mut tree, NewPage::new("A"));
            let b = create_page(&mut tree, NewPage::new("B"));
            let c = create_page(&mut tree, NewPage::new("C").with_parent(a));

            reparent(&mut tree, a, Some(b), &settings()).unwrap();

            assert_eq!(path(&tree, a), "b/a/");
            assert_eq!(path(&tree, c), "b/a/c/");
            assert!(fast_verify(&tree).ok);
        }

        #[test]
        fn move_to_root() {
            let mut tree = PageTree::new();
            let a = create_page(&mut tree, NewPage::new("A"));
            let b = create_page(&mut tree, NewPage::new("B").with_parent(a));

            reparent(&mut tree, b, None, &settings()).unwrap();
            assert_eq!(path(&tree, b), "b/");
        }

        #[test]
        fn cycle_rejected() {
            let mut tree = PageTree::new();
            let a = create_page(&mut tree, NewPage::new("A"));
            let b = create_page(&mut tree, NewPage::new("B").with_parent(a));

            let err = reparent(&mut tree, a, Some(b), &settings()).unwrap_err();
            assert!(matches!(err, PageError::Cycle { page, parent } if page == a && parent == b));

            let err = reparent(&mut tree, a, Some(a), &settings()).unwrap_err();
            assert!(matches!(err, PageError::Cycle { .. }));
        }

        #[test]
        fn owned_page_suffixed_with_its_subtree() {
            let mut tree = PageTree::new();
            let settings = settings().with_path_conflict(PathConflictPolicy::Suffix);
            let a = create(&mut tree, NewPage::new("A"), &settings).unwrap().page;
            create(&mut tree, NewPage::new("X").with_parent(a), &settings).unwrap();
            let b = create(&mut tree, NewPage::new("B"), &settings).unwrap().page;
            let x2 = create(&mut tree, NewPage::new("X").with_parent(b), &settings)
                .unwrap()
                .page;

            update(&mut tree, b, PageChanges::new().slug("a"), &settings).unwrap();

            assert_eq!(tree.get(b).unwrap().slug.as_str(), "a-2");
            assert_eq!(path(&tree, b), "a-2/");
            assert_eq!(path(&tree, x2), "a-2/x/");
        }

        #[test]
        fn conflict_on_descendant_always_fails() {
            let mut tree = PageTree::new();
            let settings = settings().with_path_conflict(PathConflictPolicy::Suffix);
            let p = create(&mut tree, NewPage::new("P"), &settings).unwrap().page;
            let child = create(&mut tree, NewPage::new("Child").with_parent(p), &settings)
                .unwrap()
                .page;

            // Legacy record squatting on a path it does not own
            let mut squatter = Page::new(PageId::new(), "Z", Slug::new("z").unwrap());
            squatter.path = "new/child/".into();
            let squatter_id = squatter.id;
            tree.insert(squatter).unwrap();

            let err = update(&mut tree, p, PageChanges::new().slug("new"), &settings).unwrap_err();
            assert!(matches!(
                err,
                PageError::PathConflict { page, holder, .. } if page == child && holder == squatter_id
            ));
        }
    }

    mod home {
        use super::*;

        #[test]
        fn promotion_demotes_and_rederives_previous_home() {
            let mut tree = PageTree::new();
            let old = create_page(&mut tree, NewPage::new("Old").as_home());
            let child = create_page(&mut tree, NewPage::new("Child").with_parent(old));
            let new = create_page(&mut tree, NewPage::new("New"));
            assert_eq!(path(&tree, child), "child/");

            let report = promote(&mut tree, new, &settings()).unwrap();

            assert_eq!(report.demoted, vec![old]);
            assert_eq!(tree.homes(), vec![new]);
            assert_eq!(path(&tree, new), "");
            assert_eq!(path(&tree, old), "old/");
            assert_eq!(path(&tree, child), "old/child/");
            assert_eq!(report.changed, vec![new, old, child]);
            assert!(fast_verify(&tree).ok);
        }

        #[test]
        fn promoting_a_child_rederives_its_subtree() {
            let mut tree = PageTree::new();
            let docs = create_page(&mut tree, NewPage::new("Docs"));
            let intro = create_page(&mut tree, NewPage::new("Intro").with_parent(docs));
            let part = create_page(&mut tree, NewPage::new("Part").with_parent(intro));

            promote(&mut tree, intro, &settings()).unwrap();

            assert_eq!(path(&tree, intro), "");
            assert_eq!(path(&tree, part), "part/");
            assert!(tree.get(intro).unwrap().parent.is_none());
        }

        #[test]
        fn unflagging_home_makes_a_root() {
            let mut tree = PageTree::new();
            let home = create_page(&mut tree, NewPage::new("Home").as_home());
            let about = create_page(&mut tree, NewPage::new("About").with_parent(home));

            update(&mut tree, home, PageChanges::new().home(false), &settings()).unwrap();

            assert!(tree.homes().is_empty());
            assert_eq!(path(&tree, home), "home/");
            assert_eq!(path(&tree, about), "home/about/");
        }

        #[test]
        fn parent_change_ignored_for_home() {
            let mut tree = PageTree::new();
            let docs = create_page(&mut tree, NewPage::new("Docs"));
            let home = create_page(&mut tree, NewPage::new("Home").as_home());

            update(&mut tree, home, PageChanges::new().parent(Some(docs)), &settings()).unwrap();

            let page = tree.get(home).unwrap();
            assert!(page.parent.is_none());
            assert!(page.is_home);
        }

        #[test]
        fn promoted_page_must_not_twin_a_root() {
            let mut tree = PageTree::new();
            let root = create_page(&mut tree, NewPage::new("Intro"));
            let docs = create_page(&mut tree, NewPage::new("Docs"));
            let intro = create_page(&mut tree, NewPage::new("Intro").with_parent(docs));

            let err = promote(&mut tree, intro, &settings()).unwrap_err();
            assert!(matches!(
                err,
                PageError::SlugConflict { page, holder, .. } if page == intro && holder == root
            ));
        }

        #[test]
        fn home_slug_edit_checked_against_roots() {
            let mut tree = PageTree::new();
            let home = create_page(&mut tree, NewPage::new("Home").as_home());
            create_page(&mut tree, NewPage::new("Welcome"));

            let edit = || PageChanges::new().slug("welcome");

            let mut rejected = tree.clone();
            let err = update(&mut rejected, home, edit(), &settings()).unwrap_err();
            assert!(matches!(err, PageError::SlugConflict { .. }));

            let suffix = settings().with_path_conflict(PathConflictPolicy::Suffix);
            update(&mut tree, home, edit(), &suffix).unwrap();
            let page = tree.get(home).unwrap();
            assert_eq!(page.slug.as_str(), "welcome-2");
            assert_eq!(page.path, "");
            assert!(fast_verify(&tree).ok);
        }
    }
}
