//! update command - Change a page's fields

use anyhow::{bail, Context as _, Result};

use super::{find_page, open_service, report_save};
use crate::cli::Context;
use crate::engine::PageChanges;

/// Arguments for `pt update`.
#[derive(Debug, Default)]
pub struct UpdateArgs {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub unhome: bool,
    pub template: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub style: Option<String>,
}

impl UpdateArgs {
    fn into_changes(self) -> PageChanges {
        PageChanges {
            title: self.title,
            slug: self.slug,
            parent: None,
            is_home: self.unhome.then_some(false),
            template: self.template,
            seo_title: self.seo_title,
            seo_description: self.seo_description,
            style: self.style,
        }
    }
}

/// Change a page's fields.
pub fn update(ctx: &Context, page: &str, args: UpdateArgs) -> Result<()> {
    let changes = args.into_changes();
    if changes == PageChanges::default() {
        bail!("Nothing to update; pass at least one field to change");
    }

    let service = open_service(ctx)?;
    let tree = service.tree().context("Failed to load page tree")?;
    let id = find_page(&tree, page)?.id;

    let outcome = service
        .update(id, changes)
        .context("Failed to update page")?;
    report_save(ctx, "Updated", &outcome)
}
