//! create command - Create a page

use anyhow::{Context as _, Result};

use super::{find_page, open_service, report_save};
use crate::cli::Context;
use crate::engine::NewPage;

/// Arguments for `pt create`.
#[derive(Debug, Default)]
pub struct CreateArgs {
    pub title: String,
    pub slug: Option<String>,
    /// Parent page, by id or path
    pub parent: Option<String>,
    pub home: bool,
    pub template: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub style: Option<String>,
}

/// Create a page.
pub fn create(ctx: &Context, args: CreateArgs) -> Result<()> {
    let service = open_service(ctx)?;

    let parent = match args.parent {
        Some(ref arg) => {
            let tree = service.tree().context("Failed to load page tree")?;
            Some(find_page(&tree, arg).context("Unknown parent")?.id)
        }
        None => None,
    };

    let new = NewPage {
        title: args.title,
        slug: args.slug,
        parent,
        is_home: args.home,
        template: args.template,
        seo_title: args.seo_title,
        seo_description: args.seo_description,
        style: args.style,
    };

    let outcome = service.create(new).context("Failed to create page")?;
    report_save(ctx, "Created", &outcome)
}
