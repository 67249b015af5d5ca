//! move command - Move a page under a new parent

use anyhow::{Context as _, Result};

use super::{find_page, open_service, report_save};
use crate::cli::Context;

/// Move a page.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `page` - Page to move, by id or path
/// * `parent` - New parent, by id or path; `None` moves to the root
pub fn move_page(ctx: &Context, page: &str, parent: Option<&str>) -> Result<()> {
    let service = open_service(ctx)?;
    let tree = service.tree().context("Failed to load page tree")?;

    let id = find_page(&tree, page)?.id;
    let parent = match parent {
        Some(arg) => Some(find_page(&tree, arg).context("Unknown parent")?.id),
        None => None,
    };

    let outcome = service
        .reparent(id, parent)
        .context("Failed to move page")?;
    report_save(ctx, "Moved", &outcome)
}
