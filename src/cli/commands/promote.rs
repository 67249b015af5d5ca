//! promote command - Make a page the home page

use anyhow::{Context as _, Result};

use super::{find_page, open_service, report_save};
use crate::cli::Context;

/// Make a page the home page.
pub fn promote(ctx: &Context, page: &str) -> Result<()> {
    let service = open_service(ctx)?;
    let tree = service.tree().context("Failed to load page tree")?;
    let id = find_page(&tree, page)?.id;

    let outcome = service
        .promote_to_home(id)
        .context("Failed to promote page")?;
    report_save(ctx, "Promoted", &outcome)
}
