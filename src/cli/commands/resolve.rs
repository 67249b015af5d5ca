//! resolve command - Find the page serving a request path

use anyhow::{Context as _, Result};

use super::open_service;
use crate::cli::Context;
use crate::engine::resolver;
use crate::ui::output;

/// Find the page serving a request path.
///
/// With `url`, one leading `/` is stripped before the exact match.
pub fn resolve(ctx: &Context, path: &str, url: bool) -> Result<()> {
    let service = open_service(ctx)?;
    let page = if url {
        let tree = service.tree().context("Failed to load page tree")?;
        resolver::resolve_url(&tree, path)?.clone()
    } else {
        service.resolve(path)?
    };

    if ctx.json {
        output::json(&page)?;
    } else {
        output::print(output::format_page(&page), ctx.verbosity());
    }
    Ok(())
}
