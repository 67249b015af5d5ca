//! tree command - Display the page tree

use anyhow::{Context as _, Result};

use super::open_service;
use crate::cli::Context;
use crate::core::page::Page;
use crate::ui::output;

/// Display the page tree, parents before children.
pub fn tree(ctx: &Context) -> Result<()> {
    let service = open_service(ctx)?;
    let tree = service.tree().context("Failed to load page tree")?;
    let ordered = tree.preorder();

    if ctx.json {
        let pages: Vec<&Page> = ordered.iter().map(|(_, page)| *page).collect();
        output::json(&pages)?;
        return Ok(());
    }

    let verbosity = ctx.verbosity();
    if ordered.is_empty() {
        output::print("No pages.", verbosity);
        return Ok(());
    }
    for (depth, page) in ordered {
        output::print(output::format_tree_line(depth, page), verbosity);
    }
    Ok(())
}
