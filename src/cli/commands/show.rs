//! show command - Show all fields of a page

use anyhow::{Context as _, Result};

use super::{find_page, open_service};
use crate::cli::Context;
use crate::core::page::Page;
use crate::core::tree::PageTree;
use crate::ui::output;

/// Show all fields of a page.
pub fn show(ctx: &Context, page: &str) -> Result<()> {
    let service = open_service(ctx)?;
    let tree = service.tree().context("Failed to load page tree")?;
    let page = find_page(&tree, page)?;

    if ctx.json {
        output::json(page)?;
        return Ok(());
    }

    output::print(describe(&tree, page), ctx.verbosity());
    Ok(())
}

fn describe(tree: &PageTree, page: &Page) -> String {
    let parent = match page.parent.and_then(|id| tree.get(id)) {
        Some(parent) => format!("{} ({})", parent.title, parent.id.short()),
        None => "(root)".to_string(),
    };
    let children: Vec<String> = tree
        .children(page.id)
        .iter()
        .map(|child| output::format_page(child))
        .collect();

    let mut lines = vec![
        format!("id:              {}", page.id),
        format!("title:           {}", page.title),
        format!("slug:            {}", page.slug),
        format!("path:            {}", page.absolute_url()),
        format!("depth:           {}", page.depth()),
        format!("parent:          {}", parent),
        format!("home:            {}", if page.is_home { "yes" } else { "no" }),
        format!("template:        {}", page.template),
    ];
    if !page.seo_title.is_empty() {
        lines.push(format!("seo title:       {}", page.seo_title));
    }
    if !page.seo_description.is_empty() {
        lines.push(format!("seo description: {}", page.seo_description));
    }
    if !page.style.is_empty() {
        lines.push(format!("style:           {} bytes", page.style.len()));
    }
    lines.push(format!("created:         {}", page.created_at));
    lines.push(format!("updated:         {}", page.updated_at));
    if !children.is_empty() {
        lines.push("children:".to_string());
        lines.push(output::format_list(&children, "  "));
    }
    lines.join("\n")
}
