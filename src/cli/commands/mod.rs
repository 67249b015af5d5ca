//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Locates the store and loads configuration
//! 2. Resolves page arguments against the current tree
//! 3. Calls the [`PageService`] to execute the command
//! 4. Formats and displays output
//!
//! Handlers do NOT mutate pages directly.

mod completion;
mod create;
mod init;
mod move_cmd;
mod promote;
mod resolve;
mod show;
mod tree_cmd;
mod update;
mod verify;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use create::create;
pub use init::init;
pub use move_cmd::move_page;
pub use promote::promote;
pub use resolve::resolve;
pub use show::show;
pub use tree_cmd::tree;
pub use update::update;
pub use verify::verify;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use serde_json::json;

use super::args::Command;
use super::Context;
use crate::core::config::Config;
use crate::core::page::Page;
use crate::core::store::FileStore;
use crate::core::tree::PageTree;
use crate::core::types::PageId;
use crate::engine::resolver::resolve_url;
use crate::engine::{PageError, PageService, SaveOutcome, SaveSettings};
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Init {
            path_conflict,
            default_template,
        } => init::init(ctx, path_conflict.map(Into::into), default_template),
        Command::Create {
            title,
            slug,
            parent,
            home,
            template,
            seo_title,
            seo_description,
            style,
        } => create::create(
            ctx,
            create::CreateArgs {
                title,
                slug,
                parent,
                home,
                template,
                seo_title,
                seo_description,
                style,
            },
        ),
        Command::Update {
            page,
            title,
            slug,
            unhome,
            template,
            seo_title,
            seo_description,
            style,
        } => update::update(
            ctx,
            &page,
            update::UpdateArgs {
                title,
                slug,
                unhome,
                template,
                seo_title,
                seo_description,
                style,
            },
        ),
        Command::Promote { page } => promote::promote(ctx, &page),
        Command::Move { page, parent, root } => {
            let parent = if root { None } else { parent };
            move_cmd::move_page(ctx, &page, parent.as_deref())
        }
        Command::Resolve { path, url } => resolve::resolve(ctx, &path, url),
        Command::Show { page } => show::show(ctx, &page),
        Command::Tree => tree_cmd::tree(ctx),
        Command::Verify => verify::verify(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Store directory: `--store`, then the configured default, then the
/// current directory.
pub(crate) fn store_root(ctx: &Context) -> Result<PathBuf> {
    if let Some(ref store) = ctx.store {
        return Ok(store.clone());
    }

    let config = Config::load(None).context("Failed to load configuration")?;
    if let Some(store) = config.default_store() {
        return Ok(store.to_path_buf());
    }

    std::env::current_dir().context("Failed to determine current directory")
}

/// Open the page store and build a service with configured settings.
pub(crate) fn open_service(ctx: &Context) -> Result<PageService<FileStore>> {
    let root = store_root(ctx)?;
    let store = FileStore::open(&root).context("Failed to open page store")?;
    let config = Config::load(Some(&root)).context("Failed to load configuration")?;

    let settings = SaveSettings::from_config(&config);
    tracing::debug!(
        store = %root.display(),
        path_conflict = %settings.path_conflict,
        global_config = ?config.global_config_loaded_from(),
        store_config = ?config.store_config_loaded_from(),
        "opened page store"
    );
    Ok(PageService::with_settings(store, settings))
}

/// Find a page by id or path.
///
/// A UUID is looked up by id; anything else is a path, with one leading
/// `/` allowed.
pub(crate) fn find_page<'a>(tree: &'a PageTree, arg: &str) -> Result<&'a Page> {
    match arg.parse::<PageId>() {
        Ok(id) => tree
            .require(id)
            .map_err(PageError::from)
            .with_context(|| format!("No page with id '{}'", arg)),
        Err(_) => resolve_url(tree, arg).with_context(|| format!("No page matches '{}'", arg)),
    }
}

/// Print the result of a save.
pub(crate) fn report_save(ctx: &Context, verb: &str, outcome: &SaveOutcome) -> Result<()> {
    if ctx.json {
        output::json(&json!({
            "page": outcome.page,
            "revision": outcome.revision,
            "changed": outcome.report.changed,
            "demoted": outcome.report.demoted,
            "propagated": outcome.report.propagated,
        }))?;
        return Ok(());
    }

    let verbosity = ctx.verbosity();
    output::print(
        format!("{} {}", verb, output::format_page(&outcome.page)),
        verbosity,
    );
    for id in &outcome.report.demoted {
        output::print(format!("Demoted previous home page ({})", id.short()), verbosity);
    }
    let moved = outcome
        .report
        .propagated
        .iter()
        .filter(|id| !outcome.report.demoted.contains(id))
        .count();
    if moved > 0 {
        output::print(format!("Rewrote {} descendant path(s)", moved), verbosity);
    }
    Ok(())
}
