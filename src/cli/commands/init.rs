//! init command - Create an empty page store

use anyhow::{Context as _, Result};
use serde_json::json;

use super::store_root;
use crate::cli::Context;
use crate::core::config::{Config, PathConflictPolicy, StoreConfig};
use crate::core::store::FileStore;
use crate::ui::output;

/// Create an empty page store.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `path_conflict` - Store-level conflict policy to write
/// * `default_template` - Store-level default template to write
pub fn init(
    ctx: &Context,
    path_conflict: Option<PathConflictPolicy>,
    default_template: Option<String>,
) -> Result<()> {
    let root = store_root(ctx)?;

    // Validate config before creating anything
    let config = StoreConfig {
        default_template,
        path_conflict,
    };
    let write_config = config != StoreConfig::default();
    if write_config {
        config.validate().context("Invalid store configuration")?;
    }

    let store = FileStore::init(&root).context("Failed to initialize page store")?;
    let config_path = if write_config {
        Some(Config::write_store(&root, &config).context("Failed to write store configuration")?)
    } else {
        None
    };

    if ctx.json {
        output::json(&json!({
            "store": store.paths().root(),
            "config": config_path,
        }))?;
        return Ok(());
    }

    let verbosity = ctx.verbosity();
    output::print(
        format!("Initialized page store in {}", root.display()),
        verbosity,
    );
    if let Some(path) = config_path {
        output::print(format!("Wrote {}", path.display()), verbosity);
    }
    Ok(())
}
