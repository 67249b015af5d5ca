//! verify command - Check the stored tree for invariant violations

use anyhow::{bail, Context as _, Result};
use serde_json::json;

use super::open_service;
use crate::cli::Context;
use crate::ui::output;

/// Check the stored tree. Fails if any violation is found.
pub fn verify(ctx: &Context) -> Result<()> {
    let service = open_service(ctx)?;
    let result = service.verify().context("Failed to verify page tree")?;

    if ctx.json {
        let errors: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
        output::json(&json!({ "ok": result.ok, "errors": errors }))?;
    } else if result.ok {
        output::print("Page tree is consistent.", ctx.verbosity());
    } else {
        for err in &result.errors {
            output::warn(err, ctx.verbosity());
        }
    }

    if !result.ok {
        bail!("{} violation(s) found", result.errors.len());
    }
    Ok(())
}
