//! cli
//!
//! Command-line interface layer for pt.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Locate the page store and load configuration
//! - Delegate to command handlers
//! - Does NOT mutate pages directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! [`crate::engine::PageService`]. All page changes flow through the
//! service's validated save pipeline.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::Result;

use crate::ui::output::Verbosity;

/// Execution context built from global flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Store directory given on the command line
    pub store: Option<PathBuf>,
    pub debug: bool,
    pub quiet: bool,
    /// Print results as JSON
    pub json: bool,
}

impl Context {
    /// Output verbosity for human-readable output.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let ctx = Context {
        store: cli.store.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        json: cli.json,
    };

    commands::dispatch(cli.command, &ctx)
}
