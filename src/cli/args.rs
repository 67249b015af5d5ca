//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--store <dir>`: Page store directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output
//!
//! # Page Arguments
//!
//! Commands that take a `PAGE` accept either a page id (UUID) or a page
//! path such as `about/team/` or `/about/team/`. `/` is the home page.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::config::PathConflictPolicy;

/// pt - maintain a tree of CMS pages and their URL paths
#[derive(Parser, Debug)]
#[command(name = "pt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Page store directory (defaults to the configured store, then the
    /// current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty page store
    #[command(
        name = "init",
        long_about = "Create an empty page store.\n\n\
            Writes pages.json to the store directory. Passing --path-conflict or \
            --default-template also writes a store config.toml with those values.",
        after_help = "\
EXAMPLES:
    # Initialize the current directory
    pt init

    # Initialize a specific store that suffixes clashing paths
    pt --store ./site init --path-conflict suffix"
    )]
    Init {
        /// What to do when a computed path is already taken
        #[arg(long, value_enum, value_name = "POLICY")]
        path_conflict: Option<ConflictPolicy>,

        /// Template for pages created without one
        #[arg(long, value_name = "TEMPLATE")]
        default_template: Option<String>,
    },

    /// Create a page
    #[command(
        name = "create",
        after_help = "\
EXAMPLES:
    # Create the home page
    pt create Home --home

    # Create a page under another
    pt create About --parent /
    pt create Team --parent about/"
    )]
    Create {
        /// Page title
        title: String,

        /// Explicit slug (derived from the title otherwise)
        #[arg(long)]
        slug: Option<String>,

        /// Parent page
        #[arg(short, long, value_name = "PAGE")]
        parent: Option<String>,

        /// Make this the home page
        #[arg(long)]
        home: bool,

        /// Page template
        #[arg(long)]
        template: Option<String>,

        /// Title used in search results
        #[arg(long)]
        seo_title: Option<String>,

        /// Description used in search results
        #[arg(long)]
        seo_description: Option<String>,

        /// Page-specific CSS
        #[arg(long)]
        style: Option<String>,
    },

    /// Change a page's fields
    #[command(
        name = "update",
        long_about = "Change a page's fields.\n\n\
            Renaming a page whose slug was derived from its title derives a new slug. \
            When the path changes, every descendant path is rewritten in the same save.",
        after_help = "\
EXAMPLES:
    # Rename a page (and re-derive its slug)
    pt update about/ --title \"About Us\"

    # Pin a slug
    pt update about-us/ --slug about"
    )]
    Update {
        /// Page to change
        #[arg(value_name = "PAGE")]
        page: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New slug
        #[arg(long)]
        slug: Option<String>,

        /// Clear the home flag; the page becomes a root page
        #[arg(long)]
        unhome: bool,

        /// New template
        #[arg(long)]
        template: Option<String>,

        /// New search title
        #[arg(long)]
        seo_title: Option<String>,

        /// New search description
        #[arg(long)]
        seo_description: Option<String>,

        /// New page-specific CSS
        #[arg(long)]
        style: Option<String>,
    },

    /// Make a page the home page
    #[command(
        name = "promote",
        long_about = "Make a page the home page.\n\n\
            The page moves to the root and its path becomes empty. Any other home \
            page is demoted and gets a path derived from its slug."
    )]
    Promote {
        /// Page to promote
        #[arg(value_name = "PAGE")]
        page: String,
    },

    /// Move a page under a new parent
    #[command(
        name = "move",
        after_help = "\
EXAMPLES:
    # Move a page under another
    pt move team/ --parent about/

    # Move a page to the root
    pt move about/team/ --root"
    )]
    Move {
        /// Page to move
        #[arg(value_name = "PAGE")]
        page: String,

        /// New parent page
        #[arg(
            short,
            long,
            value_name = "PAGE",
            required_unless_present = "root",
            conflicts_with = "root"
        )]
        parent: Option<String>,

        /// Move the page to the root
        #[arg(long)]
        root: bool,
    },

    /// Find the page serving a request path
    #[command(
        name = "resolve",
        long_about = "Find the page serving a request path.\n\n\
            Matching is exact: 'about' and 'about/' differ. The home page has the \
            empty path. With --url a single leading '/' is stripped first."
    )]
    Resolve {
        /// Request path
        path: String,

        /// Treat the path as an absolute URL path
        #[arg(long)]
        url: bool,
    },

    /// Show all fields of a page
    #[command(name = "show")]
    Show {
        /// Page to show
        #[arg(value_name = "PAGE")]
        page: String,
    },

    /// Display the page tree
    #[command(name = "tree")]
    Tree,

    /// Check the stored tree for invariant violations
    #[command(name = "verify")]
    Verify,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    pt completion bash > ~/.local/share/bash-completion/completions/pt
    pt completion zsh > ~/.zfunc/_pt"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Shell for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Path conflict policy accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConflictPolicy {
    /// Fail the save
    Reject,
    /// Append -2, -3, ... to the saved page's slug
    Suffix,
}

impl From<ConflictPolicy> for PathConflictPolicy {
    fn from(policy: ConflictPolicy) -> Self {
        match policy {
            ConflictPolicy::Reject => PathConflictPolicy::Reject,
            ConflictPolicy::Suffix => PathConflictPolicy::Suffix,
        }
    }
}
