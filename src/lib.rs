//! pagetree - A page tree core for a small CMS
//!
//! Pages form a single-rooted hierarchy. Each page has a slug derived from
//! its title, and a materialized URL path built from the slugs of its
//! ancestors. One page may be the home page, served at the empty path.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Load → Lifecycle → Verify → Commit
//! - [`core`] - Domain types, the page tree, stores, configuration
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! pagetree maintains the following invariants:
//!
//! 1. At most one page is the home page; it has no parent and an empty path
//! 2. Every other page's path is its parent's path plus its slug and `/`
//! 3. The parent relation has no cycles
//! 4. A save commits the page and every rewritten descendant together, or
//!    nothing

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
