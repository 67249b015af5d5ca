//! core
//!
//! Core domain types, the page tree, and persistence.
//!
//! # Modules
//!
//! - [`types`] - Strong types: PageId, Slug, UtcTimestamp
//! - [`naming`] - Slug generation
//! - [`page`] - The page record and its field limits
//! - [`tree`] - Parent-pointer hierarchy with derived indexes
//! - [`path`] - Materialized path construction
//! - [`home`] - The single-home-page invariant
//! - [`verify`] - Fast verification of tree invariants
//! - [`store`] - Page persistence with compare-and-swap commits
//! - [`lock`] - Exclusive store lock
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for store storage
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - All verification is deterministic

pub mod config;
pub mod home;
pub mod lock;
pub mod naming;
pub mod page;
pub mod path;
pub mod paths;
pub mod store;
pub mod tree;
pub mod types;
pub mod verify;
