//! core::store::schema
//!
//! On-disk store document (v1).
//!
//! # Schema Design
//!
//! - Self-describing with `kind` and `schema_version`
//! - Strictly parsed (unknown fields rejected)
//! - The envelope is checked before the pages are parsed
//!
//! # Example
//!
//! ```
//! use pagetree::core::store::schema::{parse_document, StoreDocumentV1, STORE_KIND};
//! use pagetree::core::store::Revision;
//!
//! let doc = StoreDocumentV1::new(Revision::INITIAL, Vec::new());
//! assert_eq!(doc.kind, STORE_KIND);
//!
//! let json = serde_json::to_string(&doc).unwrap();
//! let parsed = parse_document(&json).unwrap();
//! assert!(parsed.pages.is_empty());
//! ```

use serde::{Deserialize, Serialize};

use super::{Revision, Snapshot, StoreError};
use crate::core::page::Page;

/// The kind identifier for a page store document.
pub const STORE_KIND: &str = "pagetree.store";

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Envelope for version dispatch before full parsing.
#[derive(Debug, Deserialize)]
struct DocumentEnvelope {
    kind: String,
    schema_version: u32,
}

/// Store document (v1).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StoreDocumentV1 {
    /// Kind identifier (always "pagetree.store")
    pub kind: String,

    /// Schema version (always 1 for this struct)
    pub schema_version: u32,

    pub revision: Revision,

    pub pages: Vec<Page>,
}

impl StoreDocumentV1 {
    /// Create a document at the given revision.
    pub fn new(revision: Revision, pages: Vec<Page>) -> Self {
        Self {
            kind: STORE_KIND.to_string(),
            schema_version: SCHEMA_VERSION,
            revision,
            pages,
        }
    }

    /// Convert into a snapshot.
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            pages: self.pages,
        }
    }
}

/// Parse a store document with version dispatch.
///
/// # Errors
///
/// - [`StoreError::Parse`] if the JSON is malformed
/// - [`StoreError::InvalidKind`] if `kind` is not [`STORE_KIND`]
/// - [`StoreError::UnsupportedVersion`] for any version but 1
pub fn parse_document(json: &str) -> Result<StoreDocumentV1, StoreError> {
    let envelope: DocumentEnvelope =
        serde_json::from_str(json).map_err(|e| StoreError::Parse(e.to_string()))?;

    if envelope.kind != STORE_KIND {
        return Err(StoreError::InvalidKind {
            found: envelope.kind,
        });
    }

    match envelope.schema_version {
        1 => serde_json::from_str(json).map_err(|e| StoreError::Parse(e.to_string())),
        v => Err(StoreError::UnsupportedVersion(v)),
    }
}
