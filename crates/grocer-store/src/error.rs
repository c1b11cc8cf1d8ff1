//! # Storage Error Types
//!
//! Error types for persistence and store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the key and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UI surface translates to an operator-facing message                   │
//! │                                                                         │
//! │  Read failures  → fall back to seed data (warn log)                    │
//! │  Write failures → reported once, never retried; memory stays truth     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use grocer_core::CoreError;

/// Persistence and store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the store.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Reading a key from the backend failed.
    ///
    /// Non-fatal: the store falls back to seed data for the session.
    #[error("storage read failed for '{key}': {reason}")]
    ReadFailed { key: String, reason: String },

    /// Writing a key to the backend failed.
    ///
    /// Non-fatal: in-memory state remains the working truth; the failure
    /// is surfaced once and not retried.
    #[error("storage write failed for '{key}': {reason}")]
    WriteFailed { key: String, reason: String },

    /// Stored JSON under a key did not parse or did not match the schema.
    #[error("stored data under '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    /// An imported backup was refused.
    ///
    /// ## When This Occurs
    /// - Schema version mismatch
    /// - Required fields absent
    /// - An order violating the money invariants
    #[error("import rejected: {reason}")]
    ImportRejected { reason: String },

    /// Business rule violation bubbled up from grocer-core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates an ImportRejected error.
    pub fn import_rejected(reason: impl Into<String>) -> Self {
        StoreError::ImportRejected {
            reason: reason.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
