//! # grocer-store: Persistence Layer for GrocerEase
//!
//! This crate provides durable storage and the owned application state for
//! the GrocerEase POS. It persists opaque JSON blobs through a key-value
//! [`StorageBackend`] - the Rust analog of the browser local-storage bucket
//! the system was designed around.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       GrocerEase Data Flow                              │
//! │                                                                         │
//! │  Operator surface (product grid, cart panel, orders view)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   grocer-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌────────────────┐  │   │
//! │  │   │  GrocerStore  │   │    storage    │   │  seed / export │  │   │
//! │  │   │  state triple │◄──│ StorageBackend│   │  starter data, │  │   │
//! │  │   │  checkout,    │   │ File / Memory │   │  versioned     │  │   │
//! │  │   │  payments     │   │               │   │  backups       │  │   │
//! │  │   └───────────────┘   └───────────────┘   └────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  grocer-core (pure business logic)                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - The key-value backend trait and implementations
//! - [`store`] - `GrocerStore`: the owned state triple and all operations
//! - [`settings`] - Shop settings
//! - [`seed`] - Starter catalog and the deterministic demo-order generator
//! - [`export`] - Versioned backup export/import
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use grocer_store::{FileStorage, GrocerStore};
//!
//! let backend = Arc::new(FileStorage::new("./data")?);
//! let store = GrocerStore::open(backend);
//!
//! let mut cart = grocer_core::Cart::new();
//! let apples = store.find_by_sku("FRT-APL-01").unwrap();
//! cart.add_item(&apples)?;
//!
//! let receipt = store.checkout(&mut cart, &Default::default())?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod seed;
pub mod settings;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use export::{Backup, SCHEMA_VERSION};
pub use settings::Settings;
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
pub use store::{
    new_customer, GrocerStore, NewProduct, ProductPatch, Receipt, KEY_ORDERS, KEY_PRODUCTS,
    KEY_SETTINGS,
};
