//! # Store State
//!
//! The explicitly owned (products, orders, settings) triple, loaded from
//! storage at start and written through on every mutation.
//!
//! ## State Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     GrocerStore                                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Mutex<StoreData>                                   │   │
//! │  │   products: Vec<Product>   ← stock decremented by checkout      │   │
//! │  │   orders:   Vec<Order>     ← most-recent-first                  │   │
//! │  │   settings: Settings                                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │          │ write-through after each mutation                           │
//! │          ▼                                                              │
//! │  Arc<dyn StorageBackend>  (opaque JSON blob per key)                   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • One Mutex guards the whole triple, so checkout's                    │
//! │    stock-decrement-plus-order-append is a single critical section      │
//! │  • Re-entrant double-submission serializes on the same lock            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Durability Policy
//! - Reads at open: a missing, unreadable or corrupt key falls back to
//!   seed data (warn log) - the session always starts usable
//! - Writes: attempted once after each mutation; a failure is logged,
//!   parked in `take_write_error`, and NOT retried - in-memory state is
//!   the working truth for the session

mod catalog;
mod orders;

pub use catalog::{NewProduct, ProductPatch};
pub use orders::{new_customer, Receipt};

use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use grocer_core::{Order, Product};

use crate::error::{StoreError, StoreResult};
use crate::export::{Backup, SCHEMA_VERSION};
use crate::seed;
use crate::settings::Settings;
use crate::storage::StorageBackend;

/// Storage key for the product catalog.
pub const KEY_PRODUCTS: &str = "grocerease_products";
/// Storage key for the order list.
pub const KEY_ORDERS: &str = "grocerease_orders";
/// Storage key for shop settings.
pub const KEY_SETTINGS: &str = "grocerease_settings";

// =============================================================================
// Store
// =============================================================================

/// The owned application state, passed by reference to whatever surface
/// drives it. No module-level globals.
#[derive(Debug)]
pub struct GrocerStore {
    backend: Arc<dyn StorageBackend>,
    state: Mutex<StoreData>,
    /// Session-local sequence for order ids.
    pub(crate) order_seq: AtomicU64,
    last_write_error: Mutex<Option<StoreError>>,
}

#[derive(Debug)]
pub(crate) struct StoreData {
    pub(crate) products: Vec<Product>,
    pub(crate) orders: Vec<Order>,
    pub(crate) settings: Settings,
}

impl GrocerStore {
    /// Opens the store, loading state from the backend.
    ///
    /// Never fails: anything unreadable is replaced by seed data so the
    /// terminal always comes up ready to sell.
    pub fn open(backend: Arc<dyn StorageBackend>) -> Self {
        Self::open_at(backend, Utc::now())
    }

    /// Like [`open`](Self::open) with an injectable "today" for the demo
    /// order generator. Used by tests.
    pub fn open_at(backend: Arc<dyn StorageBackend>, today: DateTime<Utc>) -> Self {
        let products: Vec<Product> =
            load_key(backend.as_ref(), KEY_PRODUCTS).unwrap_or_else(seed::initial_products);
        let orders: Vec<Order> = load_key(backend.as_ref(), KEY_ORDERS)
            .unwrap_or_else(|| seed::generate_initial_orders(&products, today));
        let settings: Settings = load_key(backend.as_ref(), KEY_SETTINGS).unwrap_or_default();

        info!(
            products = products.len(),
            orders = orders.len(),
            "Store opened"
        );

        let store = GrocerStore {
            backend,
            state: Mutex::new(StoreData {
                products,
                orders,
                settings,
            }),
            order_seq: AtomicU64::new(1),
            last_write_error: Mutex::new(None),
        };

        // Write the (possibly seeded) state through so the next launch
        // reads it back instead of reseeding.
        {
            let state = store.lock_state();
            store.persist(KEY_PRODUCTS, &state.products);
            store.persist(KEY_ORDERS, &state.orders);
            store.persist(KEY_SETTINGS, &state.settings);
        }

        store
    }

    pub(crate) fn lock_state(&self) -> std::sync::MutexGuard<'_, StoreData> {
        self.state.lock().expect("store mutex poisoned")
    }

    /// Serializes and saves one key. Failures are logged, parked for
    /// [`take_write_error`](Self::take_write_error), and not retried.
    pub(crate) fn persist<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %key, error = %e, "Serialization failed; state not persisted");
                self.record_write_error(StoreError::Corrupt {
                    key: key.to_string(),
                    reason: e.to_string(),
                });
                return;
            }
        };

        if let Err(e) = self.backend.save(key, &raw) {
            warn!(key = %key, error = %e, "Storage write failed; in-memory state remains authoritative");
            self.record_write_error(e);
        }
    }

    fn record_write_error(&self, err: StoreError) {
        *self
            .last_write_error
            .lock()
            .expect("write-error mutex poisoned") = Some(err);
    }

    /// Takes the most recent unreported write failure, if any. The surface
    /// polls this after mutations to notify the operator.
    pub fn take_write_error(&self) -> Option<StoreError> {
        self.last_write_error
            .lock()
            .expect("write-error mutex poisoned")
            .take()
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Current catalog snapshot.
    pub fn products(&self) -> Vec<Product> {
        self.lock_state().products.clone()
    }

    /// Current order list, most-recent-first.
    pub fn orders(&self) -> Vec<Order> {
        self.lock_state().orders.clone()
    }

    /// Current settings.
    pub fn settings(&self) -> Settings {
        self.lock_state().settings.clone()
    }

    /// Replaces the settings and writes them through.
    pub fn update_settings(&self, settings: Settings) {
        let mut state = self.lock_state();
        state.settings = settings;
        self.persist(KEY_SETTINGS, &state.settings);
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Writes the whole triple out, returning the first failure. For
    /// explicit flush points (shutdown); routine mutations already write
    /// through.
    pub fn flush(&self) -> StoreResult<()> {
        let state = self.lock_state();
        save_key(self.backend.as_ref(), KEY_PRODUCTS, &state.products)?;
        save_key(self.backend.as_ref(), KEY_ORDERS, &state.orders)?;
        save_key(self.backend.as_ref(), KEY_SETTINGS, &state.settings)?;
        Ok(())
    }

    /// The global data-clear: removes every persisted key and resets the
    /// session to freshly seeded state.
    pub fn clear_all(&self) -> StoreResult<()> {
        let mut state = self.lock_state();

        self.backend.remove(KEY_PRODUCTS)?;
        self.backend.remove(KEY_ORDERS)?;
        self.backend.remove(KEY_SETTINGS)?;

        state.products = seed::initial_products();
        state.orders = seed::generate_initial_orders(&state.products, Utc::now());
        state.settings = Settings::default();

        self.persist(KEY_PRODUCTS, &state.products);
        self.persist(KEY_ORDERS, &state.orders);
        self.persist(KEY_SETTINGS, &state.settings);

        info!("All data cleared and reseeded");
        Ok(())
    }

    // =========================================================================
    // Export / Import
    // =========================================================================

    /// Exports the full state as a versioned backup blob.
    pub fn export_json(&self) -> StoreResult<String> {
        let state = self.lock_state();
        let backup = Backup {
            schema_version: SCHEMA_VERSION,
            exported_at: Utc::now(),
            settings: state.settings.clone(),
            products: state.products.clone(),
            orders: state.orders.clone(),
        };
        backup.to_json()
    }

    /// Validates and imports a backup blob, replacing the whole state
    /// triple. A backup that fails validation is rejected without touching
    /// anything.
    pub fn import_json(&self, raw: &str) -> StoreResult<()> {
        let backup = Backup::from_json(raw)?;

        let mut state = self.lock_state();
        state.products = backup.products;
        state.orders = backup.orders;
        state.settings = backup.settings;

        self.persist(KEY_PRODUCTS, &state.products);
        self.persist(KEY_ORDERS, &state.orders);
        self.persist(KEY_SETTINGS, &state.settings);

        info!(
            products = state.products.len(),
            orders = state.orders.len(),
            "Backup imported"
        );
        Ok(())
    }
}

// =============================================================================
// Load Helpers
// =============================================================================

fn load_key<T: DeserializeOwned>(backend: &dyn StorageBackend, key: &str) -> Option<T> {
    match backend.load(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %key, error = %e, "Stored data is corrupt, falling back to seed data");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!(key = %key, error = %e, "Storage read failed, falling back to seed data");
            None
        }
    }
}

fn save_key<T: Serialize>(
    backend: &dyn StorageBackend,
    key: &str,
    value: &T,
) -> StoreResult<()> {
    let raw = serde_json::to_string(value).map_err(|e| StoreError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    backend.save(key, &raw)
}

// =============================================================================
// Unit Tests
// =============================================================================
