//! # Export / Import
//!
//! Versioned backup of the whole state triple.
//!
//! The original data-transfer story was "serialize whatever is in memory,
//! trust whatever comes back". Here the blob carries an explicit schema
//! version and import re-validates everything before any of it replaces
//! live state: a half-broken backup is rejected whole, never merged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use grocer_core::{validation, Order, Product};

use crate::error::{StoreError, StoreResult};
use crate::settings::Settings;

/// Current backup schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// A full-state backup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub schema_version: u32,
    pub exported_at: DateTime<Utc>,
    pub settings: Settings,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

impl Backup {
    /// Serializes the backup to pretty JSON.
    pub fn to_json(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Corrupt {
            key: "backup".to_string(),
            reason: e.to_string(),
        })
    }

    /// Parses and validates a backup.
    ///
    /// ## Rejection Rules
    /// - JSON that doesn't parse, or with required fields absent
    /// - `schema_version` other than [`SCHEMA_VERSION`]
    /// - A product with an invalid SKU/name, a negative price or stock,
    ///   or a SKU duplicated within the backup
    /// - An order violating the money invariants
    pub fn from_json(raw: &str) -> StoreResult<Backup> {
        let backup: Backup = serde_json::from_str(raw)
            .map_err(|e| StoreError::import_rejected(format!("malformed backup: {e}")))?;

        if backup.schema_version != SCHEMA_VERSION {
            return Err(StoreError::import_rejected(format!(
                "unsupported schema version {} (expected {})",
                backup.schema_version, SCHEMA_VERSION
            )));
        }

        backup.validate()?;
        Ok(backup)
    }

    fn validate(&self) -> StoreResult<()> {
        for product in &self.products {
            validate_product(product)
                .map_err(|e| StoreError::import_rejected(format!("product {}: {e}", product.id)))?;

            let duplicates = self
                .products
                .iter()
                .filter(|p| p.sku.eq_ignore_ascii_case(&product.sku))
                .count();
            if duplicates > 1 {
                return Err(StoreError::import_rejected(format!(
                    "duplicate sku '{}'",
                    product.sku
                )));
            }
        }

        for order in &self.orders {
            if order.items.is_empty() {
                return Err(StoreError::import_rejected(format!(
                    "order {} has no items",
                    order.id
                )));
            }
            if !order.invariants_hold() {
                return Err(StoreError::import_rejected(format!(
                    "order {} violates payment invariants",
                    order.id
                )));
            }
        }

        Ok(())
    }
}

fn validate_product(product: &Product) -> grocer_core::CoreResult<()> {
    validation::validate_sku(&product.sku)?;
    validation::validate_product_name(&product.name_en)?;
    validation::validate_product_name(&product.name_bn)?;
    validation::validate_price("selling_price", product.selling_price)?;
    validation::validate_price("buying_price", product.buying_price)?;
    validation::validate_stock(product.stock_quantity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
