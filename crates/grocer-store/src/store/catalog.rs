//! # Catalog Operations
//!
//! Product CRUD against the store. Stock is deliberately absent from the
//! edit path: after creation it moves only when an order commits.

use tracing::{debug, info};
use uuid::Uuid;

use grocer_core::{reports, validation, CoreError, Money, Product, Quantity, Unit};

use crate::error::{StoreError, StoreResult};
use crate::store::{GrocerStore, KEY_PRODUCTS};

// =============================================================================
// Inputs
// =============================================================================

/// Fields for a new catalog entry. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name_en: String,
    pub name_bn: String,
    pub sku: String,
    pub unit: Unit,
    pub stock_quantity: Quantity,
    pub selling_price: Money,
    pub buying_price: Money,
    pub category: String,
    pub low_stock_threshold: Quantity,
    pub image_url: Option<String>,
}

/// Operator edits to an existing product. `None` fields are left alone.
/// Stock is not editable here - only checkout moves it.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name_en: Option<String>,
    pub name_bn: Option<String>,
    pub selling_price: Option<Money>,
    pub buying_price: Option<Money>,
    pub category: Option<String>,
    pub low_stock_threshold: Option<Quantity>,
    pub image_url: Option<String>,
}

// =============================================================================
// Operations
// =============================================================================

impl GrocerStore {
    /// Adds a product to the catalog.
    ///
    /// Validates names, SKU format and price/stock signs, and rejects a SKU
    /// already present in the catalog.
    pub fn add_product(&self, new: NewProduct) -> StoreResult<Product> {
        validation::validate_sku(&new.sku).map_err(CoreError::from)?;
        validation::validate_product_name(&new.name_en).map_err(CoreError::from)?;
        validation::validate_product_name(&new.name_bn).map_err(CoreError::from)?;
        validation::validate_price("selling_price", new.selling_price).map_err(CoreError::from)?;
        validation::validate_price("buying_price", new.buying_price).map_err(CoreError::from)?;
        validation::validate_stock(new.stock_quantity).map_err(CoreError::from)?;

        let mut state = self.lock_state();

        if state
            .products
            .iter()
            .any(|p| p.sku.eq_ignore_ascii_case(new.sku.trim()))
        {
            return Err(CoreError::from(grocer_core::ValidationError::Duplicate {
                field: "sku".to_string(),
                value: new.sku,
            })
            .into());
        }

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name_en: new.name_en,
            name_bn: new.name_bn,
            sku: new.sku.trim().to_string(),
            unit: new.unit,
            stock_quantity: new.stock_quantity,
            selling_price: new.selling_price,
            buying_price: new.buying_price,
            category: new.category,
            low_stock_threshold: new.low_stock_threshold,
            image_url: new.image_url,
        };

        state.products.push(product.clone());
        self.persist(KEY_PRODUCTS, &state.products);

        info!(id = %product.id, sku = %product.sku, "Product added");
        Ok(product)
    }

    /// Applies operator edits to a product.
    pub fn update_product(&self, product_id: &str, patch: ProductPatch) -> StoreResult<Product> {
        if let Some(name) = &patch.name_en {
            validation::validate_product_name(name).map_err(CoreError::from)?;
        }
        if let Some(name) = &patch.name_bn {
            validation::validate_product_name(name).map_err(CoreError::from)?;
        }
        if let Some(price) = patch.selling_price {
            validation::validate_price("selling_price", price).map_err(CoreError::from)?;
        }
        if let Some(price) = patch.buying_price {
            validation::validate_price("buying_price", price).map_err(CoreError::from)?;
        }

        let mut state = self.lock_state();
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))?;

        if let Some(name) = patch.name_en {
            product.name_en = name;
        }
        if let Some(name) = patch.name_bn {
            product.name_bn = name;
        }
        if let Some(price) = patch.selling_price {
            product.selling_price = price;
        }
        if let Some(price) = patch.buying_price {
            product.buying_price = price;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(threshold) = patch.low_stock_threshold {
            product.low_stock_threshold = threshold;
        }
        if let Some(url) = patch.image_url {
            product.image_url = Some(url);
        }

        let updated = product.clone();
        self.persist(KEY_PRODUCTS, &state.products);

        debug!(id = %updated.id, "Product updated");
        Ok(updated)
    }

    /// Looks up a product by id.
    pub fn get_product(&self, product_id: &str) -> Option<Product> {
        self.lock_state()
            .products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
    }

    /// Looks up a product by SKU (case-insensitive).
    pub fn find_by_sku(&self, sku: &str) -> Option<Product> {
        self.lock_state()
            .products
            .iter()
            .find(|p| p.sku.eq_ignore_ascii_case(sku))
            .cloned()
    }

    /// Searches the catalog by either locale name or SKU, case-insensitive
    /// substring match. An empty query returns the full catalog.
    pub fn search_products(&self, query: &str) -> StoreResult<Vec<Product>> {
        let query = validation::validate_search_query(query).map_err(CoreError::from)?;
        let needle = query.to_lowercase();

        let state = self.lock_state();
        if needle.is_empty() {
            return Ok(state.products.clone());
        }

        Ok(state
            .products
            .iter()
            .filter(|p| {
                p.name_en.to_lowercase().contains(&needle)
                    || p.name_bn.contains(query.as_str())
                    || p.sku.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    /// Products at or below their low-stock threshold.
    pub fn low_stock_products(&self) -> Vec<Product> {
        let state = self.lock_state();
        reports::low_stock_products(&state.products)
            .into_iter()
            .cloned()
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
