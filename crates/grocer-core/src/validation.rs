//! # Validation Module
//!
//! Input validation utilities for GrocerEase.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Quantity entry (quantity::parse_quantity)                    │
//! │  ├── Lenient: garbage input clears the line                            │
//! │  └── Unit rules: whole pieces only                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - field validation                               │
//! │  ├── SKU / name format, price signs, payment amounts                   │
//! │  └── Runs before any state mutates                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Business rules (cart / order engine)                         │
//! │  ├── Stock checks, customer-for-due, cart bounds                       │
//! │  └── Defense in depth: each layer catches different mistakes           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::Unit;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product display name (either locale).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a customer name captured for a due order.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer name".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog search query.
///
/// Can be empty (returns the full catalog); maximum 100 characters.
/// Returns the trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity against its unit's rules.
///
/// ## Rules
/// - Must be positive
/// - Must not exceed `MAX_LINE_QUANTITY`
/// - `pcs` quantities must be whole
pub fn validate_quantity(qty: Quantity, unit: Unit) -> ValidationResult<()> {
    if !qty.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: format!("cannot exceed {}", MAX_LINE_QUANTITY),
        });
    }

    if unit == Unit::Pcs && !qty.is_whole() {
        return Err(ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "piece quantities must be whole numbers".to_string(),
        });
    }

    Ok(())
}

/// Validates a price.
///
/// Zero is allowed (free items); negative is not.
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level supplied at catalog add/edit time.
pub fn validate_stock(stock: Quantity) -> ValidationResult<()> {
    if stock.millis() < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock_quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a payment amount.
///
/// Must be strictly positive - zero or negative payments are meaningless.
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size (number of unique lines) before inserting another.
pub fn validate_cart_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_CART_LINES {
        return Err(ValidationError::InvalidFormat {
            field: "cart".to_string(),
            reason: format!("cannot hold more than {} items", MAX_CART_LINES),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
