//! # Error Types
//!
//! Domain-specific error types for grocer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  grocer-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  grocer-store errors (separate crate)                                  │
//! │  └── StoreError       - Persistence and lookup failures                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → UI message           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, quantities, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every error here is locally recoverable - none aborts the session

use thiserror::Error;

use crate::quantity::Quantity;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout attempted with no line items. Recovered locally: no order
    /// is created and no stock moves.
    #[error("cart is empty, nothing to check out")]
    EmptyCart,

    /// Requested quantity exceeds available stock.
    ///
    /// Soft validation only - carts hold no reservations, so the same check
    /// runs again when the order commits.
    ///
    /// ```text
    /// set_quantity(qty: 5)
    ///      │
    ///      ▼
    /// stock check: available = 3
    ///      │
    ///      ▼
    /// InsufficientStock { sku: "FRT-APL-01", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 in stock for FRT-APL-01"
    /// ```
    #[error("insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: Quantity,
        requested: Quantity,
    },

    /// Checkout would create a `due` order without a customer name.
    /// Blocked until the operator captures one.
    #[error("a customer name is required for an order with an outstanding balance")]
    MissingCustomerForDueOrder,

    /// Quantity violates the unit's rules (e.g. fractional pieces).
    #[error("invalid quantity: {reason}")]
    InvalidQuantity { reason: String },

    /// Cart has exceeded the maximum allowed number of lines.
    #[error("cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge {
        requested: Quantity,
        max: Quantity,
    },

    /// Payment amount is invalid.
    #[error("invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// Payment applied to an order that is already settled.
    #[error("order {order_id} is already paid in full")]
    OrderAlreadyPaid { order_id: String },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when operator input doesn't meet requirements; they run
/// before any business logic does.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g. SKU with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. duplicate SKU).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
