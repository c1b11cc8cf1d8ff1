//! # grocer-core: Pure Business Logic for GrocerEase
//!
//! This crate is the **heart** of GrocerEase. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       GrocerEase Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Operator Surface (UI shell)                  │   │
//! │  │    Product grid ──► Cart panel ──► Checkout ──► Orders view    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               grocer-store (Persistence Layer)                  │   │
//! │  │    GrocerStore state triple, checkout commit, JSON blobs        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ grocer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │   order   │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ checkout  │  │   │
//! │  │   │   Order   │  │ Quantity  │  │ CartLine  │  │ payments  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, Customer, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`quantity`] - Fixed-point quantities and the entry policy
//! - [`cart`] - The cart engine for an in-progress sale
//! - [`order`] - Order construction and payment reconciliation
//! - [`reports`] - Revenue/profit aggregations
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - ids and
//!    timestamps are inputs, never generated here
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Arithmetic**: Money in minor units (i64), quantities in
//!    milli-units (i64) - no float drift across repeated partial payments
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use grocer_core::cart::Cart;
//! use grocer_core::money::Money;
//! use grocer_core::quantity::Quantity;
//! use grocer_core::types::{Product, Unit};
//!
//! let apples = Product {
//!     id: "prod_001".to_string(),
//!     name_en: "Fresh Apples".to_string(),
//!     name_bn: "তাজা আপেল".to_string(),
//!     sku: "FRT-APL-01".to_string(),
//!     unit: Unit::Kg,
//!     stock_quantity: Quantity::from_whole(100),
//!     selling_price: Money::from_minor(25000),
//!     buying_price: Money::from_minor(18000),
//!     category: "Fruits".to_string(),
//!     low_stock_threshold: Quantity::from_whole(10),
//!     image_url: None,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(&apples).unwrap();
//! cart.set_quantity(&apples, Quantity::from_millis(2500)).unwrap(); // 2.5 kg
//!
//! assert_eq!(cart.total(), Money::from_minor(62500));
//! assert_eq!(cart.total_profit(), Money::from_minor(17500));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod order;
pub mod quantity;
pub mod reports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use grocer_core::Money` instead of
// `use grocer_core::money::Money`

pub use cart::{Cart, CartLine, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{CheckoutOutcome, CheckoutRequest, PaymentReceipt};
pub use quantity::Quantity;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum unique lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps a single receipt printable.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line (999 whole units).
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g. typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: Quantity = Quantity::from_whole(999);
