//! # Domain Types
//!
//! Core domain types used throughout GrocerEase.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │   OrderItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (ORD-…)     │   │  product_id     │       │
//! │  │  sku (business) │   │  payment_status │   │  sku/names      │       │
//! │  │  name_en/bn     │   │  total          │   │  unit_price     │       │
//! │  │  stock_quantity │   │  amount_due     │   │  quantity       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Unit        │   │  PaymentStatus  │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Kg │ G │ Pcs   │   │  Paid │ Due     │   │  Cash │ Card │  │       │
//! │  │                 │   │                 │   │  MobilePay      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Products carry both:
//! - `id`: UUID v4 string - immutable, used for cart/order references
//! - `sku`: human-readable business identifier, unique in the catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::quantity::Quantity;

// =============================================================================
// Unit of Sale
// =============================================================================

/// How a product is measured at the counter.
///
/// The unit decides whether quantities are whole (`Pcs`) or fractional
/// (`Kg`/`G`), and which quantity-entry flow the register offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Sold by the kilogram; fractional quantities allowed.
    Kg,
    /// Sold by the gram; fractional quantities allowed.
    G,
    /// Sold by the piece; whole quantities only.
    Pcs,
}

impl Unit {
    /// Whether quantities of this unit may be fractional.
    #[inline]
    pub const fn is_fractional(&self) -> bool {
        matches!(self, Unit::Kg | Unit::G)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Stock is mutated only by checkout (order creation); price and metadata
/// edits go through the catalog. Products are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, English locale.
    pub name_en: String,

    /// Display name, Bangla locale.
    pub name_bn: String,

    /// Stock Keeping Unit - business identifier, unique in the catalog.
    pub sku: String,

    /// Unit of sale (kg, g, pcs).
    pub unit: Unit,

    /// Current stock level in the product's unit.
    /// Non-negativity is enforced at order time, not at edit time.
    pub stock_quantity: Quantity,

    /// Price charged per unit.
    pub selling_price: Money,

    /// Cost per unit (for profit calculations).
    pub buying_price: Money,

    /// Category label (drives the category revenue report).
    pub category: String,

    /// Stock level at or below which the UI shows a low-stock label.
    /// Advisory only, never a hard constraint.
    pub low_stock_threshold: Quantity,

    /// Optional product image.
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Margin per unit. Negative when the product sells below cost.
    #[inline]
    pub fn unit_margin(&self) -> Money {
        self.selling_price - self.buying_price
    }

    /// Whether `requested` can be sold out of current stock.
    #[inline]
    pub fn has_stock(&self, requested: Quantity) -> bool {
        requested <= self.stock_quantity
    }

    /// Stock label shown in the inventory table.
    pub fn stock_status(&self) -> StockStatus {
        if self.stock_quantity.is_zero() {
            StockStatus::OutOfStock
        } else if self.stock_quantity <= self.low_stock_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// Advisory stock label derived from `stock_quantity` vs the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer attached to an order.
///
/// Captured whenever a sale is not fully settled at checkout: a `due` order
/// without at least a customer name is unrecoverable debt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Customer name. Required when captured.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Customer {
    /// Whether the record is usable for a due order (non-empty name).
    #[inline]
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Mobile payment (bKash, Nagad, etc.).
    MobilePay,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// The payment lifecycle state of an order.
///
/// `Due` orders accept incremental payments until the outstanding amount
/// reaches zero; `Paid` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Fully settled; `amount_due` is zero.
    Paid,
    /// Partially settled; `amount_due` is positive.
    Due,
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
///
/// Uses the snapshot pattern: every product attribute the line needs is
/// copied BY VALUE at checkout, so later catalog edits can never distort a
/// historical receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product the line was rung from (for reporting joins only).
    pub product_id: String,

    /// SKU at time of sale (frozen).
    pub sku: String,

    /// English name at time of sale (frozen).
    pub name_en: String,

    /// Bangla name at time of sale (frozen).
    pub name_bn: String,

    /// Category at time of sale (frozen).
    pub category: String,

    /// Unit of sale at time of sale (frozen).
    pub unit: Unit,

    /// Selling price per unit at time of sale (frozen).
    pub unit_price: Money,

    /// Buying price per unit at time of sale (frozen).
    pub unit_cost: Money,

    /// Quantity sold.
    pub quantity: Quantity,

    /// Line total: `quantity × unit_price`.
    pub subtotal: Money,

    /// Line profit: `quantity × (unit_price − unit_cost)`.
    pub profit: Money,
}

// =============================================================================
// Order
// =============================================================================

/// A finalized sale.
///
/// Immutable once created except for the payment fields (`amount_paid`,
/// `amount_due`, `payment_status`), which change only through payment
/// reconciliation.
///
/// ## Invariants
/// - `amount_paid + amount_due == total`, exactly, at all times
/// - `payment_status == Paid` ⟺ `amount_due == 0`
/// - `amount_paid` only ever increases
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Time-derived identifier, e.g. `ORD-260807-143059-0042`.
    pub id: String,

    /// Frozen line-item snapshots.
    pub items: Vec<OrderItem>,

    /// Sum of line subtotals.
    pub subtotal: Money,

    /// Always zero. Reserved for a future discount feature.
    pub discount: Money,

    /// Amount owed for the order. Equal to `subtotal` (no tax is levied).
    pub total: Money,

    /// Sum of line profits.
    pub total_profit: Money,

    pub payment_method: PaymentMethod,

    pub cashier_id: String,

    /// Creation timestamp; serialized as an ISO-8601 string.
    pub created_at: DateTime<Utc>,

    pub payment_status: PaymentStatus,

    pub amount_paid: Money,

    pub amount_due: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
}

impl Order {
    /// Whether the order still carries an outstanding balance.
    #[inline]
    pub fn is_due(&self) -> bool {
        self.payment_status == PaymentStatus::Due
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> Quantity {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Checks the money invariants. Used when accepting imported data.
    pub fn invariants_hold(&self) -> bool {
        self.amount_paid + self.amount_due == self.total
            && !self.amount_due.is_negative()
            && !self.amount_paid.is_negative()
            && (self.payment_status == PaymentStatus::Paid) == self.amount_due.is_zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
