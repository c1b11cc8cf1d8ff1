//! # Order Engine & Payment Reconciliation
//!
//! Turns a finished cart into an immutable order, and applies incremental
//! payments to orders that still carry a balance.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. CHECKOUT (atomic, this module + store commit)                      │
//! │     └── Order::from_cart() → snapshot lines, totals, payment split     │
//! │         ├── amount_due > 0 → status Due (customer name required)       │
//! │         └── amount_due = 0 → status Paid                               │
//! │                                                                         │
//! │  2. (DUE ORDERS) RECONCILE                                             │
//! │     └── apply_payment() → amount_paid grows, due shrinks               │
//! │     └── apply_payment() → … until due reaches 0 → status Paid          │
//! │                                                                         │
//! │  3. PAID is terminal - no further mutation of any field                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Overpayment policy: a tender larger than the outstanding amount is capped;
//! the excess comes back as `change` and is never stored on the order, so
//! `amount_due` can never go negative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Customer, Order, OrderItem, PaymentMethod, PaymentStatus};
use crate::validation;

// =============================================================================
// Checkout Request
// =============================================================================

/// Parameters for finalizing a cart into an order.
#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    pub payment_method: PaymentMethod,

    /// Cashier ringing the sale.
    pub cashier_id: String,

    /// Amount tendered at the counter. `None` means the full total was paid.
    pub amount_paid: Option<Money>,

    /// Customer identity. Mandatory when the tender leaves a balance.
    pub customer: Option<Customer>,
}

/// Result of finalizing a cart: the order plus any change owed back.
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub order: Order,
    /// Excess tender returned to the customer. Zero unless they overpaid.
    pub change: Money,
}

// =============================================================================
// Payment Receipt
// =============================================================================

/// Result of applying an incremental payment to a due order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub order_id: String,

    /// The portion of the tender actually applied to the balance.
    pub amount_applied: Money,

    /// Excess tender returned to the customer.
    pub change: Money,

    pub amount_paid: Money,
    pub amount_due: Money,
    pub payment_status: PaymentStatus,
}

// =============================================================================
// Order Construction
// =============================================================================

impl Order {
    /// Builds an order from a cart snapshot.
    ///
    /// Pure computation - the caller supplies the id and timestamp, commits
    /// the result to the store, and decrements stock in the same unit of
    /// work. No state changes here.
    ///
    /// ## Steps
    /// 1. Refuse an empty cart (`EmptyCart`).
    /// 2. Deep-copy every line into an [`OrderItem`] - orders hold values,
    ///    never references, so later catalog edits cannot distort history.
    /// 3. Compute totals; the total equals the subtotal (no tax, discount
    ///    reserved at zero).
    /// 4. Split the tender: applied amount is capped at the total, excess
    ///    is returned as change, the remainder becomes `amount_due`.
    /// 5. Refuse a due order without a named customer
    ///    (`MissingCustomerForDueOrder`) - the calling workflow should have
    ///    collected one already; this is defense in depth.
    pub fn from_cart(
        id: impl Into<String>,
        created_at: DateTime<Utc>,
        cart: &Cart,
        request: &CheckoutRequest,
    ) -> CoreResult<CheckoutOutcome> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let items: Vec<OrderItem> = cart
            .lines
            .iter()
            .map(|line| OrderItem {
                product_id: line.product_id.clone(),
                sku: line.sku.clone(),
                name_en: line.name_en.clone(),
                name_bn: line.name_bn.clone(),
                category: line.category.clone(),
                unit: line.unit,
                unit_price: line.unit_price,
                unit_cost: line.unit_cost,
                quantity: line.quantity,
                subtotal: line.subtotal(),
                profit: line.profit(),
            })
            .collect();

        let subtotal: Money = items.iter().map(|i| i.subtotal).sum();
        let total_profit: Money = items.iter().map(|i| i.profit).sum();
        let total = subtotal;

        let tendered = request.amount_paid.unwrap_or(total);
        if tendered.is_negative() {
            return Err(CoreError::InvalidPaymentAmount {
                reason: "tendered amount must not be negative".to_string(),
            });
        }

        let amount_paid = tendered.min(total);
        let change = tendered - amount_paid;
        let amount_due = total - amount_paid;

        let payment_status = if amount_due.is_positive() {
            PaymentStatus::Due
        } else {
            PaymentStatus::Paid
        };

        if payment_status == PaymentStatus::Due
            && !request.customer.as_ref().is_some_and(Customer::has_name)
        {
            return Err(CoreError::MissingCustomerForDueOrder);
        }

        let order = Order {
            id: id.into(),
            items,
            subtotal,
            discount: Money::zero(),
            total,
            total_profit,
            payment_method: request.payment_method,
            cashier_id: request.cashier_id.clone(),
            created_at,
            payment_status,
            amount_paid,
            amount_due,
            customer: request.customer.clone(),
        };

        debug_assert!(order.invariants_hold());
        Ok(CheckoutOutcome { order, change })
    }

    /// Applies an incremental payment to this order.
    ///
    /// This is the ONLY mutation path for an order after creation; no other
    /// field may change.
    ///
    /// ## Behavior
    /// - `amount` must be positive (`InvalidPaymentAmount`)
    /// - A settled order refuses further payments (`OrderAlreadyPaid`)
    /// - The increment is capped at the outstanding balance; the excess is
    ///   reported back as `change`, so `amount_due` bottoms out at zero
    pub fn apply_payment(&mut self, amount: Money) -> CoreResult<PaymentReceipt> {
        validation::validate_payment_amount(amount).map_err(|e| {
            CoreError::InvalidPaymentAmount {
                reason: e.to_string(),
            }
        })?;

        if self.payment_status == PaymentStatus::Paid {
            return Err(CoreError::OrderAlreadyPaid {
                order_id: self.id.clone(),
            });
        }

        let applied = amount.min(self.amount_due);
        let change = amount - applied;

        self.amount_paid += applied;
        self.amount_due = self.total - self.amount_paid;
        self.payment_status = if self.amount_due.is_zero() {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Due
        };

        debug_assert!(self.invariants_hold());

        Ok(PaymentReceipt {
            order_id: self.id.clone(),
            amount_applied: applied,
            change,
            amount_paid: self.amount_paid,
            amount_due: self.amount_due,
            payment_status: self.payment_status,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
