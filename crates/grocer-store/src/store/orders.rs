//! # Order Operations
//!
//! Checkout commit and payment recording against the store.
//!
//! ## Checkout Atomicity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout() - one critical section, no partial application             │
//! │                                                                         │
//! │  1. Build the order from the cart (pure, grocer-core)                  │
//! │  2. Re-check every line against LIVE stock - any shortfall aborts      │
//! │     the whole checkout with InsufficientStock                          │
//! │  3. Decrement stock per line + prepend the order                       │
//! │  4. Write products and orders through together                         │
//! │  5. Clear the cart                                                      │
//! │                                                                         │
//! │  Steps 1-5 run under the store lock: a re-render or a double-tapped    │
//! │  checkout button can never observe half-updated state.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no rollback/retry: this is a single-process local system, so a
//! failed storage write is reported (see `take_write_error`) while the
//! in-memory commit stands.

use std::sync::atomic::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use grocer_core::reports::{self, CategoryRevenue, DailyRevenue, SalesSummary};
use grocer_core::{
    validation, Cart, CheckoutRequest, CoreError, Customer, Money, Order, PaymentReceipt, Quantity,
};

use crate::error::{StoreError, StoreResult};
use crate::store::{GrocerStore, KEY_ORDERS, KEY_PRODUCTS};

// =============================================================================
// Receipt
// =============================================================================

/// What the operator hands to the customer after checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub shop_name: String,
    /// Excess tender returned to the customer.
    pub change: Money,
    pub order: Order,
}

/// Builds a customer record from counter input.
///
/// A non-empty name is required - this is the identity that makes a due
/// order collectible.
pub fn new_customer(
    name: &str,
    phone: Option<String>,
    address: Option<String>,
) -> StoreResult<Customer> {
    validation::validate_customer_name(name).map_err(CoreError::from)?;
    Ok(Customer {
        id: Uuid::new_v4().to_string(),
        name: name.trim().to_string(),
        phone,
        address,
    })
}

// =============================================================================
// Operations
// =============================================================================

impl GrocerStore {
    /// Finalizes a cart into a persisted order.
    ///
    /// On success the cart is cleared, stock is decremented line by line,
    /// and the order sits at the head of the order list. On any error
    /// nothing changes - cart included.
    pub fn checkout(&self, cart: &mut Cart, request: &CheckoutRequest) -> StoreResult<Receipt> {
        let now = Utc::now();
        let mut state = self.lock_state();

        let order_id = self.next_order_id(now);
        let outcome = Order::from_cart(order_id, now, cart, request)?;

        // Re-validate every line against live stock before touching it.
        // Cart-time checks were advisory; this one is binding.
        for item in &outcome.order.items {
            let product = state
                .products
                .iter()
                .find(|p| p.id == item.product_id)
                .ok_or_else(|| StoreError::not_found("Product", &item.product_id))?;

            validation::validate_quantity(item.quantity, product.unit)
                .map_err(|e| StoreError::Core(e.into()))?;

            if !product.has_stock(item.quantity) {
                return Err(CoreError::InsufficientStock {
                    sku: product.sku.clone(),
                    available: product.stock_quantity,
                    requested: item.quantity,
                }
                .into());
            }
        }

        for item in &outcome.order.items {
            if let Some(product) = state
                .products
                .iter_mut()
                .find(|p| p.id == item.product_id)
            {
                product.stock_quantity -= item.quantity;
            }
        }

        state.orders.insert(0, outcome.order.clone());

        // One combined update: both keys written back to back while the
        // lock is held, so no reader sees stock without the order.
        self.persist(KEY_PRODUCTS, &state.products);
        self.persist(KEY_ORDERS, &state.orders);

        cart.clear();

        info!(
            order_id = %outcome.order.id,
            total = %outcome.order.total,
            items = outcome.order.items.len(),
            status = ?outcome.order.payment_status,
            "Order created"
        );

        Ok(Receipt {
            shop_name: state.settings.shop_name.clone(),
            change: outcome.change,
            order: outcome.order,
        })
    }

    /// Applies an incremental payment to a due order.
    ///
    /// The only mutation path for a persisted order. Read-modify-write runs
    /// under the store lock, so a double-fired dialog cannot lose an
    /// update.
    pub fn record_payment(&self, order_id: &str, amount: Money) -> StoreResult<PaymentReceipt> {
        let mut state = self.lock_state();

        let receipt = {
            let order = state
                .orders
                .iter_mut()
                .find(|o| o.id == order_id)
                .ok_or_else(|| StoreError::not_found("Order", order_id))?;
            order.apply_payment(amount)?
        };

        self.persist(KEY_ORDERS, &state.orders);

        info!(
            order_id = %order_id,
            applied = %receipt.amount_applied,
            due = %receipt.amount_due,
            status = ?receipt.payment_status,
            "Payment recorded"
        );

        Ok(receipt)
    }

    /// Looks up an order by id.
    pub fn get_order(&self, order_id: &str) -> Option<Order> {
        self.lock_state()
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
    }

    /// Orders still carrying a balance, most-recent-first.
    pub fn due_orders(&self) -> Vec<Order> {
        self.lock_state()
            .orders
            .iter()
            .filter(|o| o.is_due())
            .cloned()
            .collect()
    }

    /// Total quantity of a product sold across all orders.
    pub fn quantity_sold(&self, product_id: &str) -> Quantity {
        self.lock_state()
            .orders
            .iter()
            .flat_map(|o| o.items.iter())
            .filter(|i| i.product_id == product_id)
            .map(|i| i.quantity)
            .sum()
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Headline numbers for `[from, to]`.
    pub fn sales_summary(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> SalesSummary {
        reports::sales_summary(&self.lock_state().orders, from, to)
    }

    /// Revenue per category, highest first.
    pub fn revenue_by_category(&self) -> Vec<CategoryRevenue> {
        reports::revenue_by_category(&self.lock_state().orders)
    }

    /// Per-day revenue series over `[from, to]`.
    pub fn daily_revenue(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<DailyRevenue> {
        reports::daily_revenue(&self.lock_state().orders, from, to)
    }

    // =========================================================================
    // Id Generation
    // =========================================================================

    /// Time-derived order id, unique within a session thanks to the
    /// sequence suffix: `ORD-YYMMDD-HHMMSS-NNNN`.
    fn next_order_id(&self, now: DateTime<Utc>) -> String {
        let seq = self.order_seq.fetch_add(1, Ordering::SeqCst);
        let id = format!("ORD-{}-{:04}", now.format("%y%m%d-%H%M%S"), seq % 10000);
        debug!(order_id = %id, "Generated order id");
        id
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;
    use grocer_core::{PaymentMethod, PaymentStatus};
    use std::sync::Arc;

    fn store() -> GrocerStore {
        GrocerStore::open_at(
            Arc::new(MemoryStorage::new()),
            Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap(),
        )
    }

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            payment_method: PaymentMethod::Cash,
            cashier_id: "cashier_01".to_string(),
            amount_paid: None,
            customer: None,
        }
    }

    #[test]
    fn test_checkout_decrements_stock() {
        let store = store();
        // Whole Milk: 50 pcs in stock
        let milk = store.find_by_sku("DRY-MLK-01").unwrap();

        let mut cart = Cart::new();
        for _ in 0..3 {
            cart.add_item(&milk).unwrap();
        }

        let receipt = store.checkout(&mut cart, &request()).unwrap();

        assert!(cart.is_empty());
        assert_eq!(
            store.find_by_sku("DRY-MLK-01").unwrap().stock_quantity,
            Quantity::from_whole(47)
        );
        assert_eq!(receipt.order.items.len(), 1);
        assert_eq!(receipt.order.items[0].quantity, Quantity::from_whole(3));
        // newest order sits at the head of the list
        assert_eq!(store.orders()[0].id, receipt.order.id);
    }

    #[test]
    fn test_checkout_empty_cart_no_side_effects() {
        let store = store();
        let stock_before: Vec<_> = store.products().iter().map(|p| p.stock_quantity).collect();
        let orders_before = store.orders().len();

        let mut cart = Cart::new();
        let err = store.checkout(&mut cart, &request()).unwrap_err();

        assert!(matches!(err, StoreError::Core(CoreError::EmptyCart)));
        assert_eq!(store.orders().len(), orders_before);
        let stock_after: Vec<_> = store.products().iter().map(|p| p.stock_quantity).collect();
        assert_eq!(stock_before, stock_after);
    }

    #[test]
    fn test_checkout_rejects_stale_cart_overselling() {
        let store = store();
        let milk = store.find_by_sku("DRY-MLK-01").unwrap();

        // Cart validated against a stale stock snapshot...
        let mut stale = milk.clone();
        stale.stock_quantity = Quantity::from_whole(500);
        let mut cart = Cart::new();
        cart.set_quantity(&stale, Quantity::from_whole(100)).unwrap();

        // ...but the commit checks live stock (50) and aborts whole.
        let err = store.checkout(&mut cart, &request()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InsufficientStock { .. })
        ));

        assert!(!cart.is_empty());
        assert_eq!(
            store.find_by_sku("DRY-MLK-01").unwrap().stock_quantity,
            Quantity::from_whole(50)
        );
    }

    #[test]
    fn test_checkout_due_flow_and_payment() {
        let store = store();
        let oil = store.find_by_sku("OIL-OLV-01").unwrap(); // ৳900

        let mut cart = Cart::new();
        cart.add_item(&oil).unwrap();

        let customer = new_customer("Rahim Uddin", Some("01712-000000".to_string()), None).unwrap();
        let req = CheckoutRequest {
            amount_paid: Some(Money::from_minor(40000)), // ৳400 of ৳900
            customer: Some(customer),
            ..request()
        };

        let receipt = store.checkout(&mut cart, &req).unwrap();
        let order_id = receipt.order.id.clone();
        assert_eq!(receipt.order.payment_status, PaymentStatus::Due);
        assert_eq!(receipt.order.amount_due, Money::from_minor(50000));
        assert_eq!(store.due_orders()[0].id, order_id);

        let payment = store
            .record_payment(&order_id, Money::from_minor(50000))
            .unwrap();
        assert_eq!(payment.payment_status, PaymentStatus::Paid);
        assert_eq!(payment.amount_due, Money::zero());

        let settled = store.get_order(&order_id).unwrap();
        assert!(settled.invariants_hold());
        assert!(!store.due_orders().iter().any(|o| o.id == order_id));
    }

    #[test]
    fn test_record_payment_missing_order() {
        let store = store();
        let err = store
            .record_payment("ORD-nope", Money::from_minor(100))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_order_ids_unique_within_session() {
        let store = store();
        let bread = store.find_by_sku("BKY-BRD-01").unwrap();

        let mut ids = Vec::new();
        for _ in 0..5 {
            let mut cart = Cart::new();
            cart.add_item(&bread).unwrap();
            ids.push(store.checkout(&mut cart, &request()).unwrap().order.id);
        }

        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn test_quantity_sold() {
        let store = store();
        // fresh store has demo orders; use a product added after seeding so
        // the count starts from zero
        let product = store
            .add_product(crate::store::NewProduct {
                name_en: "Green Tea".to_string(),
                name_bn: "সবুজ চা".to_string(),
                sku: "BEV-TEA-01".to_string(),
                unit: grocer_core::Unit::Pcs,
                stock_quantity: Quantity::from_whole(40),
                selling_price: Money::from_minor(30000),
                buying_price: Money::from_minor(22000),
                category: "Beverages".to_string(),
                low_stock_threshold: Quantity::from_whole(5),
                image_url: None,
            })
            .unwrap();

        assert_eq!(store.quantity_sold(&product.id), Quantity::zero());

        let mut cart = Cart::new();
        cart.add_item(&product).unwrap();
        cart.add_item(&product).unwrap();
        store.checkout(&mut cart, &request()).unwrap();

        assert_eq!(store.quantity_sold(&product.id), Quantity::from_whole(2));
    }
}
