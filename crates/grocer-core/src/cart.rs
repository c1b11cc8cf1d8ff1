//! # Cart Engine
//!
//! The working set of line items for one in-progress sale.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Counter Action           Cart Engine              State Change         │
//! │  ──────────────           ───────────              ────────────         │
//! │                                                                         │
//! │  Tap product ────────────► add_item() ───────────► pcs: qty += 1        │
//! │                                                    kg/g: insert @ 1     │
//! │                                                                         │
//! │  Type/preset qty ────────► set_quantity() ───────► line.qty = n         │
//! │                                                    (n <= 0 removes)     │
//! │                                                                         │
//! │  Tap remove ─────────────► remove_item() ────────► line dropped         │
//! │                                                    (absent id: no-op)   │
//! │                                                                         │
//! │  Checkout done ──────────► clear() ──────────────► empty cart           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id`
//! - Every line quantity is positive (zero/negative removes the line)
//! - Maximum lines: `MAX_CART_LINES`; maximum per-line quantity:
//!   `MAX_LINE_QUANTITY`
//! - Prices are frozen at add time; a catalog price edit mid-sale does not
//!   reprice lines already rung
//!
//! The cart is never persisted: it is discarded on checkout completion or
//! application restart.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::quantity::{parse_quantity, Quantity};
use crate::types::{Product, Unit};
use crate::validation;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the shopping cart.
///
/// ## Design Notes
/// - `product_id` references the catalog entry (for the stock decrement at
///   checkout)
/// - Everything else is a frozen copy taken when the line was created, so
///   the cart displays consistent data even if the catalog changes while
///   the sale is open
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product ID (UUID).
    pub product_id: String,

    /// SKU at time of adding (frozen).
    pub sku: String,

    /// English name at time of adding (frozen).
    pub name_en: String,

    /// Bangla name at time of adding (frozen).
    pub name_bn: String,

    /// Category at time of adding (frozen).
    pub category: String,

    /// Unit of sale.
    pub unit: Unit,

    /// Selling price per unit at time of adding (frozen).
    pub unit_price: Money,

    /// Buying price per unit at time of adding (frozen).
    pub unit_cost: Money,

    /// Stock available when the line was last touched. Used for the soft
    /// stock check; the order engine re-checks against live stock.
    pub available_stock: Quantity,

    /// Quantity in the cart.
    pub quantity: Quantity,
}

impl CartLine {
    /// Creates a new cart line from a product and quantity.
    ///
    /// ## Price Freezing
    /// The prices are captured at this moment. If the catalog price changes
    /// before checkout, this line keeps the price the customer saw.
    pub fn from_product(product: &Product, quantity: Quantity) -> Self {
        CartLine {
            product_id: product.id.clone(),
            sku: product.sku.clone(),
            name_en: product.name_en.clone(),
            name_bn: product.name_bn.clone(),
            category: product.category.clone(),
            unit: product.unit,
            unit_price: product.selling_price,
            unit_cost: product.buying_price,
            available_stock: product.stock_quantity,
            quantity,
        }
    }

    /// Line total: `quantity × unit_price`.
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Line profit: `quantity × (unit_price − unit_cost)`.
    pub fn profit(&self) -> Money {
        (self.unit_price - self.unit_cost).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart for one in-progress sale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart.
    ///
    /// ## Behavior by unit
    /// - `pcs`: an existing line's quantity increases by 1; otherwise a new
    ///   line is inserted at quantity 1.
    /// - `kg`/`g`: a new line is inserted at 1 unit (capped to available
    ///   stock); if the line already exists this is a no-op, because
    ///   fractional measurement units are not meaningfully incremented by
    ///   "1" - the operator sets the weight through `set_quantity`.
    pub fn add_item(&mut self, product: &Product) -> CoreResult<()> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            if product.unit != Unit::Pcs {
                return Ok(());
            }

            let new_qty = line.quantity + Quantity::from_whole(1);
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            if !product.has_stock(new_qty) {
                return Err(CoreError::InsufficientStock {
                    sku: product.sku.clone(),
                    available: product.stock_quantity,
                    requested: new_qty,
                });
            }

            line.quantity = new_qty;
            line.available_stock = product.stock_quantity;
            return Ok(());
        }

        validation::validate_cart_size(self.lines.len())
            .map_err(|_| CoreError::CartTooLarge { max: MAX_CART_LINES })?;

        let initial = match product.unit {
            Unit::Pcs => {
                if !product.has_stock(Quantity::from_whole(1)) {
                    return Err(CoreError::InsufficientStock {
                        sku: product.sku.clone(),
                        available: product.stock_quantity,
                        requested: Quantity::from_whole(1),
                    });
                }
                Quantity::from_whole(1)
            }
            // Weight lines open at 1 unit or whatever stock is left,
            // whichever is smaller; the exact weight comes from the editor.
            Unit::Kg | Unit::G => {
                let capped = Quantity::from_whole(1).min(product.stock_quantity);
                if !capped.is_positive() {
                    return Err(CoreError::InsufficientStock {
                        sku: product.sku.clone(),
                        available: product.stock_quantity,
                        requested: Quantity::from_whole(1),
                    });
                }
                capped
            }
        };

        self.lines.push(CartLine::from_product(product, initial));
        Ok(())
    }

    /// Sets the quantity of a product's line.
    ///
    /// ## Behavior
    /// - Non-positive quantity removes the line
    /// - Rejects quantities beyond available stock (`InsufficientStock`) -
    ///   soft validation only, there is no reservation
    /// - Inserts a new line if the product isn't in the cart yet
    pub fn set_quantity(&mut self, product: &Product, quantity: Quantity) -> CoreResult<()> {
        if !quantity.is_positive() {
            self.remove_item(&product.id);
            return Ok(());
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        if product.unit == Unit::Pcs && !quantity.is_whole() {
            return Err(CoreError::InvalidQuantity {
                reason: "piece quantities must be whole numbers".to_string(),
            });
        }

        if !product.has_stock(quantity) {
            return Err(CoreError::InsufficientStock {
                sku: product.sku.clone(),
                available: product.stock_quantity,
                requested: quantity,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = quantity;
            line.available_stock = product.stock_quantity;
        } else {
            validation::validate_cart_size(self.lines.len())
                .map_err(|_| CoreError::CartTooLarge { max: MAX_CART_LINES })?;
            self.lines.push(CartLine::from_product(product, quantity));
        }

        Ok(())
    }

    /// Applies raw quantity-editor input to a product's line.
    ///
    /// Unparseable or non-positive input removes the line rather than
    /// erroring (deliberate leniency - see [`parse_quantity`]).
    pub fn set_quantity_from_input(&mut self, product: &Product, input: &str) -> CoreResult<()> {
        match parse_quantity(input, product.unit) {
            Some(qty) => self.set_quantity(product, qty),
            None => {
                self.remove_item(&product.id);
                Ok(())
            }
        }
    }

    /// Removes a product's line. Removing an absent product id is a no-op.
    pub fn remove_item(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns the number of unique lines in the cart.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> Quantity {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line subtotals.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.subtotal()).sum()
    }

    /// Sum of line profits.
    pub fn total_profit(&self) -> Money {
        self.lines.iter().map(|l| l.profit()).sum()
    }

    /// Amount the customer owes. No tax is levied, so this equals the
    /// subtotal.
    pub fn total(&self) -> Money {
        self.subtotal()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: Quantity,
    pub subtotal: Money,
    pub total_profit: Money,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
            total_profit: cart.total_profit(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pcs_product(id: &str, price: i64, cost: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name_en: format!("Product {}", id),
            name_bn: format!("পণ্য {}", id),
            sku: format!("SKU-{}", id),
            unit: Unit::Pcs,
            stock_quantity: Quantity::from_whole(stock),
            selling_price: Money::from_minor(price),
            buying_price: Money::from_minor(cost),
            category: "Test".to_string(),
            low_stock_threshold: Quantity::from_whole(5),
            image_url: None,
        }
    }

    fn kg_product(id: &str, price: i64, cost: i64, stock_millis: i64) -> Product {
        Product {
            unit: Unit::Kg,
            stock_quantity: Quantity::from_millis(stock_millis),
            ..pcs_product(id, price, cost, 0)
        }
    }

    #[test]
    fn test_add_pcs_item() {
        let mut cart = Cart::new();
        let product = pcs_product("1", 12000, 9000, 50); // milk

        cart.add_item(&product).unwrap();
        cart.add_item(&product).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), Quantity::from_whole(2));
        assert_eq!(cart.subtotal(), Money::from_minor(24000));
        assert_eq!(cart.total_profit(), Money::from_minor(6000));
    }

    #[test]
    fn test_add_weight_item_does_not_increment() {
        let mut cart = Cart::new();
        let product = kg_product("1", 25000, 18000, 100_000);

        cart.add_item(&product).unwrap();
        cart.add_item(&product).unwrap(); // second tap is a no-op

        assert_eq!(cart.total_quantity(), Quantity::from_whole(1));
    }

    #[test]
    fn test_add_weight_item_caps_to_stock() {
        let mut cart = Cart::new();
        // only 0.4 kg left
        let product = kg_product("1", 25000, 18000, 400);

        cart.add_item(&product).unwrap();
        assert_eq!(cart.lines[0].quantity, Quantity::from_millis(400));
    }

    #[test]
    fn test_add_out_of_stock_rejected() {
        let mut cart = Cart::new();
        let product = pcs_product("1", 12000, 9000, 0);

        let err = cart.add_item(&product).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_updates_line_math() {
        let mut cart = Cart::new();
        let product = kg_product("1", 25000, 18000, 100_000); // ৳250/kg, cost ৳180

        cart.add_item(&product).unwrap();
        cart.set_quantity(&product, Quantity::from_millis(750)).unwrap();

        let line = &cart.lines[0];
        assert_eq!(line.subtotal(), Money::from_minor(18750)); // 0.75 × 250.00
        assert_eq!(line.profit(), Money::from_minor(5250)); // 0.75 × 70.00
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        let product = pcs_product("1", 12000, 9000, 50);

        cart.add_item(&product).unwrap();
        cart.set_quantity(&product, Quantity::zero()).unwrap();

        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_rejects_overselling() {
        let mut cart = Cart::new();
        let product = pcs_product("1", 12000, 9000, 3);

        cart.add_item(&product).unwrap();
        let err = cart
            .set_quantity(&product, Quantity::from_whole(5))
            .unwrap_err();

        match err {
            CoreError::InsufficientStock {
                available,
                requested,
                ..
            } => {
                assert_eq!(available, Quantity::from_whole(3));
                assert_eq!(requested, Quantity::from_whole(5));
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
        // no state change on rejection
        assert_eq!(cart.lines[0].quantity, Quantity::from_whole(1));
    }

    #[test]
    fn test_set_quantity_rejects_fractional_pieces() {
        let mut cart = Cart::new();
        let product = pcs_product("1", 12000, 9000, 50);

        cart.add_item(&product).unwrap();
        let err = cart
            .set_quantity(&product, Quantity::from_millis(1500))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuantity { .. }));
    }

    #[test]
    fn test_quantity_input_garbage_removes_line() {
        let mut cart = Cart::new();
        let product = kg_product("1", 25000, 18000, 100_000);

        cart.add_item(&product).unwrap();
        cart.set_quantity_from_input(&product, "oops").unwrap();
        assert!(cart.is_empty());

        cart.add_item(&product).unwrap();
        cart.set_quantity_from_input(&product, "-1").unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_input_valid_sets_line() {
        let mut cart = Cart::new();
        let product = kg_product("1", 25000, 18000, 100_000);

        cart.add_item(&product).unwrap();
        cart.set_quantity_from_input(&product, "2.5").unwrap();
        assert_eq!(cart.lines[0].quantity, Quantity::from_millis(2500));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        let product = pcs_product("1", 12000, 9000, 50);
        cart.add_item(&product).unwrap();

        cart.remove_item("no-such-product");
        assert_eq!(cart.item_count(), 1);

        cart.remove_item(&product.id);
        assert!(cart.is_empty());

        // removing again is still fine
        cart.remove_item(&product.id);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_price_frozen_at_add_time() {
        let mut cart = Cart::new();
        let mut product = pcs_product("1", 12000, 9000, 50);

        cart.add_item(&product).unwrap();
        product.selling_price = Money::from_minor(99000); // catalog edit mid-sale

        assert_eq!(cart.subtotal(), Money::from_minor(12000));
    }

    #[test]
    fn test_total_equals_subtotal() {
        let mut cart = Cart::new();
        let product = pcs_product("1", 8000, 5000, 30);
        cart.add_item(&product).unwrap();
        cart.add_item(&product).unwrap();

        assert_eq!(cart.total(), cart.subtotal());
        assert_eq!(cart.total(), Money::from_minor(16000));
    }

    #[test]
    fn test_totals_summary() {
        let mut cart = Cart::new();
        let a = pcs_product("1", 8000, 5000, 30);
        let b = kg_product("2", 25000, 18000, 100_000);

        cart.add_item(&a).unwrap();
        cart.set_quantity(&b, Quantity::from_millis(500)).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.subtotal, Money::from_minor(8000 + 12500));
        assert_eq!(totals.total, totals.subtotal);
        assert_eq!(totals.total_profit, Money::from_minor(3000 + 3500));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        let product = pcs_product("1", 8000, 5000, 30);
        cart.add_item(&product).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }
}
