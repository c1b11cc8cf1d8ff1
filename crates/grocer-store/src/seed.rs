//! # Seed Data
//!
//! The starter catalog and the demo-order generator used when the backend
//! has nothing stored (first launch, cleared data, or a failed read).
//!
//! Demo orders are driven by a fixed-seed RNG so that every empty-state
//! launch produces the same ninety days of history - screenshots, tests and
//! bug reports all agree on what "the sample data" looks like.

use chrono::{DateTime, Duration, Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use grocer_core::{
    Cart, CheckoutRequest, Customer, Money, Order, PaymentMethod, Product, Quantity, Unit,
};

/// Fixed seed for the demo-order generator.
const DEMO_SEED: u64 = 42;

/// Days of sample history generated for an empty store.
const DEMO_HISTORY_DAYS: i64 = 90;

// =============================================================================
// Starter Catalog
// =============================================================================

/// The eight-product starter catalog.
pub fn initial_products() -> Vec<Product> {
    fn product(
        id: &str,
        name_en: &str,
        name_bn: &str,
        sku: &str,
        unit: Unit,
        stock: i64,
        selling_taka: i64,
        buying_taka: i64,
        category: &str,
        threshold: i64,
    ) -> Product {
        Product {
            id: id.to_string(),
            name_en: name_en.to_string(),
            name_bn: name_bn.to_string(),
            sku: sku.to_string(),
            unit,
            stock_quantity: Quantity::from_whole(stock),
            selling_price: Money::from_major_minor(selling_taka, 0),
            buying_price: Money::from_major_minor(buying_taka, 0),
            category: category.to_string(),
            low_stock_threshold: Quantity::from_whole(threshold),
            image_url: Some("https://placehold.co/300x300.png".to_string()),
        }
    }

    vec![
        product("prod_001", "Fresh Apples", "তাজা আপেল", "FRT-APL-01", Unit::Kg, 100, 250, 180, "Fruits", 10),
        product("prod_002", "Whole Milk", "পূর্ণ দুধ", "DRY-MLK-01", Unit::Pcs, 50, 120, 90, "Dairy", 5),
        product("prod_003", "Brown Bread", "বাদামী রুটি", "BKY-BRD-01", Unit::Pcs, 30, 80, 50, "Bakery", 6),
        product("prod_004", "Chicken Breast", "মুরগির বুকের মাংস", "MT-CKN-01", Unit::Kg, 25, 450, 350, "Meat", 5),
        product("prod_005", "Carrots", "গাজর", "VEG-CRT-01", Unit::Kg, 80, 60, 40, "Vegetables", 15),
        product("prod_006", "Organic Eggs", "জৈব ডিম", "DRY-EGG-01", Unit::Pcs, 60, 15, 10, "Dairy", 12),
        product("prod_007", "Lentils", "মসুর ডাল", "GRN-LNT-01", Unit::Kg, 200, 140, 110, "Grains", 20),
        product("prod_008", "Olive Oil", "জলপাই তেল", "OIL-OLV-01", Unit::Pcs, 40, 900, 750, "Pantry", 8),
    ]
}

// =============================================================================
// Demo Orders
// =============================================================================

/// Generates ~90 days of sample orders against the given catalog,
/// most-recent-first. Stock is NOT decremented - demo history is a
/// bootstrapping concern, not a sale.
///
/// Deterministic: the same catalog and `today` always produce the same
/// list.
pub fn generate_initial_orders(products: &[Product], today: DateTime<Utc>) -> Vec<Order> {
    let mut rng = StdRng::seed_from_u64(DEMO_SEED);
    let mut orders = Vec::new();
    let mut order_no: u32 = 1;

    if products.is_empty() {
        return orders;
    }

    for days_ago in (0..=DEMO_HISTORY_DAYS).rev() {
        let day = today - Duration::days(days_ago);
        let orders_today = rng.gen_range(2..=6);
        for slot in 0..orders_today {
            if let Some(order) = demo_order(&mut rng, order_no, day, slot, products) {
                orders.push(order);
                order_no += 1;
            }
        }
    }

    orders.reverse();
    orders
}

fn demo_order(
    rng: &mut StdRng,
    order_no: u32,
    day: DateTime<Utc>,
    slot: u32,
    products: &[Product],
) -> Option<Order> {
    let mut cart = Cart::new();
    let line_count = rng.gen_range(1..=5);

    for _ in 0..line_count {
        let product = &products[rng.gen_range(0..products.len())];
        let quantity = match product.unit {
            Unit::Pcs => Quantity::from_whole(rng.gen_range(1..=5)),
            Unit::Kg | Unit::G => Quantity::from_millis(rng.gen_range(500..=2500)),
        };
        // Duplicate picks collapse onto one line; a quantity beyond stock
        // just leaves the line as it was.
        let _ = cart.set_quantity(product, quantity);
    }

    if cart.is_empty() {
        return None;
    }

    let total = cart.total();
    let is_due = rng.gen_bool(0.2);
    let (amount_paid, customer) = if is_due {
        let pct = rng.gen_range(20..=70);
        let paid = Money::from_minor(total.minor() * pct / 100);
        let customer = Customer {
            id: format!("CUST-{:03}", rng.gen_range(1..=5)),
            name: "Walking Customer".to_string(),
            phone: None,
            address: None,
        };
        (Some(paid), Some(customer))
    } else {
        (None, None)
    };

    let methods = [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::MobilePay];
    let request = CheckoutRequest {
        payment_method: methods[rng.gen_range(0..methods.len())],
        cashier_id: format!("cashier_{:02}", rng.gen_range(1..=2)),
        amount_paid,
        customer,
    };

    let created_at = day
        .with_hour(9 + slot % 10)?
        .with_minute(rng.gen_range(0..60))?
        .with_second(0)?
        .with_nanosecond(0)?;

    let id = format!("ORD-{:03}", order_no);
    Order::from_cart(id, created_at, &cart, &request)
        .ok()
        .map(|outcome| outcome.order)
}

// =============================================================================
// Unit Tests
// =============================================================================
