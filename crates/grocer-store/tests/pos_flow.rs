//! End-to-end flows through the store: ring a sale, carry a balance,
//! settle it later, survive a restart, move a backup between stores.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use grocer_core::{
    Cart, CheckoutRequest, CoreError, Money, PaymentMethod, PaymentStatus, Quantity,
};
use grocer_store::{new_customer, FileStorage, GrocerStore, MemoryStorage, StoreError};

fn today() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
}

fn open_store() -> (Arc<MemoryStorage>, GrocerStore) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let backend = Arc::new(MemoryStorage::new());
    let store = GrocerStore::open_at(backend.clone(), today());
    (backend, store)
}

fn cash_request() -> CheckoutRequest {
    CheckoutRequest {
        payment_method: PaymentMethod::Cash,
        cashier_id: "cashier_01".to_string(),
        amount_paid: None,
        customer: None,
    }
}

#[test]
fn stock_round_trip_across_restart() {
    let (backend, store) = open_store();

    // Fresh Apples: 100 kg on the shelf
    let apples = store.find_by_sku("FRT-APL-01").unwrap();
    assert_eq!(apples.stock_quantity, Quantity::from_whole(100));

    let mut cart = Cart::new();
    cart.set_quantity(&apples, Quantity::from_whole(3)).unwrap();
    let receipt = store.checkout(&mut cart, &cash_request()).unwrap();

    assert_eq!(receipt.order.items.len(), 1);
    assert_eq!(receipt.order.items[0].quantity, Quantity::from_whole(3));
    assert_eq!(
        store.find_by_sku("FRT-APL-01").unwrap().stock_quantity,
        Quantity::from_whole(97)
    );

    // a new session over the same backend sees the sale and the stock
    let reopened = GrocerStore::open_at(backend, today());
    assert_eq!(
        reopened.find_by_sku("FRT-APL-01").unwrap().stock_quantity,
        Quantity::from_whole(97)
    );
    let persisted = reopened.get_order(&receipt.order.id).unwrap();
    assert_eq!(persisted.total, receipt.order.total);
    assert_eq!(persisted.payment_status, PaymentStatus::Paid);
}

#[test]
fn due_order_settled_over_two_payments() {
    let (_backend, store) = open_store();

    // a ৳500 sale: 2 kg of apples at ৳250/kg
    let apples = store.find_by_sku("FRT-APL-01").unwrap();
    let mut cart = Cart::new();
    cart.set_quantity(&apples, Quantity::from_whole(2)).unwrap();
    assert_eq!(cart.total(), Money::from_minor(50000));

    let customer = new_customer("Karim Mia", None, Some("Station Road".to_string())).unwrap();
    let request = CheckoutRequest {
        amount_paid: Some(Money::from_minor(20000)),
        customer: Some(customer),
        ..cash_request()
    };

    let receipt = store.checkout(&mut cart, &request).unwrap();
    let order_id = receipt.order.id.clone();
    assert_eq!(receipt.order.amount_due, Money::from_minor(30000));
    assert_eq!(receipt.order.payment_status, PaymentStatus::Due);

    // first installment
    let p1 = store
        .record_payment(&order_id, Money::from_minor(10000))
        .unwrap();
    assert_eq!(p1.amount_due, Money::from_minor(20000));
    assert_eq!(p1.payment_status, PaymentStatus::Due);

    // final installment overshoots by ৳50 - clamped, change returned
    let p2 = store
        .record_payment(&order_id, Money::from_minor(25000))
        .unwrap();
    assert_eq!(p2.amount_applied, Money::from_minor(20000));
    assert_eq!(p2.change, Money::from_minor(5000));
    assert_eq!(p2.payment_status, PaymentStatus::Paid);

    let settled = store.get_order(&order_id).unwrap();
    assert_eq!(settled.amount_paid, settled.total);
    assert!(settled.invariants_hold());

    // a settled order refuses further payments
    let err = store
        .record_payment(&order_id, Money::from_minor(100))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Core(CoreError::OrderAlreadyPaid { .. })
    ));
}

#[test]
fn due_checkout_without_customer_is_blocked() {
    let (_backend, store) = open_store();
    let milk = store.find_by_sku("DRY-MLK-01").unwrap();

    let mut cart = Cart::new();
    cart.add_item(&milk).unwrap();

    let request = CheckoutRequest {
        amount_paid: Some(Money::from_minor(100)),
        ..cash_request()
    };

    let err = store.checkout(&mut cart, &request).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Core(CoreError::MissingCustomerForDueOrder)
    ));
    // cart survives so the operator can fix the sale
    assert!(!cart.is_empty());
    assert_eq!(
        store.find_by_sku("DRY-MLK-01").unwrap().stock_quantity,
        Quantity::from_whole(50)
    );
}

#[test]
fn checkout_write_failure_reported_but_sale_stands() {
    let (backend, store) = open_store();
    let bread = store.find_by_sku("BKY-BRD-01").unwrap();

    backend.set_fail_writes(true);

    let mut cart = Cart::new();
    cart.add_item(&bread).unwrap();
    let receipt = store.checkout(&mut cart, &cash_request()).unwrap();

    // the sale exists in memory for the rest of the session
    assert!(store.get_order(&receipt.order.id).is_some());
    assert_eq!(
        store.find_by_sku("BKY-BRD-01").unwrap().stock_quantity,
        Quantity::from_whole(29)
    );
    // and the failure is surfaced exactly once
    assert!(matches!(
        store.take_write_error(),
        Some(StoreError::WriteFailed { .. })
    ));
    assert!(store.take_write_error().is_none());
}

#[test]
fn backup_moves_between_stores() {
    let (_backend, store) = open_store();

    // make some history beyond the seed data
    let eggs = store.find_by_sku("DRY-EGG-01").unwrap();
    let mut cart = Cart::new();
    for _ in 0..4 {
        cart.add_item(&eggs).unwrap();
    }
    store.checkout(&mut cart, &cash_request()).unwrap();

    let blob = store.export_json().unwrap();
    let orders = store.orders();

    let fresh = GrocerStore::open_at(Arc::new(MemoryStorage::new()), today());
    fresh.import_json(&blob).unwrap();

    let restored = fresh.orders();
    assert_eq!(orders.len(), restored.len());
    for (a, b) in orders.iter().zip(restored.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.total, b.total);
        assert_eq!(a.amount_paid, b.amount_paid);
        assert_eq!(a.amount_due, b.amount_due);
        assert_eq!(a.payment_status, b.payment_status);
    }
    assert_eq!(
        fresh.find_by_sku("DRY-EGG-01").unwrap().stock_quantity,
        Quantity::from_whole(56)
    );
}

#[test]
fn reports_reflect_new_sales() {
    let (_backend, store) = open_store();

    let from = Utc::now() - Duration::hours(1);
    let to = Utc::now() + Duration::hours(1);
    let before = store.sales_summary(from, to);

    let oil = store.find_by_sku("OIL-OLV-01").unwrap();
    let mut cart = Cart::new();
    cart.add_item(&oil).unwrap();
    store.checkout(&mut cart, &cash_request()).unwrap();

    let after = store.sales_summary(from, to);
    assert_eq!(after.order_count, before.order_count + 1);
    assert_eq!(after.revenue, before.revenue + Money::from_minor(90000));
    assert_eq!(after.profit, before.profit + Money::from_minor(15000));

    let categories = store.revenue_by_category();
    assert!(categories.iter().any(|c| c.category == "Pantry"));
}

#[test]
fn file_backed_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(FileStorage::new(dir.path().join("grocerease")).unwrap());

    let store = GrocerStore::open_at(backend.clone(), today());
    let carrots = store.find_by_sku("VEG-CRT-01").unwrap();

    let mut cart = Cart::new();
    cart.set_quantity(&carrots, Quantity::from_millis(1500))
        .unwrap(); // 1.5 kg at ৳60
    let receipt = store.checkout(&mut cart, &cash_request()).unwrap();
    assert_eq!(receipt.order.total, Money::from_minor(9000));

    drop(store);

    let reopened = GrocerStore::open_at(backend, today());
    assert_eq!(
        reopened.find_by_sku("VEG-CRT-01").unwrap().stock_quantity,
        Quantity::from_millis(78500)
    );
    let persisted = reopened.get_order(&receipt.order.id).unwrap();
    assert_eq!(persisted.total, Money::from_minor(9000));
    assert_eq!(persisted.created_at, receipt.order.created_at);
}
