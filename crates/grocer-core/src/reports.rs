//! # Report Computations
//!
//! Pure aggregations behind the dashboard: revenue/profit summaries over a
//! date range, category breakdowns, and the daily revenue series. Rendering
//! is someone else's problem; everything here is plain data in, plain data
//! out.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::{Order, Product, StockStatus};

/// Headline numbers for a reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub order_count: usize,
    pub revenue: Money,
    pub profit: Money,
    pub items_sold: Quantity,
    /// Outstanding balance across due orders in the period.
    pub due_total: Money,
}

/// Revenue attributed to one product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: Money,
}

/// Revenue for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: Money,
}

fn in_range(order: &Order, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
    order.created_at >= from && order.created_at <= to
}

/// Summarizes orders whose `created_at` falls within `[from, to]`.
pub fn sales_summary(orders: &[Order], from: DateTime<Utc>, to: DateTime<Utc>) -> SalesSummary {
    let mut summary = SalesSummary {
        order_count: 0,
        revenue: Money::zero(),
        profit: Money::zero(),
        items_sold: Quantity::zero(),
        due_total: Money::zero(),
    };

    for order in orders.iter().filter(|o| in_range(o, from, to)) {
        summary.order_count += 1;
        summary.revenue += order.total;
        summary.profit += order.total_profit;
        summary.items_sold += order.total_quantity();
        summary.due_total += order.amount_due;
    }

    summary
}

/// Revenue per category across the given orders, highest first.
pub fn revenue_by_category(orders: &[Order]) -> Vec<CategoryRevenue> {
    let mut buckets: Vec<CategoryRevenue> = Vec::new();

    for order in orders {
        for item in &order.items {
            match buckets.iter_mut().find(|b| b.category == item.category) {
                Some(bucket) => bucket.revenue += item.subtotal,
                None => buckets.push(CategoryRevenue {
                    category: item.category.clone(),
                    revenue: item.subtotal,
                }),
            }
        }
    }

    buckets.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    buckets
}

/// Per-day revenue over `[from, to]`, one entry per day, zero-filled.
pub fn daily_revenue(orders: &[Order], from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<DailyRevenue> {
    let mut series: Vec<DailyRevenue> = Vec::new();
    let mut day = from.date_naive();
    let last = to.date_naive();

    while day <= last {
        series.push(DailyRevenue {
            date: day,
            revenue: Money::zero(),
        });
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    for order in orders.iter().filter(|o| in_range(o, from, to)) {
        let date = order.created_at.date_naive();
        if let Some(point) = series.iter_mut().find(|p| p.date == date) {
            point.revenue += order.total;
        }
    }

    series
}

/// Products at or below their low-stock threshold.
pub fn low_stock_products(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.stock_status() != StockStatus::InStock)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderItem, PaymentMethod, PaymentStatus, Unit};
    use chrono::TimeZone;

    fn item(category: &str, subtotal: i64, profit: i64, qty: i64) -> OrderItem {
        OrderItem {
            product_id: "p1".to_string(),
            sku: "SKU-1".to_string(),
            name_en: "Test".to_string(),
            name_bn: "টেস্ট".to_string(),
            category: category.to_string(),
            unit: Unit::Pcs,
            unit_price: Money::from_minor(subtotal / qty.max(1)),
            unit_cost: Money::zero(),
            quantity: Quantity::from_whole(qty),
            subtotal: Money::from_minor(subtotal),
            profit: Money::from_minor(profit),
        }
    }

    fn order(day: u32, items: Vec<OrderItem>, due: i64) -> Order {
        let total: Money = items.iter().map(|i| i.subtotal).sum();
        let profit: Money = items.iter().map(|i| i.profit).sum();
        let amount_due = Money::from_minor(due);
        Order {
            id: format!("ORD-{day}"),
            items,
            subtotal: total,
            discount: Money::zero(),
            total,
            total_profit: profit,
            payment_method: PaymentMethod::Cash,
            cashier_id: "cashier_01".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 8, day, 10, 0, 0).unwrap(),
            payment_status: if due > 0 {
                PaymentStatus::Due
            } else {
                PaymentStatus::Paid
            },
            amount_paid: total - amount_due,
            amount_due,
            customer: None,
        }
    }

    fn range(from_day: u32, to_day: u32) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2026, 8, from_day, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 8, to_day, 23, 59, 59).unwrap(),
        )
    }

    #[test]
    fn test_sales_summary_filters_by_range() {
        let orders = vec![
            order(1, vec![item("Fruits", 10000, 3000, 2)], 0),
            order(5, vec![item("Dairy", 20000, 5000, 1)], 5000),
            order(20, vec![item("Fruits", 99000, 1000, 1)], 0),
        ];

        let (from, to) = range(1, 10);
        let summary = sales_summary(&orders, from, to);

        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.revenue, Money::from_minor(30000));
        assert_eq!(summary.profit, Money::from_minor(8000));
        assert_eq!(summary.items_sold, Quantity::from_whole(3));
        assert_eq!(summary.due_total, Money::from_minor(5000));
    }

    #[test]
    fn test_revenue_by_category_sorted_descending() {
        let orders = vec![
            order(1, vec![item("Fruits", 10000, 0, 1)], 0),
            order(
                2,
                vec![item("Dairy", 30000, 0, 1), item("Fruits", 5000, 0, 1)],
                0,
            ),
        ];

        let breakdown = revenue_by_category(&orders);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "Dairy");
        assert_eq!(breakdown[0].revenue, Money::from_minor(30000));
        assert_eq!(breakdown[1].category, "Fruits");
        assert_eq!(breakdown[1].revenue, Money::from_minor(15000));
    }

    #[test]
    fn test_daily_revenue_zero_fills() {
        let orders = vec![order(2, vec![item("Fruits", 10000, 0, 1)], 0)];
        let (from, to) = range(1, 3);

        let series = daily_revenue(&orders, from, to);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].revenue, Money::zero());
        assert_eq!(series[1].revenue, Money::from_minor(10000));
        assert_eq!(series[2].revenue, Money::zero());
    }
}
