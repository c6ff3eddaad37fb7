//! Daily sales aggregation
//!
//! A pure projection over the day's settled orders: total revenue, order
//! count, payment-method split, top sellers and the hourly histogram.
//! Recomputing over the same input always yields the same output.

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::models::{DailySales, HourlyBucket, ItemSales, PaymentMethodTotals};
use shared::{OrderStatus, PaymentMethod};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::Order;
use crate::db::repository::{OrderRepository, RepoResult};
use crate::orders::money;
use crate::utils::time;

/// Summarize one business day from a set of paid orders
///
/// Orders outside `[day start, next day start)` in the business timezone
/// are ignored, as is anything not yet paid, so the full order set can be
/// passed as-is.
pub fn summarize_day(date: NaiveDate, tz: Tz, orders: &[Order]) -> DailySales {
    let start = time::day_start_millis(date, tz);
    let end = time::day_end_millis(date, tz);

    let day_orders: Vec<&Order> = orders
        .iter()
        .filter(|order| order.status == OrderStatus::Paid)
        .filter(|order| {
            order
                .paid_date
                .map(|paid| paid >= start && paid < end)
                .unwrap_or(false)
        })
        .collect();

    let total_revenue: Decimal = day_orders.iter().map(|order| money::dec(order.total)).sum();

    // Payment split: only the recognized methods get a bucket
    let mut cash = Decimal::ZERO;
    let mut transfer = Decimal::ZERO;
    for order in &day_orders {
        match order.payment_method {
            Some(PaymentMethod::Cash) => cash += money::dec(order.total),
            Some(PaymentMethod::Transfer) => transfer += money::dec(order.total),
            None => {}
        }
    }

    DailySales {
        date: date.format("%Y-%m-%d").to_string(),
        total_revenue: money::to_amount(total_revenue),
        order_count: day_orders.len() as i32,
        by_payment_method: PaymentMethodTotals {
            cash: money::to_amount(cash),
            transfer: money::to_amount(transfer),
        },
        top_selling_items: top_selling_items(&day_orders),
        hourly_revenue: hourly_revenue(&day_orders, tz),
    }
}

/// Accumulate per-item quantity and revenue, keyed by item name
///
/// Keyed by name, not id: two catalog entries that share a name merge into
/// one row. Sorted by revenue descending; ties keep first-seen order
/// (stable sort); truncated to the top 10.
fn top_selling_items(orders: &[&Order]) -> Vec<ItemSales> {
    let mut stats: Vec<(String, i32, Decimal)> = Vec::new();
    for order in orders {
        for line in &order.items {
            let revenue = money::line_total(line.price, line.quantity);
            match stats.iter_mut().find(|(name, _, _)| *name == line.name) {
                Some((_, quantity, total)) => {
                    *quantity += line.quantity;
                    *total += revenue;
                }
                None => stats.push((line.name.clone(), line.quantity, revenue)),
            }
        }
    }

    stats.sort_by(|a, b| b.2.cmp(&a.2));
    stats.truncate(10);
    stats
        .into_iter()
        .map(|(name, quantity, revenue)| ItemSales {
            name,
            quantity,
            revenue: money::to_amount(revenue),
        })
        .collect()
}

/// Bucket revenue by hour-of-day in the business timezone
///
/// Hours without a settled order are omitted; consumers needing a dense
/// 0-23 series fill the gaps themselves.
fn hourly_revenue(orders: &[&Order], tz: Tz) -> Vec<HourlyBucket> {
    let mut amounts = [Decimal::ZERO; 24];
    let mut counts = [0i32; 24];

    for order in orders {
        let Some(paid) = order.paid_date else { continue };
        let hour = time::hour_of_day(paid, tz) as usize;
        amounts[hour] += money::dec(order.total);
        counts[hour] += 1;
    }

    (0..24)
        .filter(|&hour| counts[hour] > 0)
        .map(|hour| HourlyBucket {
            hour: hour as u32,
            amount: money::to_amount(amounts[hour]),
            count: counts[hour],
        })
        .collect()
}

/// Daily sales over the persisted order set
pub struct SalesService {
    orders: OrderRepository,
    tz: Tz,
}

impl SalesService {
    pub fn new(db: Surreal<Db>, tz: Tz) -> Self {
        Self {
            orders: OrderRepository::new(db),
            tz,
        }
    }

    /// Fetch the day's settled orders and summarize them
    pub async fn daily(&self, date: NaiveDate) -> RepoResult<DailySales> {
        let start = time::day_start_millis(date, self.tz);
        let end = time::day_end_millis(date, self.tz);
        let orders = self.orders.find_paid_between(start, end).await?;
        Ok(summarize_day(date, self.tz, &orders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::OrderLine;

    const BANGKOK: Tz = chrono_tz::Asia::Bangkok;

    fn line(name: &str, price: f64, quantity: i32) -> OrderLine {
        OrderLine {
            menu_item_id: format!("menu_item:{}", name.to_lowercase().replace(' ', "-")),
            name: name.to_string(),
            price,
            quantity,
            note: None,
        }
    }

    fn paid_order(
        items: Vec<OrderLine>,
        total: f64,
        method: PaymentMethod,
        date: NaiveDate,
        hour: u32,
        min: u32,
    ) -> Order {
        Order {
            id: None,
            table_id: "floor_table:t1".into(),
            table_number: "A1".into(),
            items,
            total,
            status: OrderStatus::Paid,
            payment_method: Some(method),
            paid_date: Some(time::date_hms_to_millis(date, hour, min, 0, BANGKOK)),
            created_at: 0,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_daily_summary_totals_and_buckets() {
        let orders = vec![
            paid_order(
                vec![line("Pad Thai", 50.0, 2)],
                100.0,
                PaymentMethod::Cash,
                day(),
                10,
                15,
            ),
            paid_order(
                vec![line("Green Curry", 50.0, 1)],
                50.0,
                PaymentMethod::Transfer,
                day(),
                14,
                40,
            ),
        ];

        let sales = summarize_day(day(), BANGKOK, &orders);

        assert_eq!(sales.total_revenue, 150.0);
        assert_eq!(sales.order_count, 2);
        assert_eq!(sales.by_payment_method.cash, 100.0);
        assert_eq!(sales.by_payment_method.transfer, 50.0);

        assert_eq!(sales.hourly_revenue.len(), 2);
        assert_eq!(sales.hourly_revenue[0].hour, 10);
        assert_eq!(sales.hourly_revenue[0].amount, 100.0);
        assert_eq!(sales.hourly_revenue[0].count, 1);
        assert_eq!(sales.hourly_revenue[1].hour, 14);
        assert_eq!(sales.hourly_revenue[1].amount, 50.0);
        assert_eq!(sales.hourly_revenue[1].count, 1);
    }

    #[test]
    fn test_orders_outside_day_are_excluded() {
        let other_day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let orders = vec![
            paid_order(vec![], 100.0, PaymentMethod::Cash, day(), 12, 0),
            paid_order(vec![], 999.0, PaymentMethod::Cash, other_day, 12, 0),
        ];

        let sales = summarize_day(day(), BANGKOK, &orders);
        assert_eq!(sales.total_revenue, 100.0);
        assert_eq!(sales.order_count, 1);
    }

    #[test]
    fn test_top_items_merge_by_name_across_orders() {
        let orders = vec![
            paid_order(
                vec![line("Pad Thai", 60.0, 2)],
                120.0,
                PaymentMethod::Cash,
                day(),
                11,
                0,
            ),
            paid_order(
                vec![line("Pad Thai", 60.0, 2)],
                120.0,
                PaymentMethod::Cash,
                day(),
                12,
                0,
            ),
        ];

        let sales = summarize_day(day(), BANGKOK, &orders);
        assert_eq!(sales.top_selling_items.len(), 1);
        assert_eq!(sales.top_selling_items[0].name, "Pad Thai");
        assert_eq!(sales.top_selling_items[0].quantity, 4);
        assert_eq!(sales.top_selling_items[0].revenue, 240.0);
    }

    #[test]
    fn test_top_items_sorted_by_revenue_capped_at_ten() {
        let items: Vec<OrderLine> = (0..12)
            .map(|i| line(&format!("Dish {}", i), (i + 1) as f64, 1))
            .collect();
        let orders = vec![paid_order(items, 78.0, PaymentMethod::Cash, day(), 18, 0)];

        let sales = summarize_day(day(), BANGKOK, &orders);
        assert_eq!(sales.top_selling_items.len(), 10);
        assert_eq!(sales.top_selling_items[0].name, "Dish 11");
        assert!(
            sales
                .top_selling_items
                .windows(2)
                .all(|pair| pair[0].revenue >= pair[1].revenue)
        );
    }

    #[test]
    fn test_empty_day_is_zeroed() {
        let sales = summarize_day(day(), BANGKOK, &[]);
        assert_eq!(sales.total_revenue, 0.0);
        assert_eq!(sales.order_count, 0);
        assert_eq!(sales.by_payment_method, PaymentMethodTotals::default());
        assert!(sales.top_selling_items.is_empty());
        assert!(sales.hourly_revenue.is_empty());
    }

    #[test]
    fn test_summary_is_idempotent() {
        let orders = vec![paid_order(
            vec![line("Pad Thai", 60.0, 2)],
            120.0,
            PaymentMethod::Cash,
            day(),
            10,
            15,
        )];

        let first = summarize_day(day(), BANGKOK, &orders);
        let second = summarize_day(day(), BANGKOK, &orders);
        assert_eq!(first, second);
    }
}
