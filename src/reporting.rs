//! The admin dashboard summary, computed from scratch on every request.

use crate::model::{Account, Order, OrderOwners, OrderView, Product, ProductId};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const SALES_DAYS: usize = 15;
pub const TOP_PRODUCTS: usize = 5;
pub const LATEST_ORDERS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub num_orders: usize,
    pub num_users: usize,
    pub num_products: usize,
    pub total_sales: u64,
    pub sales_data: Vec<DailySales>,
    pub category_data: Vec<CategoryCount>,
    pub top_products: Vec<TopProduct>,
    pub latest_orders: Vec<OrderView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    pub date: NaiveDate,
    pub total_sales: u64,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product: ProductId,
    pub name: String,
    pub qty_sold: u64,
    pub revenue: u64,
}

impl StoreSummary {
    /// `orders` and `products` are expected in creation order.
    pub fn compute(orders: &[Order], products: &[Product], accounts: &[Account]) -> Self {
        let total_sales = orders
            .iter()
            .fold(0u64, |sum, o| sum.saturating_add(o.total_price));

        Self {
            num_orders: orders.len(),
            num_users: accounts.len(),
            num_products: products.len(),
            total_sales,
            sales_data: daily_sales(orders),
            category_data: category_counts(orders, products),
            top_products: top_products(orders),
            latest_orders: OrderOwners::new(accounts)
                .view_all(orders.iter().rev().take(LATEST_ORDERS).cloned().collect()),
        }
    }
}

/// The most recent days with sales, oldest first.
fn daily_sales(orders: &[Order]) -> Vec<DailySales> {
    let mut days: BTreeMap<NaiveDate, DailySales> = BTreeMap::new();
    for order in orders {
        let date = order.created_at.date_naive();
        let day = days.entry(date).or_insert(DailySales {
            date,
            total_sales: 0,
            orders: 0,
        });
        day.total_sales = day.total_sales.saturating_add(order.total_price);
        day.orders += 1;
    }
    let skip = days.len().saturating_sub(SALES_DAYS);
    days.into_values().skip(skip).collect()
}

/// Units sold per category of the products as they are now.
///
/// Line items whose product has since been deleted are left out.
fn category_counts(orders: &[Order], products: &[Product]) -> Vec<CategoryCount> {
    let category_of: HashMap<ProductId, &str> = products
        .iter()
        .map(|p| (p.id, p.category.as_str()))
        .collect();

    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for item in orders.iter().flat_map(|o| &o.order_items) {
        if let Some(category) = category_of.get(&item.product) {
            *counts.entry(*category).or_default() += u64::from(item.qty);
        }
    }

    let mut data: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    data.sort_by(|a, b| b.count.cmp(&a.count));
    data
}

fn top_products(orders: &[Order]) -> Vec<TopProduct> {
    let mut sold: BTreeMap<ProductId, TopProduct> = BTreeMap::new();
    for item in orders.iter().flat_map(|o| &o.order_items) {
        let entry = sold.entry(item.product).or_insert_with(|| TopProduct {
            product: item.product,
            name: item.name.clone(),
            qty_sold: 0,
            revenue: 0,
        });
        entry.qty_sold += u64::from(item.qty);
        entry.revenue = entry
            .revenue
            .saturating_add(item.subtotal().unwrap_or(u64::MAX));
    }

    let mut ranked: Vec<TopProduct> = sold.into_values().collect();
    ranked.sort_by(|a, b| b.qty_sold.cmp(&a.qty_sold));
    ranked.truncate(TOP_PRODUCTS);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AccountId, LineItem, OrderId, OrderStatus, PaymentMethod, Profile, ShippingAddress,
        PLACEHOLDER_IMAGE,
    };
    use chrono::{Duration, TimeZone, Utc};

    fn product(id: u32, category: &str) -> Product {
        Product {
            id: ProductId(id),
            name: format!("Product {id}"),
            price: 100,
            count_in_stock: 10,
            category: category.to_string(),
            brand: "Brand".to_string(),
            description: String::new(),
            image: PLACEHOLDER_IMAGE.to_string(),
            created_at: Utc::now(),
        }
    }

    fn account(id: u32) -> Account {
        Account {
            id: AccountId(id),
            name: format!("Customer {id}"),
            email: format!("customer{id}@shop.io"),
            password_hash: String::new(),
            is_admin: false,
            balance: 0,
            profile: Profile::default(),
            created_at: Utc::now(),
        }
    }

    fn order(id: u32, day_offset: i64, items: &[(u32, u32)]) -> Order {
        let order_items: Vec<LineItem> = items
            .iter()
            .map(|&(product, qty)| LineItem {
                product: ProductId(product),
                name: format!("Product {product}"),
                price: 100,
                image: PLACEHOLDER_IMAGE.to_string(),
                qty,
            })
            .collect();
        let total_price = order_items.iter().filter_map(LineItem::subtotal).sum();
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Order {
            id: OrderId(id),
            user: AccountId(1),
            order_items,
            shipping_address: ShippingAddress::default(),
            total_price,
            payment_method: PaymentMethod::Balance,
            is_paid: true,
            paid_at: None,
            is_delivered: false,
            delivered_at: None,
            status: OrderStatus::Paid,
            created_at: start + Duration::days(day_offset),
        }
    }

    #[test]
    fn test_empty_store() {
        let summary = StoreSummary::compute(&[], &[], &[]);
        assert_eq!(summary.total_sales, 0);
        assert!(summary.sales_data.is_empty());
        assert!(summary.latest_orders.is_empty());
    }

    #[test]
    fn test_counts_and_rankings() {
        let products = vec![product(1, "Shoes"), product(2, "Socks"), product(3, "Shoes")];
        let orders = vec![
            order(1, 0, &[(1, 2), (2, 1)]),
            order(2, 0, &[(2, 5)]),
            order(3, 1, &[(3, 1), (9, 4)]),
        ];

        let accounts: Vec<Account> = (1..=4).map(account).collect();
        let summary = StoreSummary::compute(&orders, &products, &accounts);
        assert_eq!(summary.num_orders, 3);
        assert_eq!(summary.num_users, 4);
        assert_eq!(summary.num_products, 3);
        assert_eq!(summary.total_sales, 1300);

        assert_eq!(summary.sales_data.len(), 2);
        assert_eq!(summary.sales_data[0].total_sales, 800);
        assert_eq!(summary.sales_data[0].orders, 2);

        // Product 9 no longer exists and is skipped.
        assert_eq!(
            summary.category_data,
            vec![
                CategoryCount {
                    category: "Socks".into(),
                    count: 6
                },
                CategoryCount {
                    category: "Shoes".into(),
                    count: 3
                },
            ]
        );

        assert_eq!(summary.top_products[0].product, ProductId(2));
        assert_eq!(summary.top_products[0].qty_sold, 6);
        assert_eq!(summary.top_products[1].product, ProductId(9));

        let latest: Vec<OrderId> = summary.latest_orders.iter().map(|o| o.id).collect();
        assert_eq!(latest, [OrderId(3), OrderId(2), OrderId(1)]);
        let buyer = summary.latest_orders[0].user.as_ref().unwrap();
        assert_eq!(buyer.name, "Customer 1");
        assert_eq!(buyer.email, "customer1@shop.io");
    }

    #[test]
    fn test_latest_orders_of_deleted_buyers_have_no_user() {
        let orders = vec![order(1, 0, &[(1, 1)])];
        let summary = StoreSummary::compute(&orders, &[], &[account(2)]);

        assert_eq!(summary.num_users, 1);
        assert!(summary.latest_orders[0].user.is_none());
    }

    #[test]
    fn test_sales_data_keeps_recent_days_ascending() {
        let orders: Vec<Order> = (0..20).map(|i| order(i + 1, i64::from(i), &[(1, 1)])).collect();
        let summary = StoreSummary::compute(&orders, &[], &[account(1)]);

        assert_eq!(summary.sales_data.len(), SALES_DAYS);
        let first = summary.sales_data.first().unwrap().date;
        let last = summary.sales_data.last().unwrap().date;
        assert!(first < last);
        assert_eq!(last, orders.last().unwrap().created_at.date_naive());
        assert_eq!(summary.latest_orders.len(), LATEST_ORDERS);
    }
}
