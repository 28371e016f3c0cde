use super::{Account, AccountId, OrderId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A placed order.
///
/// Line items and the shipping address are snapshots taken at checkout; later edits to
/// products never reach them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user: AccountId,
    pub order_items: Vec<LineItem>,
    pub shipping_address: ShippingAddress,
    /// Minor currency units.
    pub total_price: u64,
    pub payment_method: PaymentMethod,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub is_delivered: bool,
    pub delivered_at: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn is_owned_by(&self, account: AccountId) -> bool {
        self.user == account
    }
}

/// The buyer shown next to an order on the admin screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderOwner {
    pub id: AccountId,
    pub name: String,
    pub email: String,
}

impl From<&Account> for OrderOwner {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
        }
    }
}

/// Buyers by id, built once per request from the account list.
#[derive(Debug, Clone, Default)]
pub struct OrderOwners(HashMap<AccountId, OrderOwner>);

impl OrderOwners {
    pub fn new(accounts: &[Account]) -> Self {
        Self(accounts.iter().map(|a| (a.id, OrderOwner::from(a))).collect())
    }

    pub fn view(&self, order: Order) -> OrderView {
        let owner = self.0.get(&order.user).cloned();
        OrderView::new(order, owner)
    }

    pub fn view_all(&self, orders: Vec<Order>) -> Vec<OrderView> {
        orders.into_iter().map(|o| self.view(o)).collect()
    }
}

/// An order with its buyer filled in.
///
/// `user` is `null` once the buyer's account has been deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: OrderId,
    pub user: Option<OrderOwner>,
    pub order_items: Vec<LineItem>,
    pub shipping_address: ShippingAddress,
    pub total_price: u64,
    pub payment_method: PaymentMethod,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub is_delivered: bool,
    pub delivered_at: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderView {
    pub fn new(order: Order, user: Option<OrderOwner>) -> Self {
        Self {
            id: order.id,
            user,
            order_items: order.order_items,
            shipping_address: order.shipping_address,
            total_price: order.total_price,
            payment_method: order.payment_method,
            is_paid: order.is_paid,
            paid_at: order.paid_at,
            is_delivered: order.is_delivered,
            delivered_at: order.delivered_at,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product: ProductId,
    pub name: String,
    pub price: u64,
    pub image: String,
    pub qty: u32,
}

impl LineItem {
    /// `price * qty`, or `None` on overflow.
    pub fn subtotal(&self) -> Option<u64> {
        self.price.checked_mul(u64::from(self.qty))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Debited from the stored account balance at checkout.
    #[default]
    #[serde(alias = "balance")]
    Balance,
    /// Settled outside the store; an administrator marks the order paid.
    #[serde(alias = "card")]
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Paid,
    Completed,
}

/// Checkout request as seen by the order actor.
///
/// `items` carry the client's view of name, price and image; checkout replaces them
/// with authoritative values. `total_price` is the total the client agreed to pay.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user: AccountId,
    pub items: Vec<LineItem>,
    pub shipping_address: ShippingAddress,
    pub total_price: u64,
    pub payment_method: PaymentMethod,
}

/// Orders are never edited field by field; state moves only through [`OrderAction`].
#[derive(Debug, Clone)]
pub enum OrderUpdate {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    MarkPaid,
    MarkDelivered,
}
