//! Checkout: turns a submitted cart into a paid (or payable) order, or changes nothing.
//!
//! Steps, in order:
//!
//! 1. reject an empty cart
//! 2. load the buyer; for balance payments reject early if the balance is below the
//!    submitted total
//! 3. reserve stock line by line
//! 4. recompute the total from the reserved (authoritative) prices and require it to
//!    equal the submitted total
//! 5. for balance payments, debit the total in one conditional ledger action
//! 6. freeze the reservations into the order's line items
//!
//! Any failure after the first reservation releases every reservation made so far, so
//! a failed checkout leaves stock and balance exactly as it found them.

use crate::clients::{AccountClient, ProductClient};
use crate::model::{LineItem, Order, OrderStatus, PaymentMethod};
use crate::order_actor::OrderError;
use crate::product_actor::StockReservation;
use chrono::Utc;
use tracing::{error, info, instrument, warn};

impl From<StockReservation> for LineItem {
    fn from(r: StockReservation) -> Self {
        Self {
            product: r.product,
            name: r.name,
            price: r.price,
            image: r.image,
            qty: r.qty,
        }
    }
}

/// Stock taken during one checkout that has to be put back if it fails.
struct Reservations<'a> {
    products: &'a ProductClient,
    held: Vec<StockReservation>,
}

impl<'a> Reservations<'a> {
    fn new(products: &'a ProductClient) -> Self {
        Self {
            products,
            held: Vec::new(),
        }
    }

    async fn reserve(&mut self, item: &LineItem) -> Result<(), OrderError> {
        let reservation = self.products.reserve_stock(item.product, item.qty).await?;
        self.held.push(reservation);
        Ok(())
    }

    fn total(&self) -> Result<u64, OrderError> {
        self.held
            .iter()
            .try_fold(0u64, |sum, r| {
                r.price
                    .checked_mul(u64::from(r.qty))
                    .and_then(|line| sum.checked_add(line))
            })
            .ok_or_else(|| OrderError::ValidationError("Order total is too large".to_string()))
    }

    async fn rollback(self) {
        for r in self.held.iter().rev() {
            match self.products.release_stock(r.product, r.qty).await {
                Ok(level) => info!(product = %r.product, qty = r.qty, level, "Reservation released"),
                Err(e) => error!(product = %r.product, qty = r.qty, error = %e, "Failed to release reservation"),
            }
        }
    }
}

/// Executes checkout for a freshly built order.
///
/// On success the order carries authoritative line items, total and payment state.
#[instrument(skip_all, fields(order_id = %order.id, user = %order.user))]
pub(super) async fn run(
    order: &mut Order,
    accounts: &AccountClient,
    products: &ProductClient,
) -> Result<(), OrderError> {
    if order.order_items.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    let submitted = order.total_price;
    let by_balance = order.payment_method == PaymentMethod::Balance;

    let account = accounts.require(order.user).await?;
    if by_balance && account.balance < submitted {
        return Err(OrderError::InsufficientFunds {
            requested: submitted,
            available: account.balance,
        });
    }

    let mut reservations = Reservations::new(products);
    let charged = charge(order, accounts, &mut reservations, by_balance).await;
    let total = match charged {
        Ok(total) => total,
        Err(e) => {
            warn!(error = %e, "Checkout failed, releasing reservations");
            reservations.rollback().await;
            return Err(e);
        }
    };

    order.order_items = reservations.held.into_iter().map(LineItem::from).collect();
    order.total_price = total;
    if by_balance {
        order.is_paid = true;
        order.paid_at = Some(Utc::now());
        order.status = OrderStatus::Paid;
    } else {
        order.status = OrderStatus::Processing;
    }
    Ok(())
}

async fn charge(
    order: &Order,
    accounts: &AccountClient,
    reservations: &mut Reservations<'_>,
    by_balance: bool,
) -> Result<u64, OrderError> {
    for item in &order.order_items {
        reservations.reserve(item).await?;
    }

    let computed = reservations.total()?;
    if computed != order.total_price {
        return Err(OrderError::TotalMismatch {
            submitted: order.total_price,
            computed,
        });
    }

    if by_balance {
        let remaining = accounts.debit(order.user, computed).await?;
        info!(amount = computed, remaining, "Balance debited");
    }
    Ok(computed)
}
