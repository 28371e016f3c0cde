//! `/api/orders`: checkout, order reads and the admin transitions.

use super::extract::parse_id;
use super::{AdminCaller, ApiError, AppState, ValidJson};
use crate::auth::Caller;
use crate::model::{
    LineItem, Order, OrderCreate, OrderId, OrderOwners, OrderView, PaymentMethod, ProductId,
    ShippingAddress,
};
use crate::order_actor::OrderError;
use crate::reporting::StoreSummary;
use actor_framework::ActorClient;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

/// A cart line as the storefront submits it. Name, price and image are the client's
/// snapshot; checkout replaces them with the product's current values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: String,
    pub qty: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: u64,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub order_items: Vec<CartLine>,
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub total_price: u64,
}

impl CheckoutRequest {
    fn into_command(self, caller: &Caller) -> Result<OrderCreate, OrderError> {
        let items = self
            .order_items
            .into_iter()
            .map(|line| {
                let product: ProductId = line
                    .product
                    .parse()
                    .map_err(|_| OrderError::ProductNotFound(line.product.clone()))?;
                Ok(LineItem {
                    product,
                    name: line.name,
                    price: line.price,
                    image: line.image,
                    qty: line.qty,
                })
            })
            .collect::<Result<Vec<_>, OrderError>>()?;

        Ok(OrderCreate {
            user: caller.account_id,
            items,
            shipping_address: self.shipping_address,
            total_price: self.total_price,
            payment_method: self.payment_method,
        })
    }
}

pub async fn create_order(
    State(state): State<AppState>,
    caller: Caller,
    ValidJson(req): ValidJson<CheckoutRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let command = req.into_command(&caller)?;
    let order = state.orders.create_order(command).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn owners(state: &AppState) -> Result<OrderOwners, ApiError> {
    Ok(OrderOwners::new(&state.accounts.list().await?))
}

pub async fn get_order(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<OrderView>, ApiError> {
    let id: OrderId = parse_id(&id)?;
    let order = state.orders.get_order_for(&caller, id).await?;
    Ok(Json(owners(&state).await?.view(order)))
}

pub async fn my_orders(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.orders_for(caller.account_id).await?))
}

pub async fn list_orders(
    State(state): State<AppState>,
    _admin: AdminCaller,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    let orders = state.orders.list_newest_first().await?;
    Ok(Json(owners(&state).await?.view_all(orders)))
}

pub async fn summary(
    State(state): State<AppState>,
    _admin: AdminCaller,
) -> Result<Json<StoreSummary>, ApiError> {
    let orders = state.orders.list().await?;
    let products = state.products.list().await?;
    let accounts = state.accounts.list().await?;
    Ok(Json(StoreSummary::compute(&orders, &products, &accounts)))
}

pub async fn mark_paid(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let id: OrderId = parse_id(&id)?;
    Ok(Json(state.orders.mark_paid(id).await?))
}

/// Allowed whether or not the order has been paid.
pub async fn mark_delivered(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let id: OrderId = parse_id(&id)?;
    Ok(Json(state.orders.mark_delivered(id).await?))
}

/// Removes the record only; stock and balance stay as they are.
pub async fn delete_order(
    State(state): State<AppState>,
    AdminCaller(admin): AdminCaller,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id: OrderId = parse_id(&id)?;
    state.orders.delete(id).await?;
    info!(admin = %admin.account_id, order = %id, "Order deleted");
    Ok(Json(json!({ "message": "Order removed" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::model::AccountId;

    fn caller() -> Caller {
        Caller {
            account_id: AccountId(3),
            role: Role::Customer,
        }
    }

    #[test]
    fn test_checkout_request_becomes_command() {
        let req: CheckoutRequest = serde_json::from_value(json!({
            "orderItems": [{ "product": "product_2", "qty": 2, "name": "Lamp", "price": 150 }],
            "shippingAddress": { "address": "1 Main St", "city": "Lisbon" },
            "totalPrice": 300
        }))
        .unwrap();

        let command = req.into_command(&caller()).unwrap();
        assert_eq!(command.user, AccountId(3));
        assert_eq!(command.payment_method, PaymentMethod::Balance);
        assert_eq!(command.items[0].product, ProductId(2));
        assert_eq!(command.items[0].qty, 2);
        assert_eq!(command.total_price, 300);
    }

    #[test]
    fn test_unparseable_product_is_not_found() {
        let req: CheckoutRequest = serde_json::from_value(json!({
            "orderItems": [{ "product": "banana", "qty": 1 }],
            "shippingAddress": { "address": "1 Main St", "city": "Lisbon" },
            "paymentMethod": "Card",
            "totalPrice": 10
        }))
        .unwrap();

        let err = req.into_command(&caller()).unwrap_err();
        assert_eq!(err, OrderError::ProductNotFound("banana".into()));
    }
}
