//! [`ActorEntity`] implementation for [`Order`].
//!
//! `on_create` runs [`checkout`](super::checkout); the order is only stored if it
//! succeeds. After that the order changes solely through the admin transitions.

use super::{checkout, OrderError};
use crate::clients::{AccountClient, ProductClient};
use crate::model::{Order, OrderAction, OrderCreate, OrderId, OrderStatus, OrderUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = (AccountClient, ProductClient);
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        let address = &params.shipping_address;
        if address.address.trim().is_empty() || address.city.trim().is_empty() {
            return Err(OrderError::ValidationError(
                "Shipping address and city are required".to_string(),
            ));
        }
        Ok(Self {
            id,
            user: params.user,
            order_items: params.items,
            shipping_address: params.shipping_address,
            total_price: params.total_price,
            payment_method: params.payment_method,
            is_paid: false,
            paid_at: None,
            is_delivered: false,
            delivered_at: None,
            status: OrderStatus::Processing,
            created_at: Utc::now(),
        })
    }

    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), Self::Error> {
        let (accounts, products) = ctx;
        checkout::run(self, accounts, products).await
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &Self::Context) -> Result<(), Self::Error> {
        match update {}
    }

    /// Transitions keep their first timestamp when repeated.
    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &Self::Context,
    ) -> Result<Order, Self::Error> {
        match action {
            OrderAction::MarkPaid => {
                if !self.is_paid {
                    self.is_paid = true;
                    self.paid_at = Some(Utc::now());
                }
                if self.status != OrderStatus::Completed {
                    self.status = OrderStatus::Paid;
                }
            }
            OrderAction::MarkDelivered => {
                if !self.is_delivered {
                    self.is_delivered = true;
                    self.delivered_at = Some(Utc::now());
                }
                self.status = OrderStatus::Completed;
            }
        }
        Ok(self.clone())
    }
}
