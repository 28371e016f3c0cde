//! # Order Client
//!
//! Provides a high-level API for interacting with the `Order` actor.
//! Checkout itself runs inside the actor's `on_create` hook; this client adds the
//! access rules and the read views used by the storefront and the admin console.

use crate::auth::Caller;
use crate::model::{AccountId, Order, OrderAction, OrderCreate, OrderId};
use crate::order_actor::OrderError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Runs checkout and returns the persisted order.
    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("create_order called");
        let order = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %order.id, total = order.total_price, "Order placed");
        Ok(order)
    }

    /// Like [`ActorClient::get`], but a missing order is an error.
    #[instrument(skip(self))]
    pub async fn require(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Fetches an order on behalf of `caller`: its owner or an administrator.
    #[instrument(skip(self))]
    pub async fn get_order_for(&self, caller: &Caller, id: OrderId) -> Result<Order, OrderError> {
        let order = self.require(id).await?;
        if !caller.is_admin() && !order.is_owned_by(caller.account_id) {
            return Err(OrderError::Forbidden);
        }
        Ok(order)
    }

    /// All orders, most recent first.
    #[instrument(skip(self))]
    pub async fn list_newest_first(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list().await?;
        orders.reverse();
        Ok(orders)
    }

    /// Orders placed by one account, most recent first.
    #[instrument(skip(self))]
    pub async fn orders_for(&self, account: AccountId) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list_newest_first().await?;
        orders.retain(|o| o.is_owned_by(account));
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn mark_paid(&self, id: OrderId) -> Result<Order, OrderError> {
        self.inner
            .perform_action(id, OrderAction::MarkPaid)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn mark_delivered(&self, id: OrderId) -> Result<Order, OrderError> {
        self.inner
            .perform_action(id, OrderAction::MarkDelivered)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<OrderError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
