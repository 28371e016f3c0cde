//! # Product Client
//!
//! Provides a high-level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes catalog and inventory methods.

use crate::model::{CatalogPage, CatalogQuery, Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError, StockReservation};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<ProductError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Like [`ActorClient::get`], but a missing product is an error.
    #[instrument(skip(self))]
    pub async fn require(&self, id: ProductId) -> Result<Product, ProductError> {
        self.get(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// One page of the storefront listing.
    #[instrument(skip(self))]
    pub async fn catalog(&self, query: &CatalogQuery) -> Result<CatalogPage, ProductError> {
        Ok(query.apply(self.list().await?))
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock for product {}", id);
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Takes `qty` units out of stock and returns the product data at that moment.
    #[instrument(skip(self))]
    pub async fn reserve_stock(
        &self,
        id: ProductId,
        qty: u32,
    ) -> Result<StockReservation, ProductError> {
        debug!("Reserving {} units for product {}", qty, id);
        match self
            .inner
            .perform_action(id, ProductAction::ReserveStock(qty))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::ReserveStock(reservation) => Ok(reservation),
            other => Err(unexpected(other)),
        }
    }

    /// Returns `qty` previously reserved units to stock.
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: ProductId, qty: u32) -> Result<u32, ProductError> {
        debug!("Releasing {} units for product {}", qty, id);
        match self
            .inner
            .perform_action(id, ProductAction::ReleaseStock(qty))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::ReleaseStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_check_stock_returns_correct_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let check_task =
            tokio::spawn(async move { product_client.check_stock(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");

        assert_eq!(id, ProductId(1));
        assert_eq!(action, ProductAction::CheckStock);

        responder
            .send(Ok(ProductActionResult::CheckStock(42)))
            .unwrap();

        assert_eq!(check_task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_reserve_stock_insufficient_stock() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task =
            tokio::spawn(async move { product_client.reserve_stock(ProductId(1), 100).await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(action, ProductAction::ReserveStock(100));

        let refusal = ProductError::InsufficientStock {
            product: ProductId(1),
            name: "Trail Shoe".into(),
            requested: 100,
            available: 3,
        };
        responder
            .send(Err(FrameworkError::EntityError(Box::new(refusal.clone()))))
            .unwrap();

        assert_eq!(reserve_task.await.unwrap(), Err(refusal));
    }

    #[tokio::test]
    async fn test_mismatched_result_is_an_error_not_a_panic() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let release_task =
            tokio::spawn(async move { product_client.release_stock(ProductId(1), 1).await });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder
            .send(Ok(ProductActionResult::CheckStock(1)))
            .unwrap();

        assert!(matches!(
            release_task.await.unwrap(),
            Err(ProductError::ActorCommunicationError(_))
        ));
    }
}
