//! Error types for the Order actor.

use crate::account_actor::AccountError;
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur during checkout and order administration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("No order items")]
    EmptyCart,

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Insufficient balance: order total {requested}, available {available}")]
    InsufficientFunds { requested: u64, available: u64 },

    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u32,
        available: u32,
    },

    /// The product is an unpriced draft.
    #[error("{0} is not available for purchase")]
    ProductUnavailable(String),

    #[error("Order total mismatch: submitted {submitted}, computed {computed}")]
    TotalMismatch { submitted: u64, computed: u64 },

    /// The caller may not see or change this order.
    #[error("Not authorized to access this order")]
    Forbidden,

    /// The order data provided is invalid.
    #[error("{0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<ProductError> for OrderError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => OrderError::ProductNotFound(id),
            ProductError::InsufficientStock {
                name,
                requested,
                available,
                ..
            } => OrderError::InsufficientStock {
                product: name,
                requested,
                available,
            },
            ProductError::NotForSale(name) => OrderError::ProductUnavailable(name),
            ProductError::InvalidQuantity(_) => {
                OrderError::ValidationError("Quantity must be at least 1".to_string())
            }
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<AccountError> for OrderError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::NotFound(id) => OrderError::AccountNotFound(id),
            AccountError::InsufficientFunds {
                requested,
                available,
            } => OrderError::InsufficientFunds {
                requested,
                available,
            },
            AccountError::InvalidAmount => {
                OrderError::ValidationError("Order total must be greater than zero".to_string())
            }
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
