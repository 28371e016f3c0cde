//! Error types for the Product actor.

use crate::model::ProductId;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock for {name}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductId,
        name: String,
        requested: u32,
        available: u32,
    },

    /// Zero-unit reservations and releases are rejected.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The product has no price yet.
    #[error("{0} is not available for purchase")]
    NotForSale(String),

    #[error("Price must be greater than zero")]
    InvalidPrice,

    #[error("Stock would overflow")]
    StockOverflow,

    /// The product data provided is invalid.
    #[error("{0}")]
    Validation(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
