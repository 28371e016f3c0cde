//! # Product Actor
//!
//! Catalog entries and their inventory.
//!
//! - [`entity`] - hooks: field validation, image cleanup, stock actions
//! - [`actions`] - [`ProductAction`] / [`ProductActionResult`]
//! - [`error`] - [`ProductError`]
//!
//! ```rust,ignore
//! let stock = product_client.check_stock(product_id).await?;
//! let reservation = product_client.reserve_stock(product_id, 2).await?;
//! product_client.release_stock(product_id, 2).await?;
//! ```
//!
//! Reservations are single actor messages: the stock check and the decrement cannot be
//! separated by another request, so stock never goes negative.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
