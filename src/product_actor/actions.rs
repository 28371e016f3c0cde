//! Inventory actions for the Product actor.
//!
//! Handled by [`ActorEntity::handle_action`](actor_framework::ActorEntity::handle_action);
//! see the implementation on [`Product`](crate::model::Product).

use crate::model::ProductId;

/// Stock operations beyond plain CRUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAction {
    /// Reads the current stock level.
    CheckStock,
    /// Takes `n` units out of stock for a checkout.
    ///
    /// # Errors
    /// Fails if `n` is zero, exceeds the stock, or the product is an unpriced draft.
    ReserveStock(u32),
    /// Puts `n` previously reserved units back.
    ReleaseStock(u32),
}

/// Results from [`ProductAction`]; variants match 1:1.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    CheckStock(u32),
    ReserveStock(StockReservation),
    ReleaseStock(u32),
}

/// The authoritative product data captured when stock is reserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockReservation {
    pub product: ProductId,
    pub name: String,
    pub price: u64,
    pub image: String,
    pub qty: u32,
    pub remaining: u32,
}
