//! # Order Actor
//!
//! Orders and the checkout workflow.
//!
//! The actor's context is `(AccountClient, ProductClient)`, injected through
//! [`ResourceActor::run`](actor_framework::ResourceActor::run) so the three actors can
//! be created before they are wired together.
//!
//! Checkout runs inside `on_create`, and the actor handles one message at a time.
//! Every order read (`myorders`, `GET /orders/:id`, the admin list and summary)
//! therefore queues behind any checkout in flight, and checkouts themselves run one
//! after another, so throughput is bounded by the slowest checkout. No read observes
//! a half-finished order.

mod checkout;
pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Order;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
