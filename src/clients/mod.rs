//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient), one per
//! resource, each translating framework failures into the resource's own error.

pub mod account_client;
pub mod order_client;
pub mod product_client;

pub use account_client::*;
pub use order_client::*;
pub use product_client::*;
