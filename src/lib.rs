//! # Storefront
//!
//! REST backend of an online store: a product catalog, customer accounts with a stored
//! balance, checkout against that balance, and an admin surface for products, orders
//! and users.
//!
//! ## Architecture
//!
//! Each stored entity kind is owned by one [`ResourceActor`](actor_framework::ResourceActor)
//! task. An actor handles one message at a time, so every ledger or stock change is a
//! single conditional update ("subtract N if at least N is there").
//!
//! - **[`account_actor`]**: accounts and the balance ledger.
//! - **[`product_actor`]**: the catalog and stock reservations.
//! - **[`order_actor`]**: orders. Checkout runs inside the actor's `on_create` hook and
//!   releases every reservation it made if a later step fails.
//! - **[`clients`]**: typed wrappers around the actor channels.
//! - **[`lifecycle`]**: spawns and wires the actors; logging setup.
//! - **[`http`]**: the axum router, identity extractors and error rendering.
//!
//! Request flow: HTTP request → [`Caller`](auth::Caller) → typed command → client →
//! actor(s) → JSON response.
//!
//! ## Running
//!
//! ```bash
//! storefront --listen 0.0.0.0:5000 --admin-email admin@shop.io --admin-password secret1
//! ```

pub mod account_actor;
pub mod auth;
pub mod clients;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod media;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod reporting;
