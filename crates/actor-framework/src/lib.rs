//! # Actor Framework
//!
//! Building blocks for resource actors: one Tokio task per resource kind, owning an
//! in-memory store and handling CRUD, listing and custom actions strictly one message
//! at a time.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]) - the domain type, its payloads and lifecycle hooks.
//! 2. **Runtime** ([`ResourceActor`]) - the message loop that owns the store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]) - typed, cloneable handles.
//!
//! ## Consistency
//!
//! Because an actor drains its mailbox sequentially, every hook runs with exclusive
//! access to the store. Updates and actions operate on a working copy of the entity
//! which is written back only when the hook returns `Ok`, so a rejected operation
//! never leaves a half-applied change behind. Uniqueness rules that span entities
//! (for example a unique email) are expressed through [`ActorEntity::check_conflict`]
//! and enforced by the actor on every create and update.
//!
//! ## Context injection
//!
//! Dependencies are handed to [`ResourceActor::run`] rather than to the constructor, so
//! actors can be created first and wired afterwards:
//!
//! ```rust,ignore
//! let (account_actor, accounts) = ResourceActor::<Account>::new(32);
//! let (product_actor, products) = ResourceActor::<Product>::new(32);
//! let (order_actor, orders) = ResourceActor::<Order>::new(32);
//!
//! tokio::spawn(account_actor.run(()));
//! tokio::spawn(product_actor.run(media));
//! tokio::spawn(order_actor.run((accounts.clone(), products.clone())));
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations, which makes it
//! possible to run a real actor against scripted dependencies.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
