//! # ActorEntity Trait
//!
//! The contract a domain type fulfils to be managed by [`ResourceActor`](crate::ResourceActor).
//! Associated types pin down the id, payloads, actions and the error of each resource, so a
//! product payload can never reach the account actor.
//!
//! Only [`from_create_params`](ActorEntity::from_create_params),
//! [`on_update`](ActorEntity::on_update) and [`handle_action`](ActorEntity::handle_action)
//! are required. The remaining hooks default to accepting everything.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A resource that can live inside a [`ResourceActor`](crate::ResourceActor).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier, generated by the actor from a monotonically increasing `u32`.
    ///
    /// `Ord` keeps the store in creation order, which list operations rely on.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload used to create a new instance.
    type Create: Send + Sync + Debug;

    /// Payload used to modify an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations beyond CRUD (e.g. `Debit`, `ReserveStock`).
    type Action: Send + Sync + Debug;

    /// Value returned by a successful action.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` when there are none.
    type Context: Send + Sync;

    /// One error enum per resource, covering every hook.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the entity from its generated id and creation payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Rejects `self` if it clashes with `other`, an already stored entity.
    ///
    /// Called on create and on update against every other entity in the store.
    fn check_conflict(&self, _other: &Self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Runs after construction and before the entity is stored.
    ///
    /// An error here discards the entity.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update to a working copy of the entity.
    async fn on_update(&mut self, update: Self::Update, ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Runs before the entity is removed. An error keeps the entity in place.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handles a custom action against a working copy of the entity.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
