//! # Account Actor
//!
//! Owns every [`Account`] and its stored balance.
//!
//! - [`entity`] - hooks: field validation, unique emails, protection of administrators
//! - [`actions`] - [`LedgerAction`] credit and debit
//! - [`error`] - [`AccountError`]
//!
//! Balances are only changed through ledger actions, each handled as one actor
//! message, so concurrent debits can never take a balance below zero.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Account;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Account actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Account>, ResourceClient<Account>) {
    ResourceActor::new(buffer_size)
}
