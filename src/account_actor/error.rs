//! Error types for the Account actor.

use thiserror::Error;

/// Errors that can occur during account and ledger operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    /// The requested account was not found.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// Another account already uses this email address.
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// Ledger amounts must be strictly positive.
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: u64, available: u64 },

    #[error("Balance would overflow")]
    BalanceOverflow,

    #[error("Administrator accounts cannot be deleted")]
    AdminDeletion,

    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The account data provided is invalid.
    #[error("{0}")]
    Validation(String),

    /// Hashing or parsing a password hash failed.
    #[error("Credential error: {0}")]
    Credential(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
