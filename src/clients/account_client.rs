//! # Account Client
//!
//! Domain API over the Account actor: registration, lookups, profile edits and the
//! two ledger operations.

use crate::account_actor::{AccountError, LedgerAction};
use crate::model::{Account, AccountCreate, AccountId, AccountUpdate};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Account actor.
#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<Account>,
}

impl AccountClient {
    pub fn new(inner: ResourceClient<Account>) -> Self {
        Self { inner }
    }

    /// Creates an account. Fails with [`AccountError::EmailTaken`] on a duplicate email.
    #[instrument(skip(self))]
    pub async fn register(&self, params: AccountCreate) -> Result<Account, AccountError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Like [`ActorClient::get`], but a missing account is an error.
    #[instrument(skip(self))]
    pub async fn require(&self, id: AccountId) -> Result<Account, AccountError> {
        self.get(id)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let wanted = email.trim().to_lowercase();
        Ok(self.list().await?.into_iter().find(|a| a.email == wanted))
    }

    #[instrument(skip(self))]
    pub async fn update_account(
        &self,
        id: AccountId,
        update: AccountUpdate,
    ) -> Result<Account, AccountError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Adds `amount` and returns the new balance.
    #[instrument(skip(self))]
    pub async fn credit(&self, id: AccountId, amount: u64) -> Result<u64, AccountError> {
        self.inner
            .perform_action(id, LedgerAction::Credit(amount))
            .await
            .map_err(Self::map_error)
    }

    /// Removes `amount` if the balance covers it and returns the new balance.
    #[instrument(skip(self))]
    pub async fn debit(&self, id: AccountId, amount: u64) -> Result<u64, AccountError> {
        self.inner
            .perform_action(id, LedgerAction::Debit(amount))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Account> for AccountClient {
    type Error = AccountError;

    fn inner(&self) -> &ResourceClient<Account> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<AccountError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => AccountError::NotFound(id),
            Err(other) => AccountError::ActorCommunicationError(other.to_string()),
        }
    }
}
