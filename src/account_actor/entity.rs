//! [`ActorEntity`] implementation for [`Account`].

use super::{AccountError, LedgerAction};
use crate::model::{Account, AccountCreate, AccountId, AccountUpdate, Profile};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

pub(crate) fn normalize_email(email: &str) -> Result<String, AccountError> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
        }
        None => false,
    };
    if !valid || email.chars().any(char::is_whitespace) {
        return Err(AccountError::Validation(format!(
            "Invalid email address: {email}"
        )));
    }
    Ok(email)
}

fn normalize_name(name: &str) -> Result<String, AccountError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AccountError::Validation("Name is required".to_string()));
    }
    Ok(name.to_string())
}

#[async_trait]
impl ActorEntity for Account {
    type Id = AccountId;
    type Create = AccountCreate;
    type Update = AccountUpdate;
    type Action = LedgerAction;
    type ActionResult = u64;
    type Context = ();
    type Error = AccountError;

    /// New accounts start with an empty balance and profile.
    fn from_create_params(id: AccountId, params: AccountCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: normalize_name(&params.name)?,
            email: normalize_email(&params.email)?,
            password_hash: params.password_hash,
            is_admin: params.is_admin,
            balance: 0,
            profile: Profile::default(),
            created_at: Utc::now(),
        })
    }

    fn check_conflict(&self, other: &Self) -> Result<(), Self::Error> {
        if self.email == other.email {
            return Err(AccountError::EmailTaken(self.email.clone()));
        }
        Ok(())
    }

    async fn on_update(&mut self, update: AccountUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = normalize_name(&name)?;
        }
        if let Some(email) = update.email {
            self.email = normalize_email(&email)?;
        }
        if let Some(hash) = update.password_hash {
            self.password_hash = hash;
        }
        if let Some(is_admin) = update.is_admin {
            self.is_admin = is_admin;
        }
        if let Some(profile) = update.profile {
            self.profile.merge(profile);
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        if self.is_admin {
            return Err(AccountError::AdminDeletion);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: LedgerAction, _ctx: &()) -> Result<u64, Self::Error> {
        match action {
            LedgerAction::Credit(0) | LedgerAction::Debit(0) => Err(AccountError::InvalidAmount),
            LedgerAction::Credit(amount) => {
                self.balance = self
                    .balance
                    .checked_add(amount)
                    .ok_or(AccountError::BalanceOverflow)?;
                Ok(self.balance)
            }
            LedgerAction::Debit(amount) => {
                if amount > self.balance {
                    return Err(AccountError::InsufficientFunds {
                        requested: amount,
                        available: self.balance,
                    });
                }
                self.balance -= amount;
                Ok(self.balance)
            }
        }
    }
}
