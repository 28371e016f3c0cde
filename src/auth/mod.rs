//! Request identity.
//!
//! A bearer token resolves to an account once per request; the result is a [`Caller`]
//! that is handed explicitly to every operation that depends on who is asking.

pub mod password;
pub mod session;

pub use session::SessionStore;

use crate::account_actor::AccountError;
use crate::clients::AccountClient;
use crate::model::{Account, AccountCreate, AccountId, AccountUpdate};
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Admin,
}

/// The authenticated identity behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub account_id: AccountId,
    pub role: Role,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&Account> for Caller {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            role: if account.is_admin {
                Role::Admin
            } else {
                Role::Customer
            },
        }
    }
}

/// Checks an email and password pair.
///
/// Unknown emails and wrong passwords produce the same error.
#[instrument(skip(accounts, password))]
pub async fn login(
    accounts: &AccountClient,
    email: &str,
    password: &str,
) -> Result<Account, AccountError> {
    let account = accounts
        .find_by_email(email)
        .await?
        .ok_or(AccountError::InvalidCredentials)?;
    if !password::verify_password(password, &account.password_hash) {
        return Err(AccountError::InvalidCredentials);
    }
    Ok(account)
}

/// Registers a customer account from a plaintext password.
#[instrument(skip(accounts, password))]
pub async fn register(
    accounts: &AccountClient,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Account, AccountError> {
    let password_hash = password::hash_password(password)?;
    accounts
        .register(AccountCreate {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            is_admin: false,
        })
        .await
}

/// Makes sure an administrator with this email exists, promoting an existing account
/// if necessary. The password is only used when the account is created.
#[instrument(skip(accounts, password))]
pub async fn ensure_admin(
    accounts: &AccountClient,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Account, AccountError> {
    if let Some(existing) = accounts.find_by_email(email).await? {
        if existing.is_admin {
            return Ok(existing);
        }
        info!(account = %existing.id, "Promoting existing account to administrator");
        return accounts
            .update_account(
                existing.id,
                AccountUpdate {
                    is_admin: Some(true),
                    ..Default::default()
                },
            )
            .await;
    }

    let password_hash = password::hash_password(password)?;
    let admin = accounts
        .register(AccountCreate {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            is_admin: true,
        })
        .await?;
    info!(account = %admin.id, "Administrator account created");
    Ok(admin)
}
