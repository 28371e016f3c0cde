//! Request extractors: identity and boundary validation.

use super::{ApiError, AppState};
use crate::auth::Caller;
use crate::clients::AccountClient;
use crate::model::AccountId;
use actor_framework::ActorClient;
use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::str::FromStr;

/// A JSON body; parse failures become a 400 with the usual error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ValidJson<T>(pub T);

/// A query string; parse failures become a 400 with the usual error body.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ValidQuery<T>(pub T);

/// The bearer token of a request, if one is present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Not authorized, no token"))?;
        let account_id = state
            .sessions
            .resolve(token)
            .await
            .ok_or_else(|| ApiError::unauthorized("Not authorized, token failed"))?;
        resolve_caller(&state.accounts, account_id).await
    }
}

/// The role is read from the account on every request, so a demoted admin loses
/// access immediately.
async fn resolve_caller(
    accounts: &AccountClient,
    account_id: AccountId,
) -> Result<Caller, ApiError> {
    match accounts.get(account_id).await? {
        Some(account) => Ok(Caller::from(&account)),
        None => Err(ApiError::unauthorized("Not authorized, account no longer exists")),
    }
}

/// A caller holding the administrator role.
#[derive(Debug, Clone, Copy)]
pub struct AdminCaller(pub Caller);

#[async_trait]
impl FromRequestParts<AppState> for AdminCaller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let caller = Caller::from_request_parts(parts, state).await?;
        if !caller.is_admin() {
            return Err(ApiError::forbidden("Not authorized as an admin"));
        }
        Ok(AdminCaller(caller))
    }
}

/// Parses a path id. An id that cannot be parsed names nothing, so it is a 404.
pub fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found(format!("Resource not found: {raw}")))
}
