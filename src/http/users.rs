//! `/api/users`: registration, sessions, profile, balance and account administration.

use super::extract::{bearer_token, parse_id};
use super::{AdminCaller, ApiError, AppState, ValidJson};
use crate::auth::{self, password, Caller};
use crate::model::{Account, AccountId, AccountUpdate, Profile};
use actor_framework::ActorClient;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// An account together with a freshly issued session token.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub account: Account,
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(flatten)]
    pub profile: Profile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminAccountRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: u64,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: u64,
}

pub async fn register(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let account = auth::register(&state.accounts, &req.name, &req.email, &req.password).await?;
    let token = state.sessions.issue(account.id).await;
    info!(account = %account.id, "Account registered");
    Ok((StatusCode::CREATED, Json(SessionResponse { account, token })))
}

pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let account = auth::login(&state.accounts, &req.email, &req.password).await?;
    let token = state.sessions.issue(account.id).await;
    Ok(Json(SessionResponse { account, token }))
}

/// Succeeds with or without a valid token.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.revoke(token).await;
    }
    Json(json!({ "message": "Logged out successfully" }))
}

pub async fn get_profile(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(state.accounts.require(caller.account_id).await?))
}

pub async fn update_profile(
    State(state): State<AppState>,
    caller: Caller,
    ValidJson(req): ValidJson<ProfileRequest>,
) -> Result<Json<Account>, ApiError> {
    let password_hash = match req.password.as_deref().filter(|p| !p.is_empty()) {
        Some(plain) => Some(password::hash_password(plain)?),
        None => None,
    };
    let update = AccountUpdate {
        name: req.name,
        email: req.email,
        password_hash,
        is_admin: None,
        profile: Some(req.profile),
    };
    let account = state
        .accounts
        .update_account(caller.account_id, update)
        .await?;
    Ok(Json(account))
}

pub async fn get_balance(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<BalanceResponse>, ApiError> {
    let account = state.accounts.require(caller.account_id).await?;
    Ok(Json(BalanceResponse {
        balance: account.balance,
    }))
}

pub async fn withdraw(
    State(state): State<AppState>,
    caller: Caller,
    ValidJson(req): ValidJson<AmountRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state.accounts.debit(caller.account_id, req.amount).await?;
    Ok(Json(BalanceResponse { balance }))
}

/// An administrator credits their own account.
pub async fn top_up(
    State(state): State<AppState>,
    AdminCaller(admin): AdminCaller,
    ValidJson(req): ValidJson<AmountRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state.accounts.credit(admin.account_id, req.amount).await?;
    Ok(Json(BalanceResponse { balance }))
}

pub async fn admin_credit(
    State(state): State<AppState>,
    AdminCaller(admin): AdminCaller,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<AmountRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let id: AccountId = parse_id(&id)?;
    let balance = state.accounts.credit(id, req.amount).await?;
    info!(admin = %admin.account_id, account = %id, amount = req.amount, "Balance credited");
    Ok(Json(BalanceResponse { balance }))
}

pub async fn list_accounts(
    State(state): State<AppState>,
    _admin: AdminCaller,
) -> Result<Json<Vec<Account>>, ApiError> {
    Ok(Json(state.accounts.list().await?))
}

pub async fn update_account(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<AdminAccountRequest>,
) -> Result<Json<Account>, ApiError> {
    let id: AccountId = parse_id(&id)?;
    let update = AccountUpdate {
        name: req.name,
        email: req.email,
        is_admin: req.is_admin,
        ..AccountUpdate::default()
    };
    Ok(Json(state.accounts.update_account(id, update).await?))
}

pub async fn delete_account(
    State(state): State<AppState>,
    AdminCaller(admin): AdminCaller,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id: AccountId = parse_id(&id)?;
    state.accounts.delete(id).await?;
    let revoked = state.sessions.revoke_account(id).await;
    info!(admin = %admin.account_id, account = %id, revoked, "Account deleted");
    Ok(Json(json!({ "message": "User removed" })))
}
