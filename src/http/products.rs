//! `/api/products`: the public catalog and product administration.

use super::extract::parse_id;
use super::{AdminCaller, ApiError, AppState, ValidJson, ValidQuery};
use crate::model::{CatalogPage, CatalogQuery, Product, ProductCreate, ProductId, ProductUpdate};
use actor_framework::ActorClient;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

pub async fn list_products(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<CatalogQuery>,
) -> Result<Json<CatalogPage>, ApiError> {
    Ok(Json(state.products.catalog(&query).await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id: ProductId = parse_id(&id)?;
    Ok(Json(state.products.require(id).await?))
}

/// An empty body creates a draft with placeholder values.
pub async fn create_product(
    State(state): State<AppState>,
    AdminCaller(admin): AdminCaller,
    body: Bytes,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let params = if body.iter().all(u8::is_ascii_whitespace) {
        ProductCreate::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::bad_request(format!("Invalid product payload: {e}")))?
    };
    let product = state.products.create_product(params).await?;
    info!(admin = %admin.account_id, product = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Path(id): Path<String>,
    ValidJson(update): ValidJson<ProductUpdate>,
) -> Result<Json<Product>, ApiError> {
    let id: ProductId = parse_id(&id)?;
    Ok(Json(state.products.update_product(id, update).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    AdminCaller(admin): AdminCaller,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id: ProductId = parse_id(&id)?;
    state.products.delete(id).await?;
    info!(admin = %admin.account_id, product = %id, "Product deleted");
    Ok(Json(json!({ "message": "Product removed" })))
}
