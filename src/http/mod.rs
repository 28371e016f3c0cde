//! # HTTP API
//!
//! The axum surface of the store. Handlers translate request DTOs into typed commands,
//! call the domain clients and render JSON with camelCase fields.
//!
//! Identity is resolved by the [`Caller`](crate::auth::Caller) and [`AdminCaller`]
//! extractors, so a handler that takes one of them is protected by construction.

pub mod error;
pub mod extract;
mod orders;
mod products;
mod upload;
mod users;

pub use error::ApiError;
pub use extract::{AdminCaller, ValidJson, ValidQuery};

use crate::auth::SessionStore;
use crate::clients::{AccountClient, OrderClient, ProductClient};
use crate::media::{MediaStore, PUBLIC_PREFIX};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared handles available to every handler.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountClient,
    pub products: ProductClient,
    pub orders: OrderClient,
    pub sessions: SessionStore,
    pub media: MediaStore,
}

pub fn build_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/", get(users::list_accounts))
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/logout", post(users::logout))
        .route(
            "/profile",
            get(users::get_profile).put(users::update_profile),
        )
        .route("/balance", get(users::get_balance))
        .route("/balance/withdraw", put(users::withdraw))
        .route("/balance/topup", put(users::top_up))
        .route(
            "/:id",
            put(users::update_account).delete(users::delete_account),
        )
        .route("/:id/balance", put(users::admin_credit));

    let product_routes = Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        );

    let order_routes = Router::new()
        .route("/", post(orders::create_order).get(orders::list_orders))
        .route("/myorders", get(orders::my_orders))
        .route("/summary", get(orders::summary))
        .route("/:id", get(orders::get_order).delete(orders::delete_order))
        .route("/:id/pay", put(orders::mark_paid))
        .route("/:id/deliver", put(orders::mark_delivered));

    let uploads = ServeDir::new(state.media.root());

    Router::new()
        .route("/", get(|| async { "API is running..." }))
        .nest("/api/users", user_routes)
        .nest("/api/products", product_routes)
        .nest("/api/orders", order_routes)
        .route("/api/upload", post(upload::upload_image))
        .nest_service(PUBLIC_PREFIX, uploads)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the storefront frontend. Without a configured origin any origin is allowed.
pub fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    match origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => layer.allow_origin(origin),
        Some(Err(e)) => {
            warn!(error = %e, "Invalid frontend origin, allowing any origin");
            layer.allow_origin(Any)
        }
        None => layer.allow_origin(Any),
    }
}
