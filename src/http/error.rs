//! Errors returned by the HTTP handlers.
//!
//! Every failure renders as `{"message": "..."}` with the status derived from the
//! underlying domain error.

use crate::account_actor::AccountError;
use crate::media::MediaError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Media(#[from] MediaError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Http { status, .. } => *status,
            ApiError::Account(e) => match e {
                AccountError::NotFound(_) => StatusCode::NOT_FOUND,
                AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AccountError::Credential(_) | AccountError::ActorCommunicationError(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                _ => StatusCode::BAD_REQUEST,
            },
            ApiError::Product(e) => match e {
                ProductError::NotFound(_) => StatusCode::NOT_FOUND,
                ProductError::ActorCommunicationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            ApiError::Order(e) => match e {
                OrderError::NotFound(_)
                | OrderError::AccountNotFound(_)
                | OrderError::ProductNotFound(_) => StatusCode::NOT_FOUND,
                OrderError::Forbidden => StatusCode::FORBIDDEN,
                OrderError::ActorCommunicationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            ApiError::Media(e) => match e {
                MediaError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        Self::bad_request(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;

    #[test]
    fn test_domain_errors_map_to_statuses() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (OrderError::EmptyCart.into(), StatusCode::BAD_REQUEST),
            (
                OrderError::InsufficientFunds {
                    requested: 10,
                    available: 5,
                }
                .into(),
                StatusCode::BAD_REQUEST,
            ),
            (OrderError::Forbidden.into(), StatusCode::FORBIDDEN),
            (
                OrderError::ProductNotFound("product_4".into()).into(),
                StatusCode::NOT_FOUND,
            ),
            (AccountError::InvalidCredentials.into(), StatusCode::UNAUTHORIZED),
            (AccountError::AdminDeletion.into(), StatusCode::BAD_REQUEST),
            (
                AccountError::ActorCommunicationError("closed".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ProductError::InsufficientStock {
                    product: ProductId(1),
                    name: "Lamp".into(),
                    requested: 2,
                    available: 0,
                }
                .into(),
                StatusCode::BAD_REQUEST,
            ),
            (MediaError::UnsupportedType.into(), StatusCode::BAD_REQUEST),
            (ApiError::unauthorized("no token"), StatusCode::UNAUTHORIZED),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status(), expected, "{error}");
        }
    }

    #[test]
    fn test_message_is_the_error_text() {
        let e: ApiError = OrderError::EmptyCart.into();
        assert_eq!(e.to_string(), "No order items");
    }
}
