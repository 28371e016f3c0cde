//! `POST /api/upload`: stores one product image from the multipart field `image`.

use super::{AdminCaller, ApiError, AppState};
use crate::media::MediaError;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub image: String,
}

pub async fn upload_image(
    State(state): State<AppState>,
    _admin: AdminCaller,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        let image = state
            .media
            .save(&file_name, content_type.as_deref(), &bytes)
            .await?;
        return Ok(Json(UploadResponse {
            message: "Image uploaded".to_string(),
            image,
        }));
    }
    Err(MediaError::MissingFile.into())
}
