//! Image upload handler

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};

use crate::core::ServerState;
use crate::services::StoredImage;
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/upload - multipart field `image`
///
/// Validates the file by decoding its header, then hands it to the image
/// stores. Other fields are ignored.
pub async fn upload(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<StoredImage>> {
    let mut multipart = multipart.map_err(|e| AppError::invalid_request(e.body_text()))?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid_request(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::invalid_request(format!("Failed to read image: {e}")))?;

        tracing::info!(file_name = ?file_name, size = data.len(), "Image upload received");
        let stored = state.images.store(&data).await?;
        return Ok(Json(stored));
    }

    Err(AppError::new(ErrorCode::NoFileProvided).for_field("image"))
}
