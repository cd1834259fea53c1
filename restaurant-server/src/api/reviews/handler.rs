//! Review API Handlers

use axum::{Json, extract::State};

use shared::models::{Review, ReviewApproval, ReviewListing};

use super::form::ReviewForm;
use crate::api::extract::{IdPath, ValidJson};
use crate::core::ServerState;
use crate::db::repository::review::{self, NewReview};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_URL_LEN, normalize_optional, validate_optional_text, validate_rating,
    validate_required_text, validate_review_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ReviewNotFound, format!("Review {id} not found"))
}

/// GET /api/reviews - approved reviews, newest first, with their average
pub async fn list_approved(State(state): State<ServerState>) -> AppResult<Json<ReviewListing>> {
    let reviews = review::find_all(state.pool(), true).await?;
    Ok(Json(ReviewListing::from_reviews(reviews)))
}

/// GET /api/admin/reviews - every review, including those awaiting moderation
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<ReviewListing>> {
    let reviews = review::find_all(state.pool(), false).await?;
    Ok(Json(ReviewListing::from_reviews(reviews)))
}

/// POST /api/reviews - submit a review; it stays hidden until approved
pub async fn create(
    State(state): State<ServerState>,
    form: ReviewForm,
) -> AppResult<Json<Review>> {
    let ReviewForm { review: payload, image } = form;

    validate_required_text(&payload.customer_name, "customerName", MAX_NAME_LEN)?;
    validate_rating(payload.rating)?;
    validate_review_text(&payload.review_text)?;
    let mut image_url = normalize_optional(payload.image_url);
    validate_optional_text(&image_url, "imageUrl", MAX_URL_LEN)?;

    // Text is checked before the image is stored
    if let Some(data) = image {
        let stored = state.images.store(&data).await?;
        image_url = Some(stored.url);
    }

    let review = review::create(
        state.pool(),
        NewReview {
            customer_name: payload.customer_name.trim().to_string(),
            rating: payload.rating,
            review_text: payload.review_text.trim().to_string(),
            image_url,
        },
    )
    .await?;

    tracing::info!(id = review.id, rating = review.rating, "Review submitted");
    Ok(Json(review))
}

/// PUT /api/reviews/{id} - approve or unapprove
pub async fn set_approval(
    State(state): State<ServerState>,
    IdPath(id): IdPath,
    ValidJson(payload): ValidJson<ReviewApproval>,
) -> AppResult<Json<Review>> {
    let review = review::set_approved(state.pool(), id, payload.approved)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, approved = review.approved, "Review moderated");
    Ok(Json(review))
}

/// DELETE /api/reviews/{id}
pub async fn delete(
    State(state): State<ServerState>,
    IdPath(id): IdPath,
) -> AppResult<Json<bool>> {
    if !review::delete(state.pool(), id).await? {
        return Err(not_found(id));
    }
    tracing::info!(id, "Review deleted");
    Ok(Json(true))
}
