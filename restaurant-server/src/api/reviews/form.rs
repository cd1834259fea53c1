//! Review submission body: JSON or `multipart/form-data`
//!
//! The multipart form may carry an `image` file next to the text fields.
//! Field names are accepted in snake_case and camelCase.

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;

use shared::models::ReviewCreate;

use crate::api::extract::ValidJson;
use crate::utils::{AppError, ErrorCode};

/// A submitted review before validation
#[derive(Debug, Clone)]
pub struct ReviewForm {
    pub review: ReviewCreate,
    /// Uploaded image, when the form carried a non-empty file
    pub image: Option<Bytes>,
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"))
}

impl<S> FromRequest<S> for ReviewForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let ValidJson(review) = ValidJson::<ReviewCreate>::from_request(req, state).await?;
            return Ok(Self {
                review,
                image: None,
            });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid_request(e.body_text()))?;

        let mut customer_name = None;
        let mut rating = None;
        let mut review_text = None;
        let mut image_url = None;
        let mut image = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::invalid_request(format!("Malformed multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "image" => {
                    let data = field.bytes().await.map_err(|e| {
                        AppError::invalid_request(format!("Failed to read image: {e}"))
                    })?;
                    if !data.is_empty() {
                        image = Some(data);
                    }
                }
                "customer_name" | "customerName" => customer_name = Some(read_text(field).await?),
                "rating" => rating = Some(read_text(field).await?),
                "review_text" | "reviewText" => review_text = Some(read_text(field).await?),
                "image_url" | "imageUrl" => image_url = Some(read_text(field).await?),
                _ => {}
            }
        }

        let rating = rating.ok_or_else(|| AppError::required("rating"))?;
        let rating = rating.trim().parse::<i64>().map_err(|_| {
            AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("rating must be an integer, got {rating}"),
            )
            .for_field("rating")
        })?;

        Ok(Self {
            review: ReviewCreate {
                customer_name: customer_name.unwrap_or_default(),
                rating,
                review_text: review_text.unwrap_or_default(),
                image_url,
            },
            image,
        })
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::invalid_request(format!("Failed to read {name}: {e}")).for_field(&name))
}
