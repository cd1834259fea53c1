//! Review Model

use serde::{Deserialize, Serialize};

/// Word count bounds for review text
pub const MIN_REVIEW_WORDS: usize = 10;
pub const MAX_REVIEW_WORDS: usize = 200;

/// Rating bounds
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Review entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub customer_name: String,
    pub rating: i64,
    pub review_text: String,
    pub image_url: Option<String>,
    pub approved: bool,
    pub created_at: i64,
}

/// Submit review payload
///
/// There is no `approved` field: a client-supplied value is dropped during
/// deserialization and new reviews always await moderation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreate {
    pub customer_name: String,
    pub rating: i64,
    pub review_text: String,
    pub image_url: Option<String>,
}

/// Moderation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewApproval {
    pub approved: bool,
}

/// Review list with its rating aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListing {
    pub reviews: Vec<Review>,
    /// Mean rating of the listed reviews, 0 when there are none
    pub overall_rating: f64,
    pub total_reviews: i64,
}

impl ReviewListing {
    pub fn from_reviews(reviews: Vec<Review>) -> Self {
        let total_reviews = reviews.len() as i64;
        let overall_rating = if reviews.is_empty() {
            0.0
        } else {
            reviews.iter().map(|r| r.rating as f64).sum::<f64>() / reviews.len() as f64
        };
        Self {
            reviews,
            overall_rating,
            total_reviews,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: i64) -> Review {
        Review {
            id: rating,
            customer_name: "Ravi".into(),
            rating,
            review_text: "one two three four five six seven eight nine ten".into(),
            image_url: None,
            approved: true,
            created_at: 0,
        }
    }

    #[test]
    fn test_listing_average() {
        let listing = ReviewListing::from_reviews(vec![review(5), review(4), review(3)]);
        assert_eq!(listing.total_reviews, 3);
        assert_eq!(listing.overall_rating, 4.0);
    }

    #[test]
    fn test_empty_listing_has_zero_rating() {
        let listing = ReviewListing::from_reviews(Vec::new());
        assert_eq!(listing.total_reviews, 0);
        assert_eq!(listing.overall_rating, 0.0);
    }

    #[test]
    fn test_create_drops_approved_flag() {
        let payload: ReviewCreate = serde_json::from_str(
            r#"{"customerName":"Ravi","rating":5,"reviewText":"x","approved":true}"#,
        )
        .unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("approved").is_none());
    }
}
