use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;
use crate::utils::ids::parse_object_id;

/// Review document. Immutable once created; `created_at` is a server-set
/// unix timestamp used for newest-first ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub movie_id: ObjectId,
    pub user_email: String,
    pub comment: String,
    pub rating: f64,
    pub created_at: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub movie_id: Option<String>,
    pub user_email: Option<String>,
    pub comment: Option<String>,
    pub rating: Option<f64>,
}

/// Validated review input.
#[derive(Debug, Clone)]
pub struct ReviewFields {
    pub movie_id: ObjectId,
    pub user_email: String,
    pub comment: String,
    pub rating: f64,
}

impl CreateReviewRequest {
    pub fn validate(self) -> Result<ReviewFields, AppError> {
        let (movie_id, user_email, comment, rating) = match (
            non_empty(self.movie_id),
            non_empty(self.user_email),
            non_empty(self.comment),
            self.rating,
        ) {
            (Some(m), Some(u), Some(c), Some(r)) => (m, u, c, r),
            _ => {
                return Err(AppError::Validation(
                    "All fields are required".to_string(),
                ))
            }
        };

        Ok(ReviewFields {
            movie_id: parse_object_id(&movie_id)?,
            user_email,
            comment,
            rating,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub movie_id: String,
    pub user_email: String,
    pub comment: String,
    pub rating: f64,
    pub created_at: i64,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        ReviewResponse {
            id: review.id.map(|id| id.to_hex()).unwrap_or_default(),
            movie_id: review.movie_id.to_hex(),
            user_email: review.user_email,
            comment: review.comment,
            rating: review.rating,
            created_at: review.created_at,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_review_request() {
        let request = CreateReviewRequest {
            movie_id: Some("507f1f77bcf86cd799439011".to_string()),
            user_email: Some("alice@example.com".to_string()),
            comment: Some("Great movie".to_string()),
            rating: Some(9.0),
        };
        let fields = request.validate().unwrap();
        assert_eq!(fields.user_email, "alice@example.com");
        assert_eq!(fields.movie_id.to_hex(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_missing_comment_rejected() {
        let request = CreateReviewRequest {
            movie_id: Some("507f1f77bcf86cd799439011".to_string()),
            user_email: Some("alice@example.com".to_string()),
            comment: None,
            rating: Some(9.0),
        };
        match request.validate() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "All fields are required"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_movie_id_rejected() {
        let request = CreateReviewRequest {
            movie_id: Some("abc".to_string()),
            user_email: Some("alice@example.com".to_string()),
            comment: Some("Great movie".to_string()),
            rating: Some(9.0),
        };
        match request.validate() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid movie ID format"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
