use chrono::Utc;
use futures::stream::StreamExt;
use mongodb::bson::doc;

use crate::database::MongoDB;
use crate::models::{CreateReviewRequest, Review, ReviewResponse};
use crate::utils::error::AppError;
use crate::utils::ids::parse_object_id;

const REVIEWS: &str = "reviews";

/// Reviews for one movie, newest first.
pub async fn reviews_for_movie(
    db: &MongoDB,
    movie_id: &str,
) -> Result<Vec<ReviewResponse>, AppError> {
    let object_id = parse_object_id(movie_id)?;

    let mut cursor = db
        .collection::<Review>(REVIEWS)
        .find(doc! { "movieId": object_id })
        .sort(doc! { "createdAt": -1 })
        .await?;

    let mut reviews = Vec::new();
    while let Some(review) = cursor.next().await {
        reviews.push(ReviewResponse::from(review?));
    }

    Ok(reviews)
}

/// Insert a review on behalf of the principal; the body's `userEmail` must
/// match the verified identity. `createdAt` is stamped server-side.
pub async fn submit_review(
    db: &MongoDB,
    principal: &str,
    request: CreateReviewRequest,
) -> Result<ReviewResponse, AppError> {
    let fields = request.validate()?;

    if fields.user_email != principal {
        return Err(AppError::Forbidden(
            "Unauthorized: Email mismatch".to_string(),
        ));
    }

    let mut review = Review {
        id: None,
        movie_id: fields.movie_id,
        user_email: fields.user_email,
        comment: fields.comment,
        rating: fields.rating,
        created_at: Utc::now().timestamp(),
    };

    let result = db
        .collection::<Review>(REVIEWS)
        .insert_one(&review)
        .await?;
    review.id = result.inserted_id.as_object_id();

    Ok(ReviewResponse::from(review))
}
