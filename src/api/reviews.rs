use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::middleware::auth::AuthUser;
use crate::models::CreateReviewRequest;
use crate::services::review_service;
use crate::utils::error::AppError;

/// GET /reviews/{movieId} - Reviews for a movie, newest first
pub async fn get_reviews(
    db: web::Data<MongoDB>,
    movie_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let reviews = review_service::reviews_for_movie(&db, &movie_id).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

/// POST /reviews - Submit a review as the principal
pub async fn submit_review(
    user: AuthUser,
    db: web::Data<MongoDB>,
    request: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let review = review_service::submit_review(&db, &user.email, request.into_inner()).await?;

    log::info!("Review {} submitted by {}", review.id, user.email);

    Ok(HttpResponse::Ok().json(review))
}
