use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::middleware::auth::AuthUser;
use crate::models::AddToWatchlistRequest;
use crate::services::watchlist_service::{self, AddToWatchlistOutcome};
use crate::utils::error::AppError;

/// GET /watchlist/check/{movieId} - Membership test for the principal
pub async fn check_watchlist(
    user: AuthUser,
    db: web::Data<MongoDB>,
    movie_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let in_watchlist = watchlist_service::check_watchlist(&db, &user.email, &movie_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "inWatchlist": in_watchlist })))
}

/// POST /watchlist - Add a movie to the principal's watchlist
pub async fn add_to_watchlist(
    user: AuthUser,
    db: web::Data<MongoDB>,
    request: web::Json<AddToWatchlistRequest>,
) -> Result<HttpResponse, AppError> {
    match watchlist_service::add_to_watchlist(&db, &user.email, request.into_inner()).await? {
        AddToWatchlistOutcome::Added(entry) => {
            log::info!("Watchlist entry {} added by {}", entry.id, user.email);
            Ok(HttpResponse::Ok().json(entry))
        }
        AddToWatchlistOutcome::AlreadyExists => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Movie already in watchlists"
        }))),
    }
}

/// GET /watchlist/my - The principal's watchlist as movie documents
pub async fn my_watchlist(user: AuthUser, db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let movies = watchlist_service::my_watchlist(&db, &user.email).await?;
    Ok(HttpResponse::Ok().json(movies))
}

/// DELETE /watchlist/{movieId} - Remove the principal's own entry
pub async fn remove_from_watchlist(
    user: AuthUser,
    db: web::Data<MongoDB>,
    movie_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    watchlist_service::remove_from_watchlist(&db, &user.email, &movie_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Movie removed from watchlist"
    })))
}
