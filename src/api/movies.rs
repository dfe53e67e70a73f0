use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde::Deserialize;

use crate::database::MongoDB;
use crate::middleware::auth::AuthUser;
use crate::models::MovieRequest;
use crate::services::movie_service;
use crate::utils::error::AppError;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
}

/// GET /movies/search?title= - Case-insensitive title search
pub async fn search_movies(
    db: web::Data<MongoDB>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let title = query
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Title is required".to_string()))?;

    let movies = movie_service::search_movies(&db, title).await?;
    Ok(HttpResponse::Ok().json(movies))
}

/// GET /movies - List all movies
pub async fn list_movies(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let movies = movie_service::list_movies(&db).await?;
    Ok(HttpResponse::Ok().json(movies))
}

/// GET /movies/my-collection - Movies added by the principal
pub async fn my_collection(
    user: AuthUser,
    db: web::Data<MongoDB>,
) -> Result<HttpResponse, AppError> {
    let movies = movie_service::my_collection(&db, &user.email).await?;
    Ok(HttpResponse::Ok().json(movies))
}

/// GET /movies/{id} - Fetch one movie by primary key
pub async fn get_movie(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let movie = movie_service::get_movie(&db, &id).await?;
    Ok(HttpResponse::Ok().json(movie))
}

/// POST /movies/add - Create a movie owned by the principal
pub async fn add_movie(
    user: AuthUser,
    db: web::Data<MongoDB>,
    request: web::Json<MovieRequest>,
) -> Result<HttpResponse, AppError> {
    let inserted_id = movie_service::add_movie(&db, &user.email, request.into_inner()).await?;

    log::info!("Movie {} added by {}", inserted_id, user.email);

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Movie added successfully",
        "movie": inserted_id
    })))
}

/// PATCH /movies/update/{id} - Full field replace, owner only
pub async fn update_movie(
    user: AuthUser,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
    request: web::Json<MovieRequest>,
) -> Result<HttpResponse, AppError> {
    movie_service::update_movie(&db, &user.email, &id, request.into_inner()).await?;

    log::info!("Movie {} updated by {}", id, user.email);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Movie updated successfully"
    })))
}

/// DELETE /movies/{id} - Owner only; enforced through the delete filter
pub async fn delete_movie(
    user: AuthUser,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    movie_service::delete_movie(&db, &user.email, &id).await?;

    log::info!("Movie {} deleted by {}", id, user.email);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Movie deleted successfully"
    })))
}

/// GET /movie-slider - First six movies by sequential id
pub async fn movie_slider(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let movies = movie_service::showcase(&db, doc! { "movieId": 1 }).await?;
    Ok(HttpResponse::Ok().json(movies))
}

/// GET /movie-toprated - Six best-rated movies
pub async fn movie_top_rated(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let movies = movie_service::showcase(&db, doc! { "rating": -1 }).await?;
    Ok(HttpResponse::Ok().json(movies))
}

/// GET /movie-recent - Six most recently added movies
pub async fn movie_recent(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let movies = movie_service::showcase(&db, doc! { "movieId": -1 }).await?;
    Ok(HttpResponse::Ok().json(movies))
}
