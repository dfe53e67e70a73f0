use futures::stream::StreamExt;
use mongodb::bson::{doc, Document};
use mongodb::Cursor;

use crate::database::MongoDB;
use crate::models::{Movie, MovieRequest, MovieResponse};
use crate::utils::error::AppError;
use crate::utils::ids::parse_object_id;

const MOVIES: &str = "movies";

/// First id handed out when the collection is empty.
const FIRST_MOVIE_ID: i64 = 101;

/// Next sequential `movieId` given the current maximum, if any.
fn next_movie_id(last_id: Option<i64>) -> i64 {
    last_id.map_or(FIRST_MOVIE_ID, |id| id + 1)
}

/// Number of movies returned by the showcase endpoints.
const SHOWCASE_LIMIT: i64 = 6;

async fn collect(mut cursor: Cursor<Movie>) -> Result<Vec<MovieResponse>, AppError> {
    let mut movies = Vec::new();
    while let Some(movie) = cursor.next().await {
        movies.push(MovieResponse::from(movie?));
    }
    Ok(movies)
}

pub async fn list_movies(db: &MongoDB) -> Result<Vec<MovieResponse>, AppError> {
    let cursor = db.collection::<Movie>(MOVIES).find(doc! {}).await?;
    collect(cursor).await
}

/// Case-insensitive substring match on title. The pattern is escaped so
/// regex metacharacters in the search term match literally.
pub async fn search_movies(db: &MongoDB, title: &str) -> Result<Vec<MovieResponse>, AppError> {
    let cursor = db
        .collection::<Movie>(MOVIES)
        .find(doc! { "title": { "$regex": escape_regex(title), "$options": "i" } })
        .await?;
    collect(cursor).await
}

fn escape_regex(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if ".^$*+?()[]{}|\\".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub async fn my_collection(db: &MongoDB, principal: &str) -> Result<Vec<MovieResponse>, AppError> {
    let cursor = db
        .collection::<Movie>(MOVIES)
        .find(doc! { "addedBy": principal })
        .await?;
    collect(cursor).await
}

pub async fn get_movie(db: &MongoDB, id: &str) -> Result<MovieResponse, AppError> {
    let object_id = parse_object_id(id)?;

    let movie = db
        .collection::<Movie>(MOVIES)
        .find_one(doc! { "_id": object_id })
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    Ok(MovieResponse::from(movie))
}

/// Validates, assigns the next sequential `movieId` and stamps `addedBy` with
/// the principal. Returns the hex primary key of the inserted document.
///
/// The next id is read-then-increment without a transaction; concurrent adds
/// can observe the same maximum (known limitation).
pub async fn add_movie(
    db: &MongoDB,
    principal: &str,
    request: MovieRequest,
) -> Result<String, AppError> {
    let fields = request.validate()?;

    let collection = db.collection::<Movie>(MOVIES);

    let last = collection
        .find_one(doc! {})
        .sort(doc! { "movieId": -1 })
        .await?;
    let next_id = next_movie_id(last.map(|movie| movie.movie_id));

    let movie = fields.into_movie(next_id, principal.to_string());
    let result = collection.insert_one(&movie).await?;

    Ok(result
        .inserted_id
        .as_object_id()
        .map(|id| id.to_hex())
        .unwrap_or_default())
}

/// Full replace of the 12 client fields, owner only. The primary key and
/// `movieId` are never touched and `addedBy` is re-stamped.
pub async fn update_movie(
    db: &MongoDB,
    principal: &str,
    id: &str,
    request: MovieRequest,
) -> Result<(), AppError> {
    let object_id = parse_object_id(id)?;
    let fields = request.validate()?;

    let collection = db.collection::<Movie>(MOVIES);

    let movie = collection
        .find_one(doc! { "_id": object_id })
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    if movie.added_by != principal {
        return Err(AppError::Forbidden(
            "Unauthorized: You can only edit your own movies".to_string(),
        ));
    }

    let result = collection
        .update_one(
            doc! { "_id": object_id },
            doc! { "$set": fields.to_update_document(principal) },
        )
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound("Movie not found".to_string()));
    }

    Ok(())
}

/// Ownership is enforced through the delete filter itself; zero deletions
/// collapses not-found and not-owned into one Forbidden answer so existence
/// is not leaked.
pub async fn delete_movie(db: &MongoDB, principal: &str, id: &str) -> Result<(), AppError> {
    let object_id = parse_object_id(id)?;

    let result = db
        .collection::<Movie>(MOVIES)
        .delete_one(doc! { "_id": object_id, "addedBy": principal })
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::Forbidden(
            "Unauthorized or movie not found".to_string(),
        ));
    }

    Ok(())
}

/// Shared query behind the slider/top-rated/recent endpoints: whole
/// collection, caller-chosen sort, at most six documents.
pub async fn showcase(db: &MongoDB, sort: Document) -> Result<Vec<MovieResponse>, AppError> {
    let cursor = db
        .collection::<Movie>(MOVIES)
        .find(doc! {})
        .sort(sort)
        .limit(SHOWCASE_LIMIT)
        .await?;
    collect(cursor).await
}
