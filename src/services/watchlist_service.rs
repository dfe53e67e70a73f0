use chrono::Utc;
use futures::stream::StreamExt;
use mongodb::bson::doc;

use crate::database::MongoDB;
use crate::models::{
    AddToWatchlistRequest, Movie, MovieResponse, WatchlistEntry, WatchlistEntryResponse,
};
use crate::utils::error::AppError;
use crate::utils::ids::parse_object_id;

const WATCHLISTS: &str = "watchlists";
const MOVIES: &str = "movies";

pub enum AddToWatchlistOutcome {
    Added(WatchlistEntryResponse),
    AlreadyExists,
}

pub async fn check_watchlist(
    db: &MongoDB,
    principal: &str,
    movie_id: &str,
) -> Result<bool, AppError> {
    let object_id = parse_object_id(movie_id)?;

    let entry = db
        .collection::<WatchlistEntry>(WATCHLISTS)
        .find_one(doc! { "movieId": object_id, "userEmail": principal })
        .await?;

    Ok(entry.is_some())
}

/// No-op when the (movieId, userEmail) pair already exists; the body's
/// `userEmail` must match the verified identity.
pub async fn add_to_watchlist(
    db: &MongoDB,
    principal: &str,
    request: AddToWatchlistRequest,
) -> Result<AddToWatchlistOutcome, AppError> {
    let fields = request.validate()?;

    if fields.user_email != principal {
        return Err(AppError::Forbidden(
            "Unauthorized: Email mismatch".to_string(),
        ));
    }

    let collection = db.collection::<WatchlistEntry>(WATCHLISTS);

    let existing = collection
        .find_one(doc! { "movieId": fields.movie_id, "userEmail": &fields.user_email })
        .await?;
    if existing.is_some() {
        return Ok(AddToWatchlistOutcome::AlreadyExists);
    }

    let mut entry = WatchlistEntry {
        id: None,
        movie_id: fields.movie_id,
        user_email: fields.user_email,
        added_at: Utc::now().timestamp(),
    };

    let result = collection.insert_one(&entry).await?;
    entry.id = result.inserted_id.as_object_id();

    Ok(AddToWatchlistOutcome::Added(WatchlistEntryResponse::from(
        entry,
    )))
}

/// The principal's watchlist, resolved to the referenced movie documents.
pub async fn my_watchlist(db: &MongoDB, principal: &str) -> Result<Vec<MovieResponse>, AppError> {
    let mut entries = db
        .collection::<WatchlistEntry>(WATCHLISTS)
        .find(doc! { "userEmail": principal })
        .await?;

    let mut movie_ids = Vec::new();
    while let Some(entry) = entries.next().await {
        movie_ids.push(entry?.movie_id);
    }

    let mut cursor = db
        .collection::<Movie>(MOVIES)
        .find(doc! { "_id": { "$in": movie_ids } })
        .await?;

    let mut movies = Vec::new();
    while let Some(movie) = cursor.next().await {
        movies.push(MovieResponse::from(movie?));
    }

    Ok(movies)
}

pub async fn remove_from_watchlist(
    db: &MongoDB,
    principal: &str,
    movie_id: &str,
) -> Result<(), AppError> {
    let object_id = parse_object_id(movie_id)?;

    let result = db
        .collection::<WatchlistEntry>(WATCHLISTS)
        .delete_one(doc! { "movieId": object_id, "userEmail": principal })
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(
            "Movie not found in watchlist".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connect_test_db;
    use mongodb::bson::oid::ObjectId;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_duplicate_watchlist_add_is_a_noop() {
        let db = connect_test_db("movie_master_test_watchlist").await;
        db.collection::<WatchlistEntry>(WATCHLISTS).drop().await.ok();

        let movie_id = ObjectId::new().to_hex();
        let request = || AddToWatchlistRequest {
            movie_id: Some(movie_id.clone()),
            user_email: Some("alice@example.com".to_string()),
        };

        match add_to_watchlist(&db, "alice@example.com", request())
            .await
            .unwrap()
        {
            AddToWatchlistOutcome::Added(entry) => {
                assert_eq!(entry.user_email, "alice@example.com")
            }
            AddToWatchlistOutcome::AlreadyExists => panic!("expected insert on first add"),
        }

        // Same (movieId, userEmail) pair again performs no insert
        match add_to_watchlist(&db, "alice@example.com", request())
            .await
            .unwrap()
        {
            AddToWatchlistOutcome::AlreadyExists => {}
            AddToWatchlistOutcome::Added(_) => panic!("expected no-op on duplicate add"),
        }

        let count = db
            .collection::<WatchlistEntry>(WATCHLISTS)
            .count_documents(doc! { "userEmail": "alice@example.com" })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
