use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;
use crate::utils::ids::parse_object_id;

/// Watchlist entry. Unique per (movieId, userEmail) by find-then-insert;
/// `added_at` is a server-set unix timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub movie_id: ObjectId,
    pub user_email: String,
    pub added_at: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToWatchlistRequest {
    pub movie_id: Option<String>,
    pub user_email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WatchlistFields {
    pub movie_id: ObjectId,
    pub user_email: String,
}

impl AddToWatchlistRequest {
    pub fn validate(self) -> Result<WatchlistFields, AppError> {
        let (movie_id, user_email) = match (
            self.movie_id.filter(|s| !s.trim().is_empty()),
            self.user_email.filter(|s| !s.trim().is_empty()),
        ) {
            (Some(m), Some(u)) => (m, u),
            _ => {
                return Err(AppError::Validation(
                    "Movie ID and user email are required".to_string(),
                ))
            }
        };

        Ok(WatchlistFields {
            movie_id: parse_object_id(&movie_id)?,
            user_email,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntryResponse {
    pub id: String,
    pub movie_id: String,
    pub user_email: String,
    pub added_at: i64,
}

impl From<WatchlistEntry> for WatchlistEntryResponse {
    fn from(entry: WatchlistEntry) -> Self {
        WatchlistEntryResponse {
            id: entry.id.map(|id| id.to_hex()).unwrap_or_default(),
            movie_id: entry.movie_id.to_hex(),
            user_email: entry.user_email,
            added_at: entry.added_at,
        }
    }
}
