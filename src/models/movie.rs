use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

/// Movie document. `movie_id` is the server-assigned sequential id starting
/// at 101; `added_by` is always stamped from the verified principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub movie_id: i64,
    pub title: String,
    pub genre: String,
    pub release_year: i32,
    pub director: String,
    pub cast: Vec<String>,
    pub rating: f64,
    pub duration: String,
    pub plot_summary: String,
    pub poster_url: String,
    pub poster_wide_url: String,
    pub language: String,
    pub country: String,
    pub added_by: String,
}

/// Client-supplied movie fields for add/update. Everything is optional at the
/// serde level so validation can report which field is missing. There is no
/// `addedBy` field here: an owner sent by the client is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRequest {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub cast: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub duration: Option<String>,
    pub plot_summary: Option<String>,
    pub poster_url: Option<String>,
    pub poster_wide_url: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

/// The 12 required movie fields after validation.
#[derive(Debug, Clone)]
pub struct MovieFields {
    pub title: String,
    pub genre: String,
    pub release_year: i32,
    pub director: String,
    pub cast: Vec<String>,
    pub rating: f64,
    pub duration: String,
    pub plot_summary: String,
    pub poster_url: String,
    pub poster_wide_url: String,
    pub language: String,
    pub country: String,
}

impl MovieRequest {
    /// Checks the 12 required fields in order and reports the first missing
    /// one as `"<field> is required"`. String fields must be non-empty.
    pub fn validate(self) -> Result<MovieFields, AppError> {
        Ok(MovieFields {
            title: require_str("title", self.title)?,
            genre: require_str("genre", self.genre)?,
            release_year: require("releaseYear", self.release_year)?,
            director: require_str("director", self.director)?,
            cast: require_list("cast", self.cast)?,
            rating: require("rating", self.rating)?,
            duration: require_str("duration", self.duration)?,
            plot_summary: require_str("plotSummary", self.plot_summary)?,
            poster_url: require_str("posterUrl", self.poster_url)?,
            poster_wide_url: require_str("posterWideUrl", self.poster_wide_url)?,
            language: require_str("language", self.language)?,
            country: require_str("country", self.country)?,
        })
    }
}

impl MovieFields {
    pub fn into_movie(self, movie_id: i64, added_by: String) -> Movie {
        Movie {
            id: None,
            movie_id,
            title: self.title,
            genre: self.genre,
            release_year: self.release_year,
            director: self.director,
            cast: self.cast,
            rating: self.rating,
            duration: self.duration,
            plot_summary: self.plot_summary,
            poster_url: self.poster_url,
            poster_wide_url: self.poster_wide_url,
            language: self.language,
            country: self.country,
            added_by,
        }
    }

    /// `$set` payload for a full-replace update; `addedBy` is re-stamped to
    /// the acting principal, the primary key and `movieId` are untouched.
    pub fn to_update_document(&self, added_by: &str) -> Document {
        doc! {
            "title": &self.title,
            "genre": &self.genre,
            "releaseYear": self.release_year,
            "director": &self.director,
            "cast": self.cast.clone(),
            "rating": self.rating,
            "duration": &self.duration,
            "plotSummary": &self.plot_summary,
            "posterUrl": &self.poster_url,
            "posterWideUrl": &self.poster_wide_url,
            "language": &self.language,
            "country": &self.country,
            "addedBy": added_by,
        }
    }
}

/// Movie as returned to clients, with the primary key as a hex string.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub id: String,
    pub movie_id: i64,
    pub title: String,
    pub genre: String,
    pub release_year: i32,
    pub director: String,
    pub cast: Vec<String>,
    pub rating: f64,
    pub duration: String,
    pub plot_summary: String,
    pub poster_url: String,
    pub poster_wide_url: String,
    pub language: String,
    pub country: String,
    pub added_by: String,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        MovieResponse {
            id: movie.id.map(|id| id.to_hex()).unwrap_or_default(),
            movie_id: movie.movie_id,
            title: movie.title,
            genre: movie.genre,
            release_year: movie.release_year,
            director: movie.director,
            cast: movie.cast,
            rating: movie.rating,
            duration: movie.duration,
            plot_summary: movie.plot_summary,
            poster_url: movie.poster_url,
            poster_wide_url: movie.poster_wide_url,
            language: movie.language,
            country: movie.country,
            added_by: movie.added_by,
        }
    }
}

fn require<T>(field: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

fn require_str(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}

fn require_list(field: &str, value: Option<Vec<String>>) -> Result<Vec<String>, AppError> {
    match value {
        Some(list) if !list.is_empty() => Ok(list),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> serde_json::Value {
        serde_json::json!({
            "title": "Inception",
            "genre": "Sci-Fi",
            "releaseYear": 2010,
            "director": "Christopher Nolan",
            "cast": ["Leonardo DiCaprio", "Joseph Gordon-Levitt"],
            "rating": 8.8,
            "duration": "148 min",
            "plotSummary": "A thief steals corporate secrets through dream-sharing.",
            "posterUrl": "https://example.com/inception.jpg",
            "posterWideUrl": "https://example.com/inception-wide.jpg",
            "language": "English",
            "country": "USA"
        })
    }

    #[test]
    fn test_full_request_validates() {
        let request: MovieRequest = serde_json::from_value(full_request()).unwrap();
        let fields = request.validate().unwrap();
        assert_eq!(fields.title, "Inception");
        assert_eq!(fields.release_year, 2010);
        assert_eq!(fields.cast.len(), 2);
    }

    #[test]
    fn test_missing_field_reports_name() {
        let mut body = full_request();
        body.as_object_mut().unwrap().remove("posterWideUrl");
        let request: MovieRequest = serde_json::from_value(body).unwrap();
        match request.validate() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "posterWideUrl is required"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_string_field_rejected() {
        let mut body = full_request();
        body["director"] = serde_json::json!("   ");
        let request: MovieRequest = serde_json::from_value(body).unwrap();
        match request.validate() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "director is required"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_first_missing_field_wins() {
        let mut body = full_request();
        let obj = body.as_object_mut().unwrap();
        obj.remove("genre");
        obj.remove("country");
        let request: MovieRequest = serde_json::from_value(body).unwrap();
        match request.validate() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "genre is required"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_client_supplied_owner_is_ignored() {
        let mut body = full_request();
        body["addedBy"] = serde_json::json!("attacker@example.com");
        let request: MovieRequest = serde_json::from_value(body).unwrap();
        let fields = request.validate().unwrap();
        let movie = fields.into_movie(101, "owner@example.com".to_string());
        assert_eq!(movie.added_by, "owner@example.com");
    }

    #[test]
    fn test_update_document_restamps_owner() {
        let request: MovieRequest = serde_json::from_value(full_request()).unwrap();
        let fields = request.validate().unwrap();
        let update = fields.to_update_document("owner@example.com");
        assert_eq!(update.get_str("addedBy").unwrap(), "owner@example.com");
        assert!(update.get("_id").is_none());
        assert!(update.get("movieId").is_none());
    }

    #[test]
    fn test_movie_bson_field_names() {
        let movie = Movie {
            id: None,
            movie_id: 101,
            title: "Inception".into(),
            genre: "Sci-Fi".into(),
            release_year: 2010,
            director: "Christopher Nolan".into(),
            cast: vec!["Leonardo DiCaprio".into()],
            rating: 8.8,
            duration: "148 min".into(),
            plot_summary: "Dreams.".into(),
            poster_url: "p".into(),
            poster_wide_url: "pw".into(),
            language: "English".into(),
            country: "USA".into(),
            added_by: "owner@example.com".into(),
        };
        let doc = mongodb::bson::to_document(&movie).unwrap();
        assert_eq!(doc.get_i64("movieId").unwrap(), 101);
        assert_eq!(doc.get_str("addedBy").unwrap(), "owner@example.com");
        assert_eq!(doc.get_str("plotSummary").unwrap(), "Dreams.");
    }
}
