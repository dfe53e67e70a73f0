pub mod health;
pub mod movies;
pub mod reviews;
pub mod users;
pub mod watchlist;
