pub mod movie_service;
pub mod review_service;
pub mod token_service;
pub mod user_service;
pub mod watchlist_service;
