pub mod movie;
pub mod review;
pub mod user;
pub mod watchlist;

pub use movie::*;
pub use review::*;
pub use user::*;
pub use watchlist::*;
