mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use dotenv::dotenv;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    log::info!("Starting Movie Master Pro service...");

    // Connect once at startup; the handle is cloned into every worker, so
    // there is no lazy-connect path at request time.
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db);

    log::info!("MongoDB connected successfully");
    log::info!("Server starting on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        // Malformed JSON bodies answer with the same {message} shape as
        // every other fault
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            let message = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(serde_json::json!({ "message": message })),
            )
            .into()
        });

        App::new()
            .app_data(db_data.clone())
            .app_data(json_config)
            .wrap(cors)
            .wrap(Logger::default())
            // Liveness
            .route("/", web::get().to(api::health::index))
            // Users
            .service(
                web::scope("/users")
                    .service(
                        web::resource("")
                            .route(web::post().to(api::users::create_user))
                            .route(web::get().to(api::users::list_users)),
                    )
                    .route("/{email}", web::get().to(api::users::get_user)),
            )
            // Movies; fixed segments must be registered before /{id}
            .service(
                web::scope("/movies")
                    .route("/search", web::get().to(api::movies::search_movies))
                    .route("/my-collection", web::get().to(api::movies::my_collection))
                    .route("/add", web::post().to(api::movies::add_movie))
                    .route("/update/{id}", web::patch().to(api::movies::update_movie))
                    .route("", web::get().to(api::movies::list_movies))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(api::movies::get_movie))
                            .route(web::delete().to(api::movies::delete_movie)),
                    ),
            )
            // Reviews
            .service(
                web::scope("/reviews")
                    .route("", web::post().to(api::reviews::submit_review))
                    .route("/{movie_id}", web::get().to(api::reviews::get_reviews)),
            )
            // Watchlist
            .service(
                web::scope("/watchlist")
                    .route("/check/{movie_id}", web::get().to(api::watchlist::check_watchlist))
                    .route("/my", web::get().to(api::watchlist::my_watchlist))
                    .route("", web::post().to(api::watchlist::add_to_watchlist))
                    .route(
                        "/{movie_id}",
                        web::delete().to(api::watchlist::remove_from_watchlist),
                    ),
            )
            // Showcase rows for the landing page
            .route("/movie-slider", web::get().to(api::movies::movie_slider))
            .route("/movie-toprated", web::get().to(api::movies::movie_top_rated))
            .route("/movie-recent", web::get().to(api::movies::movie_recent))
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
