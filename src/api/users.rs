use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::middleware::auth::AuthUser;
use crate::models::CreateUserRequest;
use crate::services::user_service::{self, CreateUserOutcome};
use crate::utils::error::AppError;

/// POST /users - Register a user unless the email is already known
pub async fn create_user(
    db: web::Data<MongoDB>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    match user_service::create_user(&db, request.into_inner()).await? {
        CreateUserOutcome::Created(id) => {
            log::info!("User created: {}", id);
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "acknowledged": true,
                "insertedId": id
            })))
        }
        CreateUserOutcome::AlreadyExists => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "User already exists. Do not need to insert again"
        }))),
    }
}

/// GET /users/{email} - Own profile only
pub async fn get_user(
    user: AuthUser,
    db: web::Data<MongoDB>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let profile = user_service::get_profile(&db, &user.email, &email).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// GET /users - List all users
pub async fn list_users(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let users = user_service::list_users(&db).await?;
    Ok(HttpResponse::Ok().json(users))
}
