use futures::stream::StreamExt;
use mongodb::bson::doc;

use crate::database::MongoDB;
use crate::models::{CreateUserRequest, User, UserProfileResponse, UserResponse};
use crate::utils::error::AppError;

const USERS: &str = "users";

pub enum CreateUserOutcome {
    Created(String),
    AlreadyExists,
}

/// Idempotent insert keyed by email: a second create for the same email is a
/// no-op that reports success.
pub async fn create_user(
    db: &MongoDB,
    request: CreateUserRequest,
) -> Result<CreateUserOutcome, AppError> {
    let email = request
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Email is required".to_string()))?;

    let collection = db.collection::<User>(USERS);

    if collection.find_one(doc! { "email": &email }).await?.is_some() {
        return Ok(CreateUserOutcome::AlreadyExists);
    }

    let user = User {
        id: None,
        email,
        name: request.name,
        image: request.image,
    };

    let result = collection.insert_one(&user).await?;
    let inserted_id = result
        .inserted_id
        .as_object_id()
        .map(|id| id.to_hex())
        .unwrap_or_default();

    Ok(CreateUserOutcome::Created(inserted_id))
}

/// Profile lookup; only the principal may read their own profile.
pub async fn get_profile(
    db: &MongoDB,
    principal: &str,
    email: &str,
) -> Result<UserProfileResponse, AppError> {
    if email != principal {
        return Err(AppError::Forbidden("Unauthorized access".to_string()));
    }

    let collection = db.collection::<User>(USERS);
    let user = collection
        .find_one(doc! { "email": email })
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(UserProfileResponse {
        image: user.image,
        name: user.name,
    })
}

pub async fn list_users(db: &MongoDB) -> Result<Vec<UserResponse>, AppError> {
    let collection = db.collection::<User>(USERS);
    let mut cursor = collection.find(doc! {}).await?;

    let mut users = Vec::new();
    while let Some(user) = cursor.next().await {
        users.push(UserResponse::from(user?));
    }

    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connect_test_db;

    fn alice_request() -> CreateUserRequest {
        CreateUserRequest {
            email: Some("alice@example.com".to_string()),
            name: Some("Alice".to_string()),
            image: Some("https://example.com/alice.jpg".to_string()),
        }
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_create_user_is_idempotent() {
        let db = connect_test_db("movie_master_test_users").await;
        db.collection::<User>(USERS).drop().await.ok();

        match create_user(&db, alice_request()).await.unwrap() {
            CreateUserOutcome::Created(id) => assert!(!id.is_empty()),
            CreateUserOutcome::AlreadyExists => panic!("expected insert on first create"),
        }

        // Second create with the same email performs no insert
        match create_user(&db, alice_request()).await.unwrap() {
            CreateUserOutcome::AlreadyExists => {}
            CreateUserOutcome::Created(_) => panic!("expected no-op on second create"),
        }

        let count = db
            .collection::<User>(USERS)
            .count_documents(doc! { "email": "alice@example.com" })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
