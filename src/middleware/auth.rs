use actix_web::{dev::Payload, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::services::token_service;
use crate::utils::error::AppError;

/// Verified principal extracted from the `Authorization: Bearer <token>` header.
/// Handlers that take this parameter are the protected routes; extraction
/// fails with 401 before the handler body runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_principal(req))
    }
}

fn extract_principal(req: &HttpRequest) -> Result<AuthUser, AppError> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::Unauthorized("unauthorized access".to_string()))?;

    let header = header
        .to_str()
        .map_err(|_| AppError::Unauthorized("unauthorized access".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("unauthorized access".to_string()))?;

    let claims = token_service::verify_token(token)?;

    Ok(AuthUser {
        email: claims.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_missing_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let result = AuthUser::from_request(&req, &mut Payload::None).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[actix_web::test]
    async fn test_non_bearer_header_is_unauthorized() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();
        let result = AuthUser::from_request(&req, &mut Payload::None).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[actix_web::test]
    async fn test_invalid_token_is_unauthorized() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer garbage"))
            .to_http_request();
        let result = AuthUser::from_request(&req, &mut Payload::None).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[actix_web::test]
    async fn test_valid_token_yields_principal() {
        let token = token_service::generate_token("alice@example.com").unwrap();
        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        let user = AuthUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(user.email, "alice@example.com");
    }
}
