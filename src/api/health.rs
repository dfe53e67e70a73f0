use actix_web::{HttpResponse, Responder};

/// GET / - plain-text liveness probe
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("Movie Master Pro Server is running")
}
