use actix_web::{web, HttpResponse, Responder, Scope};
use sitecost_repo::HealthCheck;
use std::sync::Arc;

pub fn health_service() -> Scope {
    web::scope("/health").service(health)
}

#[get("")]
async fn health(health_check: web::Data<Arc<dyn HealthCheck>>) -> impl Responder {
    if health_check.check().await {
        HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
    } else {
        HttpResponse::ServiceUnavailable().json(serde_json::json!({ "status": "unavailable" }))
    }
}
