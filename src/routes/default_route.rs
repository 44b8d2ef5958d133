use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use crate::configuration::Environment;

#[get("/")]
async fn default() -> impl Responder {
    HttpResponse::Ok().body("Price aggregator is up. Search with GET /api/prices?query=&country=")
}

#[get("/health")]
async fn health(environment: web::Data<Environment>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "env": environment.as_str(),
    }))
}

pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": "Not Found",
        "path": req.path(),
        "method": req.method().as_str(),
    }))
}
