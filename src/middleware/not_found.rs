use actix_web::HttpResponse;
use serde_json::json;

/// Fallback for requests that match no route.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": "Ruta no encontrada" }))
}
