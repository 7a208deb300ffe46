use axum::Json;

/// GET /health
/// Response: 200 OK with `{"status": "ok"}`
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
      "status": "ok"
    }))
}
