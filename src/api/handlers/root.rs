use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Ironclub API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Membership management for gyms",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "plans": "/api/plans",
            "members": "/api/members",
            "dashboard": "/api/dashboard",
            "import": "/api/import/members"
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}
