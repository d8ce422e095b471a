//! Liveness endpoints.

use axum::Json;
use axum::extract::State;

use crate::state::AppState;

/// GET / - Identity check kept compatible with existing web clients.
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Hello from FastAPI!" }))
}

/// GET /health - Service and database status.
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = match state.db_pool.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Health check database ping failed");
            "unavailable"
        }
    };

    Json(serde_json::json!({
        "status": if database == "ok" { "ok" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
        "provider": state.chat_service.provider_name(),
    }))
}
