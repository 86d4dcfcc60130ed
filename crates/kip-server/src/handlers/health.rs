//! Health check

use crate::AppState;
use axum::{extract::State, Json};
use chrono::Utc;
use kip_core::HealthResponse;

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = if state.resolver.is_connected() {
        "persistent"
    } else {
        "memory"
    };

    Json(HealthResponse {
        status: "Server is running".to_string(),
        timestamp: Utc::now(),
        store: store.to_string(),
    })
}
