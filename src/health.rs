//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] JSON payload with the crate version, the
//! configured service name, and the uptime of the base handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::server::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
    pub uptime_seconds: u64,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: state.service.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
