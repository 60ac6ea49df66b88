//! Health check routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | / | GET | Landing greeting |
//! | /health | GET | Liveness + database ping |

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
}

async fn home() -> &'static str {
    "Matrium!"
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// "ok" | "error"
    status: &'static str,
    version: &'static str,
    /// Database check result
    database: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    status: &'static str,
    /// Round-trip latency in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u128>,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let started = std::time::Instant::now();
    let database = match sqlx::query("SELECT 1").execute(state.pool()).await {
        Ok(_) => CheckResult {
            status: "ok",
            latency_ms: Some(started.elapsed().as_millis()),
        },
        Err(e) => {
            tracing::error!(error = %e, "Health check: database unreachable");
            CheckResult {
                status: "error",
                latency_ms: None,
            }
        }
    };

    let status = if database.status == "ok" { "ok" } else { "error" };
    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}
