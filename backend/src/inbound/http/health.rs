//! Health probe handlers.
//!
//! ```text
//! GET /health/live   Process liveness
//! GET /health/ready  Readiness to accept traffic
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health probe response payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthBody {
    pub status: String,
}

/// Liveness probe. Answers as long as the process is serving requests.
#[utoipa::path(
    get,
    path = "/health/live",
    responses((status = 200, description = "Process is live", body = HealthBody)),
    tags = ["health"],
    operation_id = "healthLive",
    security([])
)]
#[get("/live")]
pub async fn live() -> HttpResponse {
    HttpResponse::Ok().json(HealthBody {
        status: "live".to_owned(),
    })
}

/// Readiness probe. Answers once the HTTP surface is mounted; per-request
/// store failures surface as 503 on the API endpoints themselves.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses((status = 200, description = "Service is ready", body = HealthBody)),
    tags = ["health"],
    operation_id = "healthReady",
    security([])
)]
#[get("/ready")]
pub async fn ready() -> HttpResponse {
    HttpResponse::Ok().json(HealthBody {
        status: "ready".to_owned(),
    })
}

/// Mount both probes under `/health`.
pub fn scope() -> actix_web::Scope {
    web::scope("/health").service(live).service(ready)
}
