use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::storage::Storage;

/// Handle to the storage backend for readiness checks
#[derive(Debug, Clone)]
pub struct StorageProbe(pub Arc<dyn Storage>);

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessChecks {
    pub storage: bool,
    pub backend: String,
}

/// GET /health - liveness, no dependency checks
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: env!("CARGO_PKG_NAME").to_string(),
    })
}

/// GET /ready - storage backend reachable
pub async fn readiness_check(probe: web::Data<StorageProbe>) -> impl Responder {
    let storage = &probe.0;
    let ready = match storage.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(backend = storage.backend(), error = %e, "Storage readiness check failed");
            false
        }
    };

    let response = ReadinessResponse {
        ready,
        checks: ReadinessChecks {
            storage: ready,
            backend: storage.backend().to_string(),
        },
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
