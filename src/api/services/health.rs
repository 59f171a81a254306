use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::{error, trace};

use crate::api::types::HealthResponse;
use crate::registry::AliasRegistry;

const READINESS_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }
}

/// Health probes.
///
/// Readiness asks the store for its count rather than going through the
/// full registry path, so probes stay cheap.
pub struct HealthService;

impl HealthService {
    pub async fn readiness_check(
        registry: web::Data<Arc<AliasRegistry>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received readiness check request");

        let storage = registry.backend_name().to_string();
        let (status, body) = match tokio::time::timeout(READINESS_TIMEOUT, registry.count()).await
        {
            Ok(Ok(links)) => {
                let uptime = (chrono::Utc::now() - app_start_time.start_datetime)
                    .num_seconds()
                    .max(0);
                (
                    StatusCode::OK,
                    HealthResponse {
                        status: "ok".to_string(),
                        storage: Some(storage),
                        links: Some(links),
                        uptime_seconds: Some(uptime),
                        error: None,
                    },
                )
            }
            Ok(Err(e)) => {
                error!("Readiness check failed: {}", e);
                (StatusCode::SERVICE_UNAVAILABLE, unavailable(storage, e.message()))
            }
            Err(_) => {
                error!("Readiness check timed out after {:?}", READINESS_TIMEOUT);
                (StatusCode::SERVICE_UNAVAILABLE, unavailable(storage, "timeout"))
            }
        };

        trace!("Readiness check completed in {:?}", start_time.elapsed());
        HttpResponse::build(status).json(body)
    }

    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");

        HttpResponse::Ok().json(HealthResponse {
            status: "ok".to_string(),
            storage: None,
            links: None,
            uptime_seconds: None,
            error: None,
        })
    }
}

fn unavailable(storage: String, error: &str) -> HealthResponse {
    HealthResponse {
        status: "unavailable".to_string(),
        storage: Some(storage),
        links: None,
        uptime_seconds: None,
        error: Some(error.to_string()),
    }
}

pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("/ready", web::get().to(HealthService::readiness_check))
        .route("/ready", web::head().to(HealthService::readiness_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
