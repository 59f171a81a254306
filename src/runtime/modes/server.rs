//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::ApiState;
use crate::config::{CorsConfig, StaticConfig};
use crate::runtime::lifetime;

/// Upper bound on worker threads regardless of configuration
const MAX_WORKERS: usize = 32;

/// Warn about CORS settings that are probably unintended (runs once)
fn validate_cors_config(cors_config: &CorsConfig) {
    let is_any_origin = cors_config.allowed_origins.iter().any(|o| o == "*");
    if is_any_origin && cors_config.allowed_origins.len() > 1 {
        warn!(
            "CORS allowed_origins contains '*' alongside explicit origins; \
            any origin will be allowed."
        );
    }
    if cors_config.allowed_origins.is_empty() {
        info!("CORS: no allowed origins configured, cross-origin requests are rejected");
    }
}

/// Build CORS middleware from configuration
pub(crate) fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();

    // Empty origins = same-origin only
    if cors_config.allowed_origins.is_empty() {
        return cors;
    }

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors.allowed_methods(vec!["GET", "HEAD", "POST", "DELETE"])
        .allowed_header(actix_web::http::header::CONTENT_TYPE)
        .allowed_header(actix_web::http::header::ACCEPT)
        .expose_headers(vec![actix_web::http::header::LOCATION])
        .max_age(3600)
}

/// Run the HTTP server until it stops or a shutdown signal arrives.
///
/// **Note**: Logging must be initialized before calling this function.
pub async fn run_server(config: StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let state = ApiState::new(startup.registry, config.server.base_url.clone());
    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    let workers = config.server.workers.clamp(1, MAX_WORKERS);
    info!("Using {} worker threads", workers);

    let server = HttpServer::new(move || {
        let state = state.clone();

        App::new()
            .wrap(build_cors_middleware(&cors_config))
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .configure(|cfg| state.configure(cfg))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .disable_signals()
    .workers(workers);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();
    warn!(
        "Starting server at http://{} (short links use {})",
        bind_address, config.server.base_url
    );

    let handle = server.handle();
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            handle.stop(true).await;
            warn!("Graceful shutdown: server stopped");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{HttpResponse, http::header, test, web};

    async fn allowed_origin_header(origins: &[&str], origin: &str) -> Option<String> {
        let cors_config = CorsConfig {
            allowed_origins: origins.iter().map(|s| s.to_string()).collect(),
        };
        let app = test::init_service(
            App::new()
                .wrap(build_cors_middleware(&cors_config))
                .route("/urls", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/urls")
            .insert_header((header::ORIGIN, origin))
            .to_request();
        let resp = test::try_call_service(&app, req).await.ok()?;
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    #[actix_web::test]
    async fn test_cors_explicit_origin_allowed() {
        let allowed = allowed_origin_header(&["http://ui.local"], "http://ui.local").await;
        assert_eq!(allowed.as_deref(), Some("http://ui.local"));
    }

    #[actix_web::test]
    async fn test_cors_unlisted_origin_rejected() {
        let allowed = allowed_origin_header(&["http://ui.local"], "http://evil.local").await;
        assert!(allowed.is_none());
    }

    #[actix_web::test]
    async fn test_cors_wildcard() {
        let allowed = allowed_origin_header(&["*"], "http://anything.local").await;
        assert!(allowed.is_some());
    }
}
