//! HTTP surface
//!
//! Thin JSON handlers over [`AliasRegistry`]. Route registration order
//! matters: `/health/*`, `/shorten` and `/urls` must be matched before the
//! `/{alias}` catch-all.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{error::InternalError, web};
use tracing::debug;

use crate::registry::AliasRegistry;

pub mod errors;
pub mod services;
pub mod types;

use services::{AppStartTime, alias_routes, health_routes, link_routes};

/// Largest accepted JSON request body.
pub const JSON_BODY_LIMIT: usize = 64 * 1024;

/// Public base URL that short links are built from.
#[derive(Clone, Debug)]
pub struct BaseUrl(String);

impl BaseUrl {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self(base_url.into().trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Shared state handed to every worker.
#[derive(Clone)]
pub struct ApiState {
    pub registry: Arc<AliasRegistry>,
    pub base_url: BaseUrl,
    pub start_time: AppStartTime,
}

impl ApiState {
    pub fn new(registry: Arc<AliasRegistry>, base_url: impl Into<String>) -> Self {
        Self {
            registry,
            base_url: BaseUrl::new(base_url),
            start_time: AppStartTime::now(),
        }
    }

    /// Register app data and all routes.
    pub fn configure(self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.registry))
            .app_data(web::Data::new(self.base_url))
            .app_data(web::Data::new(self.start_time));
        configure_routes(cfg);
    }
}

/// Malformed or non-JSON bodies answer `400 {"error": ..}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            debug!("Rejected request body: {}", err);
            let response =
                errors::error_body(StatusCode::BAD_REQUEST, format!("Invalid request body: {}", err));
            InternalError::from_response(err, response).into()
        })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health_routes())
        .configure(link_routes)
        .service(alias_routes());
}
