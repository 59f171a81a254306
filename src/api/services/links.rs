use std::sync::Arc;

use actix_web::{HttpResponse, web};
use tracing::{debug, trace};

use crate::api::errors::ApiError;
use crate::api::types::{MessageResponse, ShortenRequest, ShortenResponse, UrlEntry};
use crate::api::BaseUrl;
use crate::registry::AliasRegistry;

/// Link management: create, list and delete.
pub struct LinkService;

impl LinkService {
    pub async fn shorten(
        registry: web::Data<Arc<AliasRegistry>>,
        base_url: web::Data<BaseUrl>,
        body: web::Json<ShortenRequest>,
    ) -> Result<HttpResponse, ApiError> {
        let req = body.into_inner();
        trace!(
            "Received shorten request: fullUrl={:?}, customAlias={:?}",
            req.full_url, req.custom_alias
        );

        let mapping = registry
            .shorten(
                req.full_url.as_deref().unwrap_or_default(),
                req.custom_alias.as_deref(),
            )
            .await?;

        Ok(HttpResponse::Created().json(ShortenResponse::from_mapping(mapping, base_url.as_str())))
    }

    pub async fn list(
        registry: web::Data<Arc<AliasRegistry>>,
        base_url: web::Data<BaseUrl>,
    ) -> Result<HttpResponse, ApiError> {
        let entries: Vec<UrlEntry> = registry
            .list()
            .await?
            .into_iter()
            .map(|m| UrlEntry::from_mapping(m, base_url.as_str()))
            .collect();

        debug!("Listing {} aliases", entries.len());
        Ok(HttpResponse::Ok().json(entries))
    }

    pub async fn delete(
        registry: web::Data<Arc<AliasRegistry>>,
        path: web::Path<String>,
    ) -> Result<HttpResponse, ApiError> {
        let alias = path.into_inner();
        registry.delete(&alias).await?;

        Ok(HttpResponse::Ok().json(MessageResponse {
            message: format!("Alias '{}' deleted", alias),
        }))
    }
}

/// `POST /shorten` and `GET /urls`
pub fn link_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/shorten").route(web::post().to(LinkService::shorten)))
        .service(web::resource("/urls").route(web::get().to(LinkService::list)));
}
