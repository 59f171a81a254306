use std::sync::Arc;

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use tracing::{debug, trace};

use super::links::LinkService;
use crate::api::errors::ApiError;
use crate::errors::RegistryError;
use crate::registry::AliasRegistry;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        registry: web::Data<Arc<AliasRegistry>>,
        path: web::Path<String>,
    ) -> Result<HttpResponse, ApiError> {
        let alias = path.into_inner();

        match registry.resolve(&alias).await {
            Ok(full_url) => {
                trace!("Redirecting '{}' -> '{}'", alias, full_url);
                Ok(HttpResponse::Found()
                    .insert_header((header::LOCATION, full_url))
                    .finish())
            }
            Err(e @ RegistryError::NotFound(_)) => {
                debug!("Redirect miss for '{}'", alias);
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// `/{alias}`: GET/HEAD redirect, DELETE retires.
///
/// Must be registered after every fixed top-level route.
pub fn alias_routes() -> actix_web::Resource {
    web::resource("/{alias}")
        .route(web::get().to(RedirectService::handle_redirect))
        .route(web::head().to(RedirectService::handle_redirect))
        .route(web::delete().to(LinkService::delete))
}
