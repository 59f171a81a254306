//! RegistryError → HTTP response mapping
//!
//! Input errors are scoped to the request field they concern
//! (`{"fullUrl": ..}`, `{"customAlias": ..}`); everything else uses
//! `{"error": ..}`.

use std::collections::HashMap;
use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::{error, warn};

use crate::errors::RegistryError;

pub const FULL_URL_FIELD: &str = "fullUrl";
pub const CUSTOM_ALIAS_FIELD: &str = "customAlias";
pub const ERROR_FIELD: &str = "error";

pub const INVALID_URL_MESSAGE: &str = "must be a valid absolute URL";
pub const ALIAS_TAKEN_MESSAGE: &str = "Alias already exists";
pub const RESERVED_ALIAS_MESSAGE: &str = "reserved alias";
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug)]
pub struct ApiError(pub RegistryError);

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        ApiError(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ApiError {
    /// Body field and message for this error.
    fn body(&self) -> (&'static str, String) {
        match &self.0 {
            RegistryError::InvalidUrl(_) => (FULL_URL_FIELD, INVALID_URL_MESSAGE.to_string()),
            RegistryError::InvalidAliasFormat(msg) => (CUSTOM_ALIAS_FIELD, msg.clone()),
            RegistryError::ReservedAlias(_) => {
                (CUSTOM_ALIAS_FIELD, RESERVED_ALIAS_MESSAGE.to_string())
            }
            RegistryError::AliasTaken(_) => (CUSTOM_ALIAS_FIELD, ALIAS_TAKEN_MESSAGE.to_string()),
            RegistryError::AliasGenerationExhausted(msg) | RegistryError::NotFound(msg) => {
                (ERROR_FIELD, msg.clone())
            }
            RegistryError::Storage(_) | RegistryError::Config(_) => {
                (ERROR_FIELD, INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            RegistryError::InvalidUrl(_)
            | RegistryError::InvalidAliasFormat(_)
            | RegistryError::ReservedAlias(_)
            | RegistryError::AliasTaken(_)
            | RegistryError::AliasGenerationExhausted(_) => StatusCode::BAD_REQUEST,
            RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
            RegistryError::Storage(_) | RegistryError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match &self.0 {
            RegistryError::Storage(_) | RegistryError::Config(_) => {
                error!("API: internal error: {}", self.0)
            }
            RegistryError::AliasGenerationExhausted(_) => warn!("API: {}", self.0),
            _ => {}
        }

        let (field, message) = self.body();
        HttpResponse::build(self.status_code()).json(HashMap::from([(field, message)]))
    }
}

/// `{"error": message}` with the given status.
pub fn error_body(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(HashMap::from([(ERROR_FIELD, message.into())]))
}
