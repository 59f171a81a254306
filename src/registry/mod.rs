//! Alias registry
//!
//! Owns alias allocation and the alias → URL mapping on top of a [`Store`].
//! Every mapping is created through a single atomic insert-if-absent, so
//! concurrent requests for the same alias resolve to exactly one winner.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::{RegistryError, Result};
use crate::storage::{InsertOutcome, Store, UrlMapping};
use crate::utils::validate_url;

pub mod alias;

pub use alias::{AliasPolicy, RESERVED_ROUTES};

pub struct AliasRegistry {
    store: Arc<dyn Store>,
    policy: AliasPolicy,
}

impl AliasRegistry {
    pub fn new(store: Arc<dyn Store>, policy: AliasPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &AliasPolicy {
        &self.policy
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Create a mapping for `full_url`.
    ///
    /// A blank `custom_alias` counts as absent and triggers generation.
    pub async fn shorten(&self, full_url: &str, custom_alias: Option<&str>) -> Result<UrlMapping> {
        let full_url = validate_url(full_url)
            .map_err(|e| RegistryError::invalid_url(e.to_string()))?;

        match custom_alias.map(str::trim).filter(|a| !a.is_empty()) {
            Some(alias) => self.claim_custom(alias, full_url).await,
            None => self.claim_generated(full_url).await,
        }
    }

    async fn claim_custom(&self, alias: &str, full_url: &str) -> Result<UrlMapping> {
        self.policy.validate_custom(alias)?;

        let mapping = UrlMapping::new(alias, full_url);
        match self.store.insert_if_absent(mapping.clone()).await? {
            InsertOutcome::Inserted => {
                info!("Registry: created '{}' -> '{}'", mapping.alias, mapping.full_url);
                Ok(mapping)
            }
            InsertOutcome::Taken => {
                debug!("Registry: custom alias '{}' already taken", alias);
                Err(RegistryError::alias_taken(format!(
                    "Alias '{}' is already in use",
                    alias
                )))
            }
        }
    }

    async fn claim_generated(&self, full_url: &str) -> Result<UrlMapping> {
        let attempts = self.policy.max_retries();

        for attempt in 1..=attempts {
            let candidate = self.policy.generate();
            if self.policy.is_reserved(&candidate) {
                debug!("Registry: generated reserved alias '{}', redrawing", candidate);
                continue;
            }

            let mapping = UrlMapping::new(candidate, full_url);
            match self.store.insert_if_absent(mapping.clone()).await? {
                InsertOutcome::Inserted => {
                    info!(
                        "Registry: created '{}' -> '{}' (attempt {})",
                        mapping.alias, mapping.full_url, attempt
                    );
                    return Ok(mapping);
                }
                InsertOutcome::Taken => {
                    debug!(
                        "Registry: collision on '{}' (attempt {}/{})",
                        mapping.alias, attempt, attempts
                    );
                }
            }
        }

        warn!(
            alias_length = self.policy.generated_length(),
            attempts,
            space = %self.policy.space_size(),
            "Alias generation exhausted; the alias space at this length may be saturated"
        );
        Err(RegistryError::alias_generation_exhausted(format!(
            "Failed to generate a unique alias after {} attempts",
            attempts
        )))
    }

    /// Look up the URL behind a live alias.
    pub async fn resolve(&self, alias: &str) -> Result<String> {
        // Malformed aliases can never be live; skip the store.
        if !self.policy.is_well_formed(alias) {
            return Err(not_found(alias));
        }
        self.store
            .get(alias)
            .await?
            .map(|m| m.full_url)
            .ok_or_else(|| not_found(alias))
    }

    /// Live mappings, oldest first.
    pub async fn list(&self) -> Result<Vec<UrlMapping>> {
        self.store.list().await
    }

    /// Retire a live alias. It is never handed out again.
    pub async fn delete(&self, alias: &str) -> Result<()> {
        if !self.policy.is_well_formed(alias) {
            return Err(not_found(alias));
        }
        if self.store.remove(alias).await? {
            info!("Registry: deleted '{}'", alias);
            Ok(())
        } else {
            Err(not_found(alias))
        }
    }

    pub async fn count(&self) -> Result<usize> {
        self.store.count().await
    }
}

fn not_found(alias: &str) -> RegistryError {
    RegistryError::not_found(format!("Alias '{}' not found", alias))
}
