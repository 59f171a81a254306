use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::StaticConfig;
use crate::registry::{AliasPolicy, AliasRegistry};
use crate::storage::StoreFactory;

pub struct StartupContext {
    pub registry: Arc<AliasRegistry>,
}

/// Build the alias policy and the store, and wire them into a registry.
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let policy = AliasPolicy::from_config(&config.alias).context("Invalid alias settings")?;
    debug!(
        "Alias policy: generated length {}, {} attempts, {} candidates",
        policy.generated_length(),
        policy.max_retries(),
        policy.space_size()
    );

    let store = StoreFactory::create(&config.store).context("Failed to create store backend")?;
    let registry = Arc::new(AliasRegistry::new(store, policy));

    let links = registry
        .count()
        .await
        .context("Failed to read from store backend")?;
    info!(
        "Using store backend: {} ({} live aliases)",
        registry.backend_name(),
        links
    );

    debug!("Pre-startup processing completed in {:?}", start_time.elapsed());
    Ok(StartupContext { registry })
}
