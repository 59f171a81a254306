use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::StoreConfig;
use crate::errors::{RegistryError, Result};

pub mod file;
pub mod memory;
pub mod models;
mod table;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use models::{InsertOutcome, UrlMapping};

/// Persistence seam for the alias registry.
///
/// `insert_if_absent` is the only way to create a mapping and must be atomic
/// with respect to every other mutation: of two concurrent inserts for the
/// same alias exactly one observes `Inserted`. Aliases removed with
/// `remove` are retired and reported `Taken` from then on.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_if_absent(&self, mapping: UrlMapping) -> Result<InsertOutcome>;
    async fn get(&self, alias: &str) -> Result<Option<UrlMapping>>;
    /// Retire a live alias. `Ok(false)` if it was not live.
    async fn remove(&self, alias: &str) -> Result<bool>;
    /// Consistent snapshot of live mappings, oldest first.
    async fn list(&self) -> Result<Vec<UrlMapping>>;
    async fn count(&self) -> Result<usize>;
    fn backend_name(&self) -> &'static str;
}

pub struct StoreFactory;

impl StoreFactory {
    pub fn create(config: &StoreConfig) -> Result<Arc<dyn Store>> {
        match config.backend.as_str() {
            "memory" => {
                info!("Using in-memory alias store");
                Ok(Arc::new(MemoryStore::new()))
            }
            "file" => {
                info!("Using file alias store at {}", config.path);
                Ok(Arc::new(FileStore::open(&config.path)?))
            }
            other => {
                error!("Unknown store backend: {}", other);
                Err(RegistryError::config(format!(
                    "Unknown store backend: {}. Supported: memory, file",
                    other
                )))
            }
        }
    }
}
