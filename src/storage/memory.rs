use async_trait::async_trait;
use parking_lot::RwLock;

use super::table::AliasTable;
use super::{InsertOutcome, Store, UrlMapping};
use crate::errors::Result;

/// Process-local store. Mutations take the write lock, so check-and-insert
/// is a single critical section.
#[derive(Default)]
pub struct MemoryStore {
    table: RwLock<AliasTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(AliasTable::new()),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_if_absent(&self, mapping: UrlMapping) -> Result<InsertOutcome> {
        Ok(self.table.write().insert_if_absent(mapping))
    }

    async fn get(&self, alias: &str) -> Result<Option<UrlMapping>> {
        Ok(self.table.read().get(alias).cloned())
    }

    async fn remove(&self, alias: &str) -> Result<bool> {
        Ok(self.table.write().retire(alias).is_some())
    }

    async fn list(&self) -> Result<Vec<UrlMapping>> {
        Ok(self.table.read().live())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.table.read().live_count())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
