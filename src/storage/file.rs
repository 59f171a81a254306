use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::table::AliasTable;
use super::{InsertOutcome, Store, UrlMapping};
use crate::errors::{RegistryError, Result};

/// On-disk snapshot layout.
#[derive(Serialize, Deserialize, Default)]
struct Snapshot {
    #[serde(default)]
    live: Vec<UrlMapping>,
    #[serde(default)]
    retired: Vec<String>,
}

/// JSON-file backed store.
///
/// State lives in memory like [`super::MemoryStore`]; every mutation rewrites
/// the snapshot while the write lock is held, so the file always reflects a
/// prefix of the mutation order. Retired aliases are persisted and stay
/// unavailable across restarts.
pub struct FileStore {
    path: PathBuf,
    table: RwLock<AliasTable>,
}

impl FileStore {
    /// Open or create the snapshot at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let table = match fs::read_to_string(&path) {
            Ok(content) => {
                let snapshot: Snapshot = serde_json::from_str(&content).map_err(|e| {
                    error!("Failed to parse alias file {}: {}", path.display(), e);
                    RegistryError::storage(format!(
                        "Failed to parse alias file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                info!(
                    "Loaded {} aliases ({} retired) from {}",
                    snapshot.live.len(),
                    snapshot.retired.len(),
                    path.display()
                );
                AliasTable::from_parts(snapshot.live, snapshot.retired)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Alias file {} not found, starting empty", path.display());
                let table = AliasTable::new();
                write_snapshot(&path, &table)?;
                table
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_snapshot(path: &Path, table: &AliasTable) -> Result<()> {
    let snapshot = Snapshot {
        live: table.live(),
        retired: table.retired(),
    };
    let json = serde_json::to_string_pretty(&snapshot)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }

    // 写临时文件再 rename，避免半写入的快照
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[async_trait]
impl Store for FileStore {
    async fn insert_if_absent(&self, mapping: UrlMapping) -> Result<InsertOutcome> {
        let mut table = self.table.write();
        let alias = mapping.alias.clone();

        if table.insert_if_absent(mapping) == InsertOutcome::Taken {
            return Ok(InsertOutcome::Taken);
        }

        if let Err(e) = write_snapshot(&self.path, &table) {
            error!("Failed to persist alias '{}': {}", alias, e);
            table.forget(&alias);
            return Err(e);
        }
        Ok(InsertOutcome::Inserted)
    }

    async fn get(&self, alias: &str) -> Result<Option<UrlMapping>> {
        Ok(self.table.read().get(alias).cloned())
    }

    async fn remove(&self, alias: &str) -> Result<bool> {
        let mut table = self.table.write();

        let Some((seq, mapping)) = table.retire(alias) else {
            return Ok(false);
        };

        if let Err(e) = write_snapshot(&self.path, &table) {
            error!("Failed to persist removal of '{}': {}", alias, e);
            table.restore(seq, mapping);
            return Err(e);
        }
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<UrlMapping>> {
        Ok(self.table.read().live())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.table.read().live_count())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
