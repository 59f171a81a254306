//! Store backend tests
//!
//! Both backends must agree on insert-if-absent, retirement and listing
//! order; the file backend must also carry all of it across a reopen.

use std::sync::Arc;

use shortalias::config::StoreConfig;
use shortalias::errors::RegistryError;
use shortalias::storage::{
    FileStore, InsertOutcome, MemoryStore, Store, StoreFactory, UrlMapping,
};
use tempfile::TempDir;

// =============================================================================
// Shared behaviour
// =============================================================================

async fn check_insert_and_retire(store: &dyn Store) {
    let first = UrlMapping::new("abc", "https://example.com/1");
    assert_eq!(
        store.insert_if_absent(first.clone()).await.unwrap(),
        InsertOutcome::Inserted
    );
    assert_eq!(
        store
            .insert_if_absent(UrlMapping::new("abc", "https://example.com/2"))
            .await
            .unwrap(),
        InsertOutcome::Taken
    );
    assert_eq!(store.get("abc").await.unwrap(), Some(first));

    assert!(store.remove("abc").await.unwrap());
    assert!(!store.remove("abc").await.unwrap());
    assert_eq!(store.get("abc").await.unwrap(), None);
    assert_eq!(
        store
            .insert_if_absent(UrlMapping::new("abc", "https://example.com/3"))
            .await
            .unwrap(),
        InsertOutcome::Taken
    );
    assert_eq!(store.count().await.unwrap(), 0);
}

async fn check_list_order(store: &dyn Store) {
    for alias in ["zeta", "alpha", "mid", "beta"] {
        store
            .insert_if_absent(UrlMapping::new(alias, format!("https://example.com/{}", alias)))
            .await
            .unwrap();
    }
    store.remove("mid").await.unwrap();

    let aliases: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.alias)
        .collect();
    assert_eq!(aliases, ["zeta", "alpha", "beta"]);
    assert_eq!(store.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_memory_insert_and_retire() {
    check_insert_and_retire(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_memory_list_order() {
    check_list_order(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_file_insert_and_retire() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path().join("aliases.json")).unwrap();
    check_insert_and_retire(&store).await;
}

#[tokio::test]
async fn test_file_list_order() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path().join("aliases.json")).unwrap();
    check_list_order(&store).await;
}

// =============================================================================
// FileStore persistence
// =============================================================================

#[tokio::test]
async fn test_file_reopen_preserves_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("aliases.json");

    {
        let store = FileStore::open(&path).unwrap();
        check_list_order(&store).await;
    }

    let store = FileStore::open(&path).unwrap();
    let aliases: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.alias)
        .collect();
    assert_eq!(aliases, ["zeta", "alpha", "beta"]);
    assert_eq!(
        store.get("alpha").await.unwrap().map(|m| m.full_url),
        Some("https://example.com/alpha".to_string())
    );

    // Retired before the restart, still retired after it
    assert_eq!(
        store
            .insert_if_absent(UrlMapping::new("mid", "https://example.com/again"))
            .await
            .unwrap(),
        InsertOutcome::Taken
    );

    // New inserts land after the reloaded ones
    store
        .insert_if_absent(UrlMapping::new("omega", "https://example.com/omega"))
        .await
        .unwrap();
    let last = store.list().await.unwrap().pop().unwrap();
    assert_eq!(last.alias, "omega");
}

#[tokio::test]
async fn test_file_open_creates_missing_file_and_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("aliases.json");

    let store = FileStore::open(&path).unwrap();
    assert!(path.exists());
    assert_eq!(store.path(), path.as_path());
    assert_eq!(store.count().await.unwrap(), 0);
}

#[test]
fn test_file_open_rejects_corrupt_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("aliases.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    match FileStore::open(&path) {
        Err(RegistryError::Storage(msg)) => assert!(msg.contains("aliases.json")),
        Err(other) => panic!("unexpected error: {:?}", other),
        Ok(_) => panic!("corrupt snapshot accepted"),
    }
}

// =============================================================================
// Factory
// =============================================================================

#[test]
fn test_factory_backends() {
    let dir = TempDir::new().unwrap();

    let memory = StoreFactory::create(&StoreConfig {
        backend: "memory".to_string(),
        path: String::new(),
    })
    .unwrap();
    assert_eq!(memory.backend_name(), "memory");

    let file = StoreFactory::create(&StoreConfig {
        backend: "file".to_string(),
        path: dir.path().join("a.json").to_string_lossy().into_owned(),
    })
    .unwrap();
    assert_eq!(file.backend_name(), "file");

    let unknown = StoreFactory::create(&StoreConfig {
        backend: "redis".to_string(),
        path: String::new(),
    });
    assert!(matches!(unknown, Err(RegistryError::Config(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_one_winner() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .insert_if_absent(UrlMapping::new("same", format!("https://example.com/{}", i)))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut inserted = 0;
    for handle in handles {
        if handle.await.unwrap() == InsertOutcome::Inserted {
            inserted += 1;
        }
    }
    assert_eq!(inserted, 1);
}
