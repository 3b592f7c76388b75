//! File-per-record document store.
//!
//! Directory layout:
//! ```text
//! <root>/
//! └── <product>/
//!     ├── sessions-<user>/
//!     │   └── sess_….json
//!     ├── templates-<user>/
//!     │   └── tmpl_….json
//!     └── usage-<user>/
//!         └── daily.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use prism_core::error::{PrismError, Result};
use prism_core::{DocumentStore, DocumentUpdate, Namespace};
use serde_json::Value;
use tokio::task;
use tracing::{debug, warn};

use super::atomic_file::AtomicFile;

const EXTENSION: &str = "json";

/// Stores each document as `<key>.json`, written atomically.
#[derive(Debug, Clone)]
pub struct DirDocumentStore {
    root: PathBuf,
}

impl DirDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one namespace.
    pub fn namespace_dir(&self, ns: &Namespace<'_>) -> Result<PathBuf> {
        let product = checked_segment(&ns.scope.product_id)?;
        let user = checked_segment(&ns.scope.user_id)?;
        Ok(self
            .root
            .join(product)
            .join(format!("{}-{}", ns.collection, user)))
    }

    fn document_path(&self, ns: &Namespace<'_>, key: &str) -> Result<PathBuf> {
        let key = checked_segment(key)?;
        Ok(self.namespace_dir(ns)?.join(format!("{}.{}", key, EXTENSION)))
    }

    fn list_sync(dir: &Path) -> Result<Vec<(String, Value)>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(key) = document_key(&path) else {
                continue;
            };
            match AtomicFile::<Value>::json(path.clone()).load() {
                Ok(Some(document)) => documents.push((key, document)),
                Ok(None) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable document"),
            }
        }
        documents.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(documents)
    }
}

/// Rejects ids that would escape their directory or collide with the
/// hidden temp and lock files.
fn checked_segment(segment: &str) -> Result<&str> {
    let valid = !segment.is_empty()
        && !segment.starts_with('.')
        && !segment.contains(['/', '\\'])
        && segment != "..";
    if valid {
        Ok(segment)
    } else {
        Err(PrismError::data_access(format!(
            "Invalid storage key '{}'",
            segment
        )))
    }
}

/// Key of a visible `*.json` file.
fn document_key(path: &Path) -> Option<String> {
    if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.starts_with('.'))
        .map(str::to_string)
}

fn join_error(e: task::JoinError) -> PrismError {
    PrismError::internal(format!("Blocking storage task failed: {}", e))
}

#[async_trait]
impl DocumentStore for DirDocumentStore {
    async fn get(&self, ns: &Namespace<'_>, key: &str) -> Result<Option<Value>> {
        let path = self.document_path(ns, key)?;
        debug!(path = %path.display(), "Loading document");

        task::spawn_blocking(move || -> Result<Option<Value>> {
            Ok(AtomicFile::<Value>::json(path).load()?)
        })
        .await
        .map_err(join_error)?
    }

    async fn list(&self, ns: &Namespace<'_>) -> Result<Vec<(String, Value)>> {
        let dir = self.namespace_dir(ns)?;
        debug!(dir = %dir.display(), "Listing documents");

        task::spawn_blocking(move || Self::list_sync(&dir))
            .await
            .map_err(join_error)?
    }

    async fn put(&self, ns: &Namespace<'_>, key: &str, document: Value) -> Result<()> {
        let path = self.document_path(ns, key)?;
        debug!(path = %path.display(), "Saving document");

        task::spawn_blocking(move || -> Result<()> {
            Ok(AtomicFile::<Value>::json(path).save_locked(&document)?)
        })
        .await
        .map_err(join_error)?
    }

    async fn delete(&self, ns: &Namespace<'_>, key: &str) -> Result<bool> {
        let path = self.document_path(ns, key)?;
        debug!(path = %path.display(), "Deleting document");

        task::spawn_blocking(move || -> Result<bool> {
            if !path.exists() {
                return Ok(false);
            }
            Ok(AtomicFile::<Value>::json(path).remove()?)
        })
        .await
        .map_err(join_error)?
    }

    async fn update(
        &self,
        ns: &Namespace<'_>,
        key: &str,
        f: DocumentUpdate,
    ) -> Result<Option<Value>> {
        let path = self.document_path(ns, key)?;
        debug!(path = %path.display(), "Updating document");

        task::spawn_blocking(move || AtomicFile::<Value>::json(path).update(f))
            .await
            .map_err(join_error)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::Scope;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup() -> (TempDir, DirDocumentStore, Scope) {
        let dir = TempDir::new().unwrap();
        let store = DirDocumentStore::new(dir.path());
        (dir, store, Scope::new("auto-rewrite", "alice"))
    }

    #[tokio::test]
    async fn test_round_trip_uses_layout() {
        let (dir, store, scope) = setup();
        let ns = Namespace::sessions(&scope);

        store.put(&ns, "sess_1", json!({ "id": "sess_1" })).await.unwrap();

        let file = dir.path().join("auto-rewrite/sessions-alice/sess_1.json");
        assert!(file.exists());
        assert_eq!(
            store.get(&ns, "sess_1").await.unwrap(),
            Some(json!({ "id": "sess_1" }))
        );
        assert_eq!(store.get(&ns, "sess_2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_usage_path() {
        let (dir, store, scope) = setup();
        store
            .put(&Namespace::usage(&scope), "daily", json!({ "count": 1, "date": "2024-01-01" }))
            .await
            .unwrap();
        assert!(dir.path().join("auto-rewrite/usage-alice/daily.json").exists());
    }

    #[tokio::test]
    async fn test_list_skips_hidden_and_corrupt_files() {
        let (dir, store, scope) = setup();
        let ns = Namespace::templates(&scope);
        store.put(&ns, "tmpl_b", json!({ "n": 2 })).await.unwrap();
        store.put(&ns, "tmpl_a", json!({ "n": 1 })).await.unwrap();

        let ns_dir = dir.path().join("auto-rewrite/templates-alice");
        fs::write(ns_dir.join("broken.json"), "{ not json").unwrap();
        fs::write(ns_dir.join("notes.txt"), "ignored").unwrap();

        let listed = store.list(&ns).await.unwrap();
        let keys: Vec<&str> = listed.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["tmpl_a", "tmpl_b"]);
    }

    #[tokio::test]
    async fn test_list_missing_namespace_is_empty() {
        let (_dir, store, scope) = setup();
        assert!(store.list(&Namespace::sessions(&scope)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_dir, store, scope) = setup();
        let ns = Namespace::sessions(&scope);
        store.put(&ns, "sess_1", json!({})).await.unwrap();

        assert!(store.delete(&ns, "sess_1").await.unwrap());
        assert!(!store.delete(&ns, "sess_1").await.unwrap());
    }

    #[tokio::test]
    async fn test_put_leaves_no_temp_files() {
        let (dir, store, scope) = setup();
        let ns = Namespace::sessions(&scope);
        for i in 0..3 {
            store.put(&ns, "sess_1", json!({ "v": i })).await.unwrap();
        }

        let names: Vec<String> = fs::read_dir(dir.path().join("auto-rewrite/sessions-alice"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.ends_with(".tmp"))
            .collect();
        assert!(names.is_empty(), "{names:?}");
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let (_dir, store, scope) = setup();
        let ns = Namespace::sessions(&scope);
        assert!(store.put(&ns, "../escape", json!({})).await.is_err());
        assert!(store.get(&ns, ".hidden").await.is_err());

        let sneaky = Scope::new("..", "alice");
        assert!(store.list(&Namespace::sessions(&sneaky)).await.is_err());
    }

    fn increment(current: Option<&Value>) -> Result<Option<Value>> {
        let count = current.and_then(|v| v["count"].as_u64()).unwrap_or(0);
        Ok(Some(json!({ "count": count + 1 })))
    }

    #[tokio::test]
    async fn test_update_returns_previous_document() {
        let (_dir, store, scope) = setup();
        let ns = Namespace::usage(&scope);

        assert_eq!(store.update(&ns, "daily", Box::new(increment)).await.unwrap(), None);
        assert_eq!(
            store.update(&ns, "daily", Box::new(increment)).await.unwrap(),
            Some(json!({ "count": 1 }))
        );
        assert_eq!(store.get(&ns, "daily").await.unwrap(), Some(json!({ "count": 2 })));

        let kept = store.update(&ns, "daily", Box::new(|_: Option<&Value>| Ok(None))).await.unwrap();
        assert_eq!(kept, Some(json!({ "count": 2 })));
        assert_eq!(store.get(&ns, "daily").await.unwrap(), Some(json!({ "count": 2 })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_update_is_atomic_across_store_instances() {
        let dir = TempDir::new().unwrap();
        let scope = Scope::new("auto-rewrite", "alice");

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = DirDocumentStore::new(dir.path());
                let scope = scope.clone();
                tokio::spawn(async move {
                    store
                        .update(&Namespace::usage(&scope), "daily", Box::new(increment))
                        .await
                        .unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let store = DirDocumentStore::new(dir.path());
        assert_eq!(
            store.get(&Namespace::usage(&scope), "daily").await.unwrap(),
            Some(json!({ "count": 16 }))
        );
    }
}
