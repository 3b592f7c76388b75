//! In-process document store for tests and ephemeral runs.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use prism_core::error::Result;
use prism_core::{Collection, DocumentStore, DocumentUpdate, Namespace, Scope};
use serde_json::Value;
use tokio::sync::RwLock;

type Bucket = BTreeMap<String, Value>;

/// Keeps every namespace in a map guarded by an async lock.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    buckets: RwLock<HashMap<(Scope, Collection), Bucket>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn bucket_key(ns: &Namespace<'_>) -> (Scope, Collection) {
    (ns.scope.clone(), ns.collection)
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, ns: &Namespace<'_>, key: &str) -> Result<Option<Value>> {
        let buckets = self.buckets.read().await;
        Ok(buckets
            .get(&bucket_key(ns))
            .and_then(|bucket| bucket.get(key))
            .cloned())
    }

    async fn list(&self, ns: &Namespace<'_>) -> Result<Vec<(String, Value)>> {
        let buckets = self.buckets.read().await;
        Ok(buckets
            .get(&bucket_key(ns))
            .map(|bucket| {
                bucket
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn put(&self, ns: &Namespace<'_>, key: &str, document: Value) -> Result<()> {
        let mut buckets = self.buckets.write().await;
        buckets
            .entry(bucket_key(ns))
            .or_default()
            .insert(key.to_string(), document);
        Ok(())
    }

    async fn delete(&self, ns: &Namespace<'_>, key: &str) -> Result<bool> {
        let mut buckets = self.buckets.write().await;
        Ok(buckets
            .get_mut(&bucket_key(ns))
            .and_then(|bucket| bucket.remove(key))
            .is_some())
    }

    async fn update(
        &self,
        ns: &Namespace<'_>,
        key: &str,
        f: DocumentUpdate,
    ) -> Result<Option<Value>> {
        let mut buckets = self.buckets.write().await;
        let bucket = buckets.entry(bucket_key(ns)).or_default();
        let current = bucket.get(key).cloned();
        if let Some(next) = f(current.as_ref())? {
            bucket.insert(key.to_string(), next);
        }
        Ok(current)
    }
}
