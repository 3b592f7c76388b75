//! Typed access to a document collection.

use std::marker::PhantomData;
use std::sync::Arc;

use prism_core::error::Result;
use prism_core::{Collection, DocumentStore, Namespace, Scope};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::warn;

/// Decodes documents of one collection into `T`.
pub(crate) struct TypedCollection<T> {
    store: Arc<dyn DocumentStore>,
    collection: Collection,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> TypedCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub(crate) fn new(store: Arc<dyn DocumentStore>, collection: Collection) -> Self {
        Self {
            store,
            collection,
            _phantom: PhantomData,
        }
    }

    pub(crate) async fn get(&self, scope: &Scope, key: &str) -> Result<Option<T>> {
        let ns = Namespace::new(scope, self.collection);
        match self.store.get(&ns, key).await? {
            Some(document) => Ok(Some(serde_json::from_value(document)?)),
            None => Ok(None),
        }
    }

    /// Every decodable document. Records that fail to decode are logged and
    /// left out.
    pub(crate) async fn list(&self, scope: &Scope) -> Result<Vec<T>> {
        let ns = Namespace::new(scope, self.collection);
        let documents = self.store.list(&ns).await?;

        let mut items = Vec::with_capacity(documents.len());
        for (key, document) in documents {
            match serde_json::from_value(document) {
                Ok(item) => items.push(item),
                Err(e) => warn!(namespace = %ns, key, error = %e, "Skipping corrupt record"),
            }
        }
        Ok(items)
    }

    pub(crate) async fn put(&self, scope: &Scope, key: &str, item: &T) -> Result<()> {
        let ns = Namespace::new(scope, self.collection);
        self.store.put(&ns, key, serde_json::to_value(item)?).await
    }

    /// Atomic read-modify-write of one document. `f` returns the replacement,
    /// or `None` to keep the current item. Returns the item `f` saw.
    pub(crate) async fn update<F>(&self, scope: &Scope, key: &str, f: F) -> Result<Option<T>>
    where
        F: FnOnce(Option<T>) -> Option<T> + Send + 'static,
        T: 'static,
    {
        let ns = Namespace::new(scope, self.collection);
        let previous = self
            .store
            .update(
                &ns,
                key,
                Box::new(move |current: Option<&Value>| -> Result<Option<Value>> {
                    let current = current.cloned().map(serde_json::from_value).transpose()?;
                    match f(current) {
                        Some(next) => Ok(Some(serde_json::to_value(&next)?)),
                        None => Ok(None),
                    }
                }),
            )
            .await?;
        Ok(previous.map(serde_json::from_value).transpose()?)
    }

    pub(crate) async fn delete(&self, scope: &Scope, key: &str) -> Result<bool> {
        let ns = Namespace::new(scope, self.collection);
        self.store.delete(&ns, key).await
    }
}
