//! Keyed JSON document storage.
//!
//! Every persisted entity lives in a [`Namespace`]: a collection inside the
//! `(product, user)` [`Scope`]. Backends only move `serde_json::Value`s around;
//! typed repositories sit on top of them.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::Result;

/// The `(productId, userId)` pair that owns sessions, templates and usage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    pub product_id: String,
    pub user_id: String,
}

impl Scope {
    pub fn new(product_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            user_id: user_id.into(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.product_id, self.user_id)
    }
}

/// Kinds of documents kept per scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
    Sessions,
    Templates,
    Usage,
}

/// A collection within a scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace<'a> {
    pub scope: &'a Scope,
    pub collection: Collection,
}

impl<'a> Namespace<'a> {
    pub fn new(scope: &'a Scope, collection: Collection) -> Self {
        Self { scope, collection }
    }

    pub fn sessions(scope: &'a Scope) -> Self {
        Self::new(scope, Collection::Sessions)
    }

    pub fn templates(scope: &'a Scope) -> Self {
        Self::new(scope, Collection::Templates)
    }

    pub fn usage(scope: &'a Scope) -> Self {
        Self::new(scope, Collection::Usage)
    }
}

impl fmt::Display for Namespace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scope, self.collection)
    }
}

/// Read-modify-write step for [`DocumentStore::update`]. Receives the current
/// document and returns its replacement, or `None` to keep it.
pub type DocumentUpdate = Box<dyn FnOnce(Option<&Value>) -> Result<Option<Value>> + Send>;

/// Backend for keyed JSON documents.
///
/// `put` replaces the whole document (last writer wins). `delete` reports
/// whether a document was actually removed. `update` is atomic against every
/// other writer of the same key, including other processes sharing the
/// backend.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, ns: &Namespace<'_>, key: &str) -> Result<Option<Value>>;

    /// All documents of the namespace as `(key, document)` pairs.
    async fn list(&self, ns: &Namespace<'_>) -> Result<Vec<(String, Value)>>;

    async fn put(&self, ns: &Namespace<'_>, key: &str, document: Value) -> Result<()>;

    async fn delete(&self, ns: &Namespace<'_>, key: &str) -> Result<bool>;

    /// Applies `f` to the current document and stores what it returns.
    /// Returns the document `f` saw.
    async fn update(
        &self,
        ns: &Namespace<'_>,
        key: &str,
        f: DocumentUpdate,
    ) -> Result<Option<Value>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_display() {
        let scope = Scope::new("auto-rewrite", "alice");
        assert_eq!(Namespace::usage(&scope).to_string(), "auto-rewrite/alice/usage");
        assert_eq!(Collection::Templates.to_string(), "templates");
    }
}
