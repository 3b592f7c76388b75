//! Daily usage stored as a single JSON document per scope.

use std::sync::Arc;

use async_trait::async_trait;
use prism_core::error::Result;
use prism_core::usage::{UsageRecord, UsageRepository, UsageUpdate};
use prism_core::{Collection, DocumentStore, Scope};

use crate::repository::TypedCollection;

/// Key of the one usage document in each scope.
pub const USAGE_KEY: &str = "daily";

pub struct DocumentUsageRepository {
    usage: TypedCollection<UsageRecord>,
}

impl DocumentUsageRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            usage: TypedCollection::new(store, Collection::Usage),
        }
    }
}

#[async_trait]
impl UsageRepository for DocumentUsageRepository {
    async fn load(&self, scope: &Scope) -> Result<Option<UsageRecord>> {
        self.usage.get(scope, USAGE_KEY).await
    }

    async fn update(&self, scope: &Scope, f: UsageUpdate) -> Result<Option<UsageRecord>> {
        self.usage.update(scope, USAGE_KEY, f).await
    }
}
