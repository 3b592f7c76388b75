use async_trait::async_trait;

use super::model::UsageRecord;
use crate::document::Scope;
use crate::error::Result;

/// Read-modify-write step for [`UsageRepository::update`]. Receives the stored
/// record and returns its replacement, or `None` to keep it.
pub type UsageUpdate = Box<dyn FnOnce(Option<UsageRecord>) -> Option<UsageRecord> + Send>;

/// Persistence for the single usage record of a scope.
#[async_trait]
pub trait UsageRepository: Send + Sync {
    /// `None` when the scope has never been used.
    async fn load(&self, scope: &Scope) -> Result<Option<UsageRecord>>;

    /// Applies `f` atomically against every other writer of the record, in
    /// this process or another one. Returns the record `f` saw.
    async fn update(&self, scope: &Scope, f: UsageUpdate) -> Result<Option<UsageRecord>>;
}
