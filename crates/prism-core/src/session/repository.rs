use async_trait::async_trait;

use super::model::Session;
use crate::document::Scope;
use crate::error::Result;

/// Persistence for sessions of one scope.
///
/// Implementations store whole records keyed by `Session::id`; `save` is an
/// upsert. Ordering is left to callers.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_by_id(&self, scope: &Scope, id: &str) -> Result<Option<Session>>;

    async fn list_all(&self, scope: &Scope) -> Result<Vec<Session>>;

    async fn save(&self, scope: &Scope, session: &Session) -> Result<()>;

    /// Returns `false` when there was nothing to delete.
    async fn delete(&self, scope: &Scope, id: &str) -> Result<bool>;
}
