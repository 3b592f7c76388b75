use async_trait::async_trait;

use super::model::Template;
use crate::document::Scope;
use crate::error::Result;

/// Persistence for templates of one scope. Same shape as
/// [`SessionRepository`](crate::session::SessionRepository).
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn find_by_id(&self, scope: &Scope, id: &str) -> Result<Option<Template>>;

    async fn list_all(&self, scope: &Scope) -> Result<Vec<Template>>;

    async fn save(&self, scope: &Scope, template: &Template) -> Result<()>;

    async fn delete(&self, scope: &Scope, id: &str) -> Result<bool>;
}
