//! Sessions stored as JSON documents.

use std::sync::Arc;

use async_trait::async_trait;
use prism_core::error::Result;
use prism_core::session::{Session, SessionRepository};
use prism_core::{Collection, DocumentStore, Scope};

use crate::repository::TypedCollection;

/// [`SessionRepository`] over any [`DocumentStore`], one document per session
/// keyed by its id.
pub struct DocumentSessionRepository {
    sessions: TypedCollection<Session>,
}

impl DocumentSessionRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            sessions: TypedCollection::new(store, Collection::Sessions),
        }
    }
}

#[async_trait]
impl SessionRepository for DocumentSessionRepository {
    async fn find_by_id(&self, scope: &Scope, id: &str) -> Result<Option<Session>> {
        self.sessions.get(scope, id).await
    }

    async fn list_all(&self, scope: &Scope) -> Result<Vec<Session>> {
        self.sessions.list(scope).await
    }

    async fn save(&self, scope: &Scope, session: &Session) -> Result<()> {
        self.sessions.put(scope, &session.id, session).await
    }

    async fn delete(&self, scope: &Scope, id: &str) -> Result<bool> {
        self.sessions.delete(scope, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DirDocumentStore, MemoryDocumentStore};
    use chrono::{TimeZone, Utc};
    use prism_core::Namespace;
    use prism_core::session::NewSession;
    use serde_json::json;
    use tempfile::TempDir;

    fn session(id: &str) -> Session {
        NewSession {
            title: format!("Session {id}"),
            input: "in".to_string(),
            output: "out".to_string(),
            ..Default::default()
        }
        .into_session(id.to_string(), Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap())
    }

    #[tokio::test]
    async fn test_save_find_delete() {
        let repo = DocumentSessionRepository::new(Arc::new(MemoryDocumentStore::new()));
        let scope = Scope::new("novus-protocol", "alice");

        repo.save(&scope, &session("sess_1")).await.unwrap();

        assert_eq!(repo.find_by_id(&scope, "sess_1").await.unwrap(), Some(session("sess_1")));
        assert_eq!(repo.list_all(&scope).await.unwrap().len(), 1);
        assert!(repo.delete(&scope, "sess_1").await.unwrap());
        assert!(repo.find_by_id(&scope, "sess_1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_skips_records_that_do_not_decode() {
        let store = Arc::new(MemoryDocumentStore::new());
        let repo = DocumentSessionRepository::new(store.clone());
        let scope = Scope::new("novus-protocol", "alice");

        repo.save(&scope, &session("sess_1")).await.unwrap();
        store
            .put(&Namespace::sessions(&scope), "sess_bad", json!({ "id": 3 }))
            .await
            .unwrap();

        let listed = repo.list_all(&scope).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "sess_1");
    }

    #[tokio::test]
    async fn test_persisted_json_shape() {
        let dir = TempDir::new().unwrap();
        let repo = DocumentSessionRepository::new(Arc::new(DirDocumentStore::new(dir.path())));
        let scope = Scope::new("novus-protocol", "alice");

        repo.save(&scope, &session("sess_1")).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("novus-protocol/sessions-alice/sess_1.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["id"], "sess_1");
        assert_eq!(value["createdAt"], "2024-05-01T09:30:00Z");
        assert_eq!(value["tags"], json!([]));
    }
}
