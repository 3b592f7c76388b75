//! Session use cases: listing, lookup, creation, partial update, deletion and
//! export of saved runs.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::Utc;
use prism_core::error::Result;
use prism_core::session::{NewSession, SESSION_ID_PREFIX, Session, SessionPatch, SessionRepository};
use prism_core::strategy::MetricSpec;
use prism_core::Scope;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, warn};
use uuid::Uuid;

/// Download formats for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    #[default]
    Json,
    #[strum(to_string = "markdown", serialize = "md")]
    Markdown,
}

/// Session CRUD on top of a [`SessionRepository`].
///
/// Lookups and deletions never fail: storage errors are logged and reported
/// as "absent". Creation and update propagate them.
#[derive(Clone)]
pub struct SessionService {
    repository: Arc<dyn SessionRepository>,
}

impl SessionService {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Sessions of `scope`, newest first.
    pub async fn list(&self, scope: &Scope) -> Result<Vec<Session>> {
        let mut sessions = self.repository.list_all(scope).await?;
        sessions.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(sessions)
    }

    pub async fn get(&self, scope: &Scope, id: &str) -> Option<Session> {
        match self.repository.find_by_id(scope, id).await {
            Ok(session) => session,
            Err(e) => {
                warn!(%scope, id, error = %e, "Failed to load session");
                None
            }
        }
    }

    /// Stores `new` under a fresh `sess_…` id stamped with the current time.
    pub async fn create(&self, scope: &Scope, new: NewSession) -> Result<Session> {
        let id = format!("{}{}", SESSION_ID_PREFIX, Uuid::new_v4().simple());
        let session = new.into_session(id, Utc::now());
        self.repository.save(scope, &session).await?;
        debug!(%scope, id = %session.id, "Created session");
        Ok(session)
    }

    /// Merges `patch` into an existing session. `None` if there is no such
    /// session.
    pub async fn update(
        &self,
        scope: &Scope,
        id: &str,
        patch: SessionPatch,
    ) -> Result<Option<Session>> {
        let Some(mut session) = self.repository.find_by_id(scope, id).await? else {
            return Ok(None);
        };
        session.apply(patch);
        self.repository.save(scope, &session).await?;
        debug!(%scope, id, "Updated session");
        Ok(Some(session))
    }

    /// Removes a session. `false` when it did not exist or could not be
    /// removed.
    pub async fn delete(&self, scope: &Scope, id: &str) -> bool {
        match self.repository.delete(scope, id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                warn!(%scope, id, error = %e, "Failed to delete session");
                false
            }
        }
    }
}

/// Renders a session for download. Markdown lists metrics under the
/// product's display labels, in panel order, followed by any others.
pub fn export_session(
    session: &Session,
    format: ExportFormat,
    metric_specs: &[MetricSpec],
) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(session)?),
        ExportFormat::Markdown => Ok(render_markdown(session, metric_specs)),
    }
}

fn render_markdown(session: &Session, metric_specs: &[MetricSpec]) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# {}\n", session.title);
    let _ = writeln!(md, "- **Session:** {}", session.id);
    let _ = writeln!(md, "- **Created:** {}", session.created_at.to_rfc3339());
    if !session.tags.is_empty() {
        let _ = writeln!(md, "- **Tags:** {}", session.tags.join(", "));
    }

    let _ = write!(md, "\n## Input\n\n{}\n\n## Output\n\n{}\n", session.input, session.output);

    if !session.metrics.is_empty() {
        md.push_str("\n## Metrics\n\n| Metric | Value |\n| --- | --- |\n");
        for spec in metric_specs {
            if let Some(value) = session.metrics.get(spec.key) {
                let _ = writeln!(md, "| {} | {} |", spec.label, spec.format.render(*value));
            }
        }
        for (key, value) in &session.metrics {
            if !metric_specs.iter().any(|spec| spec.key == key.as_str()) {
                let _ = writeln!(md, "| {} | {:.1} |", key, value);
            }
        }
    }

    if let Some(diff) = &session.diff {
        let _ = write!(md, "\n## Diff\n\n```diff\n{}\n```\n", diff);
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone};
    use prism_core::PrismError;
    use prism_core::metrics::MetricsBag;
    use prism_core::strategy::MetricFormat;
    use prism_infrastructure::{DocumentSessionRepository, MemoryDocumentStore};

    fn service() -> SessionService {
        SessionService::new(Arc::new(DocumentSessionRepository::new(Arc::new(
            MemoryDocumentStore::new(),
        ))))
    }

    fn scope() -> Scope {
        Scope::new("novus-protocol", "alice")
    }

    fn draft(title: &str) -> NewSession {
        NewSession {
            title: title.to_string(),
            tags: vec!["draft".to_string()],
            input: "write a haiku".to_string(),
            output: "Act as a poet.".to_string(),
            metrics: MetricsBag::from([
                ("readability".to_string(), 71.25),
                ("tokenDeltaPct".to_string(), 250.0),
                ("custom".to_string(), 3.0),
            ]),
            diff: Some("- write a haiku\n+ Act as a poet.".to_string()),
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    /// Repository whose every operation fails.
    struct BrokenRepository;

    #[async_trait]
    impl SessionRepository for BrokenRepository {
        async fn find_by_id(&self, _: &Scope, _: &str) -> Result<Option<Session>> {
            Err(PrismError::io("disk on fire"))
        }
        async fn list_all(&self, _: &Scope) -> Result<Vec<Session>> {
            Err(PrismError::io("disk on fire"))
        }
        async fn save(&self, _: &Scope, _: &Session) -> Result<()> {
            Err(PrismError::io("disk on fire"))
        }
        async fn delete(&self, _: &Scope, _: &str) -> Result<bool> {
            Err(PrismError::io("disk on fire"))
        }
    }

    #[tokio::test]
    async fn test_create_assigns_identity() {
        let service = service();
        let session = service.create(&scope(), draft("First")).await.unwrap();

        assert!(session.id.starts_with("sess_"));
        assert_eq!(session.id.len(), "sess_".len() + 32);
        assert_eq!(service.get(&scope(), &session.id).await, Some(session));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = Arc::new(DocumentSessionRepository::new(Arc::new(MemoryDocumentStore::new())));
        for (id, hour) in [("sess_a", 9), ("sess_b", 11), ("sess_c", 10)] {
            let session = draft(id).into_session(id.to_string(), at(hour));
            repo.save(&scope(), &session).await.unwrap();
        }

        let ids: Vec<String> = SessionService::new(repo)
            .list(&scope())
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["sess_b", "sess_c", "sess_a"]);
    }

    #[tokio::test]
    async fn test_update_never_changes_identity() {
        let service = service();
        let created = service.create(&scope(), draft("First")).await.unwrap();

        let updated = service
            .update(
                &scope(),
                &created.id,
                SessionPatch {
                    title: Some("Renamed".to_string()),
                    tags: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.title, "Renamed");
        assert!(updated.tags.is_empty());
        assert_eq!(updated.output, created.output);
        assert_eq!(service.get(&scope(), &created.id).await, Some(updated));
    }

    #[tokio::test]
    async fn test_update_missing_is_none() {
        let result = service()
            .update(&scope(), "sess_missing", SessionPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let service = service();
        let created = service.create(&scope(), draft("First")).await.unwrap();

        assert!(service.delete(&scope(), &created.id).await);
        assert!(!service.delete(&scope(), &created.id).await);
        assert!(service.get(&scope(), &created.id).await.is_none());
    }

    #[tokio::test]
    async fn test_storage_errors() {
        let service = SessionService::new(Arc::new(BrokenRepository));

        assert!(service.get(&scope(), "sess_1").await.is_none());
        assert!(!service.delete(&scope(), "sess_1").await);
        assert!(service.create(&scope(), draft("x")).await.is_err());
        assert!(service.update(&scope(), "sess_1", SessionPatch::default()).await.is_err());
        assert!(service.list(&scope()).await.is_err());
    }

    #[test]
    fn test_export_json() {
        let session = draft("Haiku").into_session("sess_1".to_string(), at(8));
        let json = export_session(&session, ExportFormat::Json, &[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "sess_1");
        assert_eq!(value["metrics"]["readability"], 71.25);
    }

    #[test]
    fn test_export_markdown_uses_labels() {
        const SPECS: &[MetricSpec] = &[
            MetricSpec::score("Readability", "readability"),
            MetricSpec::new("Token Delta", "tokenDeltaPct", MetricFormat::SignedPercent),
            MetricSpec::score("Safety", "safety"),
        ];
        let session = draft("Haiku").into_session("sess_1".to_string(), at(8));
        let md = export_session(&session, ExportFormat::Markdown, SPECS).unwrap();

        assert!(md.starts_with("# Haiku\n\n- **Session:** sess_1\n"));
        assert!(md.contains("- **Tags:** draft\n"));
        assert!(md.contains("| Readability | 71 |\n| Token Delta | +250.0% |\n| custom | 3.0 |\n"));
        assert!(!md.contains("Safety"));
        assert!(md.contains("```diff\n- write a haiku\n+ Act as a poet.\n```"));
    }

    #[test]
    fn test_export_format_parsing() {
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
