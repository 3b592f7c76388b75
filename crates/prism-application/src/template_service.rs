//! Template use cases.

use std::collections::HashMap;
use std::sync::Arc;

use prism_core::Scope;
use prism_core::error::Result;
use prism_core::template::{
    NewTemplate, TEMPLATE_ID_PREFIX, Template, TemplatePatch, TemplateRepository,
    extract_variables, substitute,
};
use tracing::{debug, warn};
use uuid::Uuid;

/// Template CRUD with the same error policy as
/// [`SessionService`](crate::SessionService).
#[derive(Clone)]
pub struct TemplateService {
    repository: Arc<dyn TemplateRepository>,
}

impl TemplateService {
    pub fn new(repository: Arc<dyn TemplateRepository>) -> Self {
        Self { repository }
    }

    /// Templates of `scope` ordered by name.
    pub async fn list(&self, scope: &Scope) -> Result<Vec<Template>> {
        let mut templates = self.repository.list_all(scope).await?;
        templates.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(templates)
    }

    pub async fn get(&self, scope: &Scope, id: &str) -> Option<Template> {
        match self.repository.find_by_id(scope, id).await {
            Ok(template) => template,
            Err(e) => {
                warn!(%scope, id, error = %e, "Failed to load template");
                None
            }
        }
    }

    pub async fn create(&self, scope: &Scope, new: NewTemplate) -> Result<Template> {
        let id = format!("{}{}", TEMPLATE_ID_PREFIX, Uuid::new_v4().simple());
        let template = new.into_template(id);
        self.repository.save(scope, &template).await?;
        debug!(%scope, id = %template.id, "Created template");
        Ok(template)
    }

    /// Creates a template whose variables are the placeholders of `body`.
    pub async fn create_from_body(
        &self,
        scope: &Scope,
        name: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Template> {
        self.create(scope, NewTemplate::from_body(name, body)).await
    }

    /// Merges `patch`. A new body without explicit variables re-derives them
    /// from the body.
    pub async fn update(
        &self,
        scope: &Scope,
        id: &str,
        mut patch: TemplatePatch,
    ) -> Result<Option<Template>> {
        let Some(mut template) = self.repository.find_by_id(scope, id).await? else {
            return Ok(None);
        };
        if patch.variables.is_none() {
            patch.variables = patch.body.as_deref().map(extract_variables);
        }
        template.apply(patch);
        self.repository.save(scope, &template).await?;
        debug!(%scope, id, "Updated template");
        Ok(Some(template))
    }

    pub async fn delete(&self, scope: &Scope, id: &str) -> bool {
        match self.repository.delete(scope, id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                warn!(%scope, id, error = %e, "Failed to delete template");
                false
            }
        }
    }
}

/// Fills the template body with `values`.
pub fn render_template(template: &Template, values: &HashMap<String, String>) -> String {
    substitute(&template.body, values).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_infrastructure::{DocumentTemplateRepository, MemoryDocumentStore};

    fn service() -> TemplateService {
        TemplateService::new(Arc::new(DocumentTemplateRepository::new(Arc::new(
            MemoryDocumentStore::new(),
        ))))
    }

    fn scope() -> Scope {
        Scope::new("novus-protocol", "alice")
    }

    #[tokio::test]
    async fn test_create_from_body() {
        let service = service();
        let template = service
            .create_from_body(&scope(), "Blog", "Write about {topic} for {audience}. {topic}!")
            .await
            .unwrap();

        assert!(template.id.starts_with("tmpl_"));
        assert_eq!(template.variables, vec!["topic", "audience"]);
        assert_eq!(service.get(&scope(), &template.id).await, Some(template));
    }

    #[tokio::test]
    async fn test_declared_variables_are_not_validated() {
        let template = service()
            .create(
                &scope(),
                NewTemplate {
                    name: "Loose".to_string(),
                    variables: vec!["unused".to_string()],
                    body: "Plain text".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(template.variables, vec!["unused"]);
    }

    #[tokio::test]
    async fn test_update_body_rederives_variables() {
        let service = service();
        let template = service.create_from_body(&scope(), "A", "{x}").await.unwrap();

        let updated = service
            .update(
                &scope(),
                &template.id,
                TemplatePatch {
                    body: Some("{y} and {z}".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, template.id);
        assert_eq!(updated.name, "A");
        assert_eq!(updated.variables, vec!["y", "z"]);
    }

    #[tokio::test]
    async fn test_list_by_name_and_delete() {
        let service = service();
        let b = service.create_from_body(&scope(), "Beta", "b").await.unwrap();
        service.create_from_body(&scope(), "Alpha", "a").await.unwrap();

        let names: Vec<String> = service
            .list(&scope())
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);

        assert!(service.delete(&scope(), &b.id).await);
        assert!(!service.delete(&scope(), &b.id).await);
        assert_eq!(service.list(&scope()).await.unwrap().len(), 1);
    }

    #[test]
    fn test_render() {
        let template = NewTemplate::from_body("T", "Dear {name}, re: {topic}")
            .into_template("tmpl_1".to_string());
        let values = HashMap::from([("name".to_string(), "Ann".to_string())]);
        assert_eq!(render_template(&template, &values), "Dear Ann, re: {topic}");
    }
}
