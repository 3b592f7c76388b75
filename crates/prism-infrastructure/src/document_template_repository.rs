//! Templates stored as JSON documents.

use std::sync::Arc;

use async_trait::async_trait;
use prism_core::error::Result;
use prism_core::template::{Template, TemplateRepository};
use prism_core::{Collection, DocumentStore, Scope};

use crate::repository::TypedCollection;

pub struct DocumentTemplateRepository {
    templates: TypedCollection<Template>,
}

impl DocumentTemplateRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            templates: TypedCollection::new(store, Collection::Templates),
        }
    }
}

#[async_trait]
impl TemplateRepository for DocumentTemplateRepository {
    async fn find_by_id(&self, scope: &Scope, id: &str) -> Result<Option<Template>> {
        self.templates.get(scope, id).await
    }

    async fn list_all(&self, scope: &Scope) -> Result<Vec<Template>> {
        self.templates.list(scope).await
    }

    async fn save(&self, scope: &Scope, template: &Template) -> Result<()> {
        self.templates.put(scope, &template.id, template).await
    }

    async fn delete(&self, scope: &Scope, id: &str) -> Result<bool> {
        self.templates.delete(scope, id).await
    }
}
