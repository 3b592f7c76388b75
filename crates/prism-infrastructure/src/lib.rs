pub mod config;
pub mod document_session_repository;
pub mod document_template_repository;
pub mod document_usage_repository;
pub mod paths;
mod repository;
pub mod storage;

pub use crate::config::AppConfig;
pub use crate::document_session_repository::DocumentSessionRepository;
pub use crate::document_template_repository::DocumentTemplateRepository;
pub use crate::document_usage_repository::DocumentUsageRepository;
pub use crate::paths::PrismPaths;
pub use crate::storage::{DirDocumentStore, MemoryDocumentStore};
