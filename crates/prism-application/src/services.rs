//! Service container built once at startup.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use prism_core::DocumentStore;
use prism_core::strategy::StrategyRegistry;
use prism_core::usage::{Clock, SystemClock};
use prism_infrastructure::{
    AppConfig, DirDocumentStore, DocumentSessionRepository, DocumentTemplateRepository,
    DocumentUsageRepository, MemoryDocumentStore,
};
use tracing::debug;

use crate::quota::QuotaManager;
use crate::run_usecase::RunUseCase;
use crate::session_service::SessionService;
use crate::template_service::TemplateService;

/// Every service of the application, wired to one document store.
#[derive(Clone)]
pub struct AppServices {
    pub config: AppConfig,
    pub registry: Arc<StrategyRegistry>,
    pub sessions: SessionService,
    pub templates: TemplateService,
    pub quota: Arc<QuotaManager>,
    pub runs: RunUseCase,
}

impl AppServices {
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        let registry = Arc::new(StrategyRegistry::builtin());
        let sessions = SessionService::new(Arc::new(DocumentSessionRepository::new(store.clone())));
        let templates =
            TemplateService::new(Arc::new(DocumentTemplateRepository::new(store.clone())));
        let quota = Arc::new(QuotaManager::new(
            Arc::new(DocumentUsageRepository::new(store)),
            Arc::new(config.plan_directory()),
            config.limits,
            clock,
        ));
        let runs = RunUseCase::new(
            registry.clone(),
            quota.clone(),
            sessions.clone(),
            config.input,
        );

        Self {
            config,
            registry,
            sessions,
            templates,
            quota,
            runs,
        }
    }

    /// Directory-backed services on the system clock.
    ///
    /// `data_dir` takes precedence over `PRISM_DATA_DIR` and the config file.
    pub fn open(config: AppConfig, data_dir: Option<PathBuf>) -> Result<Self> {
        let root = config.resolve_data_dir(data_dir)?;
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create data directory {}", root.display()))?;
        debug!(root = %root.display(), "Opening document store");

        Ok(Self::new(
            config,
            Arc::new(DirDocumentStore::new(root)),
            Arc::new(SystemClock),
        ))
    }

    /// Services that keep nothing after the process exits.
    pub fn in_memory(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(config, Arc::new(MemoryDocumentStore::new()), clock)
    }
}
