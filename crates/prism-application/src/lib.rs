//! Application layer for Prism.
//!
//! Use cases that coordinate the domain (`prism-core`) with storage
//! (`prism-infrastructure`): sessions, templates, daily quota and the product
//! run sequence.

pub mod quota;
pub mod run_usecase;
pub mod services;
pub mod session_service;
pub mod template_service;

pub use quota::QuotaManager;
pub use run_usecase::{RunRequest, RunResponse, RunUseCase, SaveOptions};
pub use services::AppServices;
pub use session_service::{ExportFormat, SessionService, export_session};
pub use template_service::{TemplateService, render_template};
