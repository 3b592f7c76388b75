//! Reusable prompt templates with `{variable}` placeholders.

mod model;
mod repository;
mod variables;

pub use model::{NewTemplate, TEMPLATE_ID_PREFIX, Template, TemplatePatch};
pub use repository::TemplateRepository;
pub use variables::{extract_variables, substitute};
