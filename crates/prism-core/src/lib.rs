//! Domain layer of the Prism toolkit.
//!
//! Pure text scoring ([`metrics`]), the prompt improvement pipeline ([`cal`]),
//! line diffs ([`diff`]), the product [`strategy`] contract with its built-in
//! products, and the models and repository traits for sessions, templates and
//! daily usage.

pub mod cal;
pub mod diff;
pub mod document;
pub mod error;
pub mod input;
pub mod metrics;
pub mod session;
pub mod strategy;
pub mod template;
pub mod usage;

// Re-export common error type
pub use error::{PrismError, Result};
pub use document::{Collection, DocumentStore, DocumentUpdate, Namespace, Scope};
pub use input::{InputError, InputLimits};
