//! Application configuration file.
//!
//! ```toml
//! data_dir = "/var/lib/prism"
//! default_plan = "free"
//!
//! [input]
//! min_chars = 10
//! max_chars = 10000
//!
//! [limits]
//! free = 5
//!
//! [users]
//! alice = "pro"
//! ```
//!
//! Every field is optional. A missing file means all defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use prism_core::{InputLimits, PrismError};
use prism_core::usage::{Plan, PlanLimits, StaticPlanDirectory};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::paths::PrismPaths;
use crate::storage::AtomicFile;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the document store. Falls back to the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Plan of users not listed in `users`.
    pub default_plan: Plan,
    pub input: InputLimits,
    pub limits: PlanLimits,
    /// Per-user plan assignments.
    pub users: BTreeMap<String, Plan>,
}

impl AppConfig {
    /// Reads `path`, returning defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading configuration");
        let config = AtomicFile::<AppConfig>::toml(path.to_path_buf())
            .load()
            .with_context(|| format!("Failed to read config file {}", path.display()))?
            .unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Loads from `PRISM_CONFIG` or the platform config directory.
    pub fn load_default() -> Result<Self> {
        let path = PrismPaths::config_file().context("Failed to locate config file")?;
        Self::load(&path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        AtomicFile::<AppConfig>::toml(path.to_path_buf())
            .save(self)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.input.min_chars > self.input.max_chars {
            return Err(PrismError::config(format!(
                "input.min_chars ({}) exceeds input.max_chars ({})",
                self.input.min_chars, self.input.max_chars
            ))
            .into());
        }
        Ok(())
    }

    /// Data directory in priority order: `cli_override`, `PRISM_DATA_DIR`,
    /// the config file, the platform default.
    pub fn resolve_data_dir(&self, cli_override: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = cli_override.or_else(PrismPaths::data_dir_override) {
            return Ok(dir);
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        PrismPaths::default_data_dir().context("Failed to locate data directory")
    }

    pub fn plan_directory(&self) -> StaticPlanDirectory {
        StaticPlanDirectory::new(self.default_plan)
            .with_users(self.users.iter().map(|(user, plan)| (user.clone(), *plan)))
    }
}
