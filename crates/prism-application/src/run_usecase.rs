//! The request-handling sequence for one product run.
//!
//! 1. resolve the product
//! 2. substitute `{variable}` tokens in the input
//! 3. validate input length
//! 4. check the daily quota
//! 5. run the strategy
//! 6. debit one unit of quota
//! 7. save a session when asked to
//!
//! Nothing is debited or saved unless every earlier step succeeded.

use std::collections::HashMap;
use std::sync::Arc;

use prism_core::error::{PrismError, Result};
use prism_core::session::{NewSession, Session};
use prism_core::strategy::{Params, RunOutput, StrategyRegistry};
use prism_core::template::substitute;
use prism_core::usage::LimitCheck;
use prism_core::{InputLimits, Scope};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::quota::QuotaManager;
use crate::session_service::SessionService;

const DEFAULT_TITLE_CHARS: usize = 60;

/// How to store a successful run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOptions {
    /// Defaults to the start of the input's first line.
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub product_id: String,
    pub user_id: String,
    pub input: String,
    #[serde(default)]
    pub params: Params,
    /// Values for `{variable}` placeholders in `input`.
    #[serde(default)]
    pub variables: HashMap<String, String>,
    #[serde(default)]
    pub save: Option<SaveOptions>,
}

impl RunRequest {
    pub fn new(
        product_id: impl Into<String>,
        user_id: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            user_id: user_id.into(),
            input: input.into(),
            ..Default::default()
        }
    }

    pub fn scope(&self) -> Scope {
        Scope::new(&self.product_id, &self.user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    /// Input after variable substitution.
    pub input: String,
    pub result: RunOutput,
    /// Quota state after the debit.
    pub usage: LimitCheck,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
}

#[derive(Clone)]
pub struct RunUseCase {
    registry: Arc<StrategyRegistry>,
    quota: Arc<QuotaManager>,
    sessions: SessionService,
    input_limits: InputLimits,
}

impl RunUseCase {
    pub fn new(
        registry: Arc<StrategyRegistry>,
        quota: Arc<QuotaManager>,
        sessions: SessionService,
        input_limits: InputLimits,
    ) -> Self {
        Self {
            registry,
            quota,
            sessions,
            input_limits,
        }
    }

    pub async fn execute(&self, request: RunRequest) -> Result<RunResponse> {
        let strategy = self.registry.require(&request.product_id)?;
        let scope = request.scope();

        let input = substitute(&request.input, &request.variables).into_owned();
        self.input_limits.validate(&input)?;

        let check = self.quota.check_limits(&scope).await;
        if !check.allowed {
            return Err(quota_exceeded(&request.product_id, &check));
        }

        debug!(%scope, chars = input.chars().count(), "Running product");
        let result = strategy
            .run(&input, &request.params)
            .map_err(|e| PrismError::processing(&request.product_id, e))?;

        if !self.quota.consume_quota(&scope).await {
            let check = self.quota.check_limits(&scope).await;
            return Err(quota_exceeded(&request.product_id, &check));
        }

        let session = match request.save {
            Some(save) => {
                let title = save.title.unwrap_or_else(|| default_title(&input));
                let new = NewSession {
                    title,
                    tags: save.tags,
                    input: input.clone(),
                    output: result.output.clone(),
                    metrics: result.metrics.clone(),
                    diff: result.diff.clone(),
                };
                Some(self.sessions.create(&scope, new).await?)
            }
            None => None,
        };

        let usage = self.quota.check_limits(&scope).await;
        info!(
            %scope,
            improvements = result.improvements.len(),
            saved = session.is_some(),
            "Run completed"
        );

        Ok(RunResponse {
            input,
            result,
            usage,
            session,
        })
    }
}

fn quota_exceeded(product_id: &str, check: &LimitCheck) -> PrismError {
    PrismError::QuotaExceeded {
        product_id: product_id.to_string(),
        limit: check.limit.unwrap_or(0),
    }
}

fn default_title(input: &str) -> String {
    let first_line = input.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    let mut title: String = first_line.chars().take(DEFAULT_TITLE_CHARS).collect();
    if first_line.chars().count() > DEFAULT_TITLE_CHARS {
        title.push('…');
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_title() {
        assert_eq!(default_title("\n  Launch plan  \nmore"), "Launch plan");
        let long = "x".repeat(70);
        let title = default_title(&long);
        assert_eq!(title.chars().count(), DEFAULT_TITLE_CHARS + 1);
        assert!(title.ends_with('…'));
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let request: RunRequest = serde_json::from_value(serde_json::json!({
            "productId": "auto-rewrite",
            "userId": "alice",
            "input": "Hello {name}",
            "variables": { "name": "world" },
            "save": { "title": "Greeting" }
        }))
        .unwrap();
        assert_eq!(request.scope(), Scope::new("auto-rewrite", "alice"));
        assert_eq!(request.save.unwrap().title.as_deref(), Some("Greeting"));
        assert!(request.params.is_empty());
    }
}
