//! Four-stage deterministic prompt improvement.
//!
//! Stages run in a fixed order over the cumulative text. Each stage only adds
//! what is missing, so running the pipeline on its own output changes nothing.

mod stages;

pub use stages::{
    ACCURACY_DIRECTIVE, ACTIONABLE_DIRECTIVE, CLARITY_DIRECTIVE, ETHICS_DIRECTIVE,
    INSTRUCTION_LEAD, ROLE_DEFINITION, SPECIFICITY_DIRECTIVE, STRUCTURE_DIRECTIVE, StageOutcome,
    apply_constraints, apply_safety, enforce_structure, normalize_tone,
};

use tracing::debug;

use crate::diff::render_diff;
use crate::metrics::{self, MetricsBag, keys};

/// Output of a full pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct CalResult {
    pub optimized: String,
    pub improvements: Vec<String>,
    pub metrics: MetricsBag,
    pub diff: String,
}

type Stage = fn(&str) -> StageOutcome;

const STAGES: [Stage; 4] = [normalize_tone, enforce_structure, apply_constraints, apply_safety];

/// Runs every stage over `prompt` and scores the result.
pub fn run_pipeline(prompt: &str) -> CalResult {
    let mut current = prompt.to_string();
    let mut improvements = Vec::new();

    for stage in STAGES {
        let outcome = stage(&current);
        current = outcome.text;
        improvements.extend(outcome.improvements);
    }

    debug!(improvements = improvements.len(), "CAL pipeline finished");

    let diff = render_diff(prompt, &current);
    let metrics = metrics::bag([
        (keys::READABILITY, metrics::readability(&current)),
        (keys::STRUCTURE, metrics::structure(&current)),
        (keys::SAFETY, metrics::safety(&current)),
        (keys::TOKEN_DELTA_PCT, metrics::token_delta_pct(prompt, &current)),
    ]);

    CalResult {
        optimized: current,
        improvements,
        metrics,
        diff,
    }
}
