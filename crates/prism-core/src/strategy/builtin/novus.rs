use crate::cal::run_pipeline;
use crate::error::Result;
use crate::metrics::keys;
use crate::strategy::{Labels, MetricFormat, MetricSpec, Params, RunOutput, Strategy};

const METRICS: &[MetricSpec] = &[
    MetricSpec::score("Readability", keys::READABILITY),
    MetricSpec::score("Structure", keys::STRUCTURE),
    MetricSpec::score("Safety", keys::SAFETY),
    MetricSpec::new("Token Delta", keys::TOKEN_DELTA_PCT, MetricFormat::SignedPercent),
];

/// Prompt optimizer backed by the CAL pipeline. Takes no parameters.
pub struct NovusProtocol {
    labels: Labels,
}

impl NovusProtocol {
    pub fn new() -> Self {
        Self {
            labels: Labels::new(
                "Optimize Prompt",
                "Save Session",
                "Copy Optimized",
                "Prompt Editor",
                "Optimized Prompt",
                "Original",
                "CAL Improvements",
            ),
        }
    }
}

impl Default for NovusProtocol {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for NovusProtocol {
    fn labels(&self) -> &Labels {
        &self.labels
    }

    fn metrics_config(&self) -> &[MetricSpec] {
        METRICS
    }

    fn run(&self, input: &str, _params: &Params) -> Result<RunOutput> {
        let result = run_pipeline(input);
        Ok(RunOutput {
            output: result.optimized,
            metrics: result.metrics,
            diff: Some(result.diff),
            improvements: result.improvements,
        })
    }
}
