use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::metrics::{self, keys, sentences};
use crate::strategy::{Labels, MetricFormat, MetricSpec, ParamReader, Params, RunOutput, Strategy};

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^##?\s").expect("valid regex"));

const SUPPORTING: &str = " This comprehensive approach ensures optimal results. Contact us for more information about implementation strategies.";
const EXPANSION: &str = " Our expert team provides detailed analysis and recommendations tailored to your specific needs and objectives.";

const METRICS: &[MetricSpec] = &[
    MetricSpec::score("Structure", keys::STRUCTURE),
    MetricSpec::score("Keywords", keys::KEYWORD_COVERAGE),
    MetricSpec::score("Readability", keys::READABILITY),
    MetricSpec::new("Content Growth", keys::TOKEN_DELTA_PCT, MetricFormat::Growth),
];

/// Keyword insertion, padding to a target length and header structure.
pub struct SeoOptimizer {
    labels: Labels,
}

impl SeoOptimizer {
    pub fn new() -> Self {
        Self {
            labels: Labels::new(
                "Optimize for SEO",
                "Save Optimization",
                "Copy Optimized",
                "Content Editor",
                "SEO Optimized",
                "Original",
                "SEO Enhancements",
            ),
        }
    }
}

impl Default for SeoOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

fn optimize(input: &str, keywords: &[String], target_length: usize) -> (String, Vec<String>) {
    let mut output = input.to_string();
    let mut improvements = Vec::new();

    if let Some((main, rest)) = keywords.split_first() {
        if !input.to_lowercase().contains(&main.to_lowercase()) {
            output = format!("{}: {}", main, output);
            improvements.push(format!("Added primary keyword \"{}\"", main));
        }
        for keyword in rest {
            if !output.to_lowercase().contains(&keyword.to_lowercase()) {
                output.push_str(&format!(
                    " Learn more about {} and how it relates to your goals.",
                    keyword
                ));
                improvements.push(format!("Integrated keyword \"{}\"", keyword));
            }
        }
    }

    if sentences(&output).len() < 3 {
        output.push_str(SUPPORTING);
        improvements.push("Added supporting sentences for SEO".to_string());
    }

    if output.chars().count() < target_length {
        output.push_str(EXPANSION);
        improvements.push("Expanded content to meet target length".to_string());
    }

    if !HEADING.is_match(&output) {
        let parts: Vec<String> = sentences(&output).iter().map(|s| s.trim().to_string()).collect();
        if let Some((title, body)) = parts.split_first() {
            output = format!("# {}\n\n## Overview\n\n{}.", title, body.join(". "));
            improvements.push("Added header structure for SEO".to_string());
        }
    }

    (output, improvements)
}

impl Strategy for SeoOptimizer {
    fn labels(&self) -> &Labels {
        &self.labels
    }

    fn metrics_config(&self) -> &[MetricSpec] {
        METRICS
    }

    fn run(&self, input: &str, params: &Params) -> Result<RunOutput> {
        let r = ParamReader::new(params);
        let keywords = r.list("keywords")?;
        let target_length = r.u64_or("targetLength", 300)? as usize;

        let (output, improvements) = optimize(input, &keywords, target_length);
        let metrics = metrics::bag([
            (keys::STRUCTURE, metrics::structure(&output)),
            (keys::KEYWORD_COVERAGE, metrics::coverage(&output, &keywords)),
            (keys::READABILITY, metrics::readability(&output)),
            (keys::TOKEN_DELTA_PCT, metrics::token_delta_pct(input, &output)),
        ]);

        Ok(RunOutput {
            output,
            metrics,
            diff: None,
            improvements,
        })
    }
}
