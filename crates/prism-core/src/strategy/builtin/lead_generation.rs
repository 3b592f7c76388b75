use crate::error::Result;
use crate::metrics::{self, keys};
use crate::strategy::{
    Labels, MetricFormat, MetricSpec, ParamReader, Params, RunOutput, Strategy, capitalize_first,
};

const METRICS: &[MetricSpec] = &[
    MetricSpec::score("Structure", keys::STRUCTURE),
    MetricSpec::score("Compliance", keys::COMPLIANCE),
    MetricSpec::score("Readability", keys::READABILITY),
    MetricSpec::new("Enhancement", keys::TOKEN_DELTA_PCT, MetricFormat::Growth),
];

const SUBJECT_FALLBACK_CHARS: usize = 50;

/// Wraps a core message in an outreach email with a call to action.
pub struct LeadGeneration {
    labels: Labels,
}

impl LeadGeneration {
    pub fn new() -> Self {
        Self {
            labels: Labels::new(
                "Generate Outreach",
                "Save Campaign",
                "Copy Message",
                "Message Editor",
                "Outreach Message",
                "Core Message",
                "Lead Gen Features",
            ),
        }
    }
}

impl Default for LeadGeneration {
    fn default() -> Self {
        Self::new()
    }
}

/// First non-blank line, or the leading characters of the message.
fn subject_line(input: &str) -> String {
    match input.lines().next().map(str::trim).filter(|l| !l.is_empty()) {
        Some(line) => line.to_string(),
        None => input.trim().chars().take(SUBJECT_FALLBACK_CHARS).collect(),
    }
}

impl Strategy for LeadGeneration {
    fn labels(&self) -> &Labels {
        &self.labels
    }

    fn metrics_config(&self) -> &[MetricSpec] {
        METRICS
    }

    fn run(&self, input: &str, params: &Params) -> Result<RunOutput> {
        let audience = ParamReader::new(params).str_or("audience", "business professionals")?;

        let output = format!(
            "Subject: {}\n\nDear {},\n\n{}\n\nI'd love to discuss how this can benefit your organization. \
             Would you be available for a brief 15-minute conversation this week?\n\nBest regards,\n[Your Name]",
            subject_line(input),
            capitalize_first(&audience),
            input
        );

        let improvements = vec![
            "Added professional email structure".to_string(),
            "Included clear call-to-action".to_string(),
            "Personalized for target audience".to_string(),
        ];

        let metrics = metrics::bag([
            (keys::STRUCTURE, metrics::structure(&output)),
            (keys::COMPLIANCE, metrics::compliance(&output)),
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_structure() {
        let params = json!({ "audience": "marketing leads" }).as_object().cloned().unwrap();
        let out = LeadGeneration::new()
            .run("Cut onboarding time in half\nOur tool automates setup.", &params)
            .unwrap();

        assert!(out.output.starts_with("Subject: Cut onboarding time in half\n\nDear Marketing leads,\n\n"));
        assert!(out.output.contains("15-minute conversation"));
        assert!(out.output.ends_with("Best regards,\n[Your Name]"));
        assert_eq!(out.improvements.len(), 3);
        assert!(out.metrics[keys::TOKEN_DELTA_PCT] > 0.0);
    }

    #[test]
    fn test_subject_falls_back_to_leading_chars() {
        let input = format!("\n{}", "x".repeat(80));
        assert_eq!(subject_line(&input).len(), SUBJECT_FALLBACK_CHARS);
        assert_eq!(subject_line("Hello\nWorld"), "Hello");
    }
}
