//! Strategy output and presentation types.

use serde::{Deserialize, Serialize};

use crate::metrics::MetricsBag;

/// Result of one strategy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutput {
    pub output: String,
    pub metrics: MetricsBag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// UI-facing captions for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub run: String,
    pub save: String,
    pub copy: String,
    pub editor: String,
    pub result: String,
    pub original: String,
    pub improvements: String,
}

impl Labels {
    pub fn new(
        run: &str,
        save: &str,
        copy: &str,
        editor: &str,
        result: &str,
        original: &str,
        improvements: &str,
    ) -> Self {
        Self {
            run: run.to_string(),
            save: save.to_string(),
            copy: copy.to_string(),
            editor: editor.to_string(),
            result: result.to_string(),
            original: original.to_string(),
            improvements: improvements.to_string(),
        }
    }

    /// Returns a copy with every `Some` field of `overrides` applied.
    pub fn merged(&self, overrides: &LabelOverrides) -> Self {
        let pick = |o: &Option<String>, base: &String| o.clone().unwrap_or_else(|| base.clone());
        Self {
            run: pick(&overrides.run, &self.run),
            save: pick(&overrides.save, &self.save),
            copy: pick(&overrides.copy, &self.copy),
            editor: pick(&overrides.editor, &self.editor),
            result: pick(&overrides.result, &self.result),
            original: pick(&overrides.original, &self.original),
            improvements: pick(&overrides.improvements, &self.improvements),
        }
    }
}

/// Partial [`Labels`] used by derived products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelOverrides {
    pub run: Option<String>,
    pub save: Option<String>,
    pub copy: Option<String>,
    pub editor: Option<String>,
    pub result: Option<String>,
    pub original: Option<String>,
    pub improvements: Option<String>,
}

impl LabelOverrides {
    /// The common case: a derived product renames its run button, result pane
    /// and improvements list.
    pub fn run_result_improvements(run: &str, result: &str, improvements: &str) -> Self {
        Self {
            run: Some(run.to_string()),
            result: Some(result.to_string()),
            improvements: Some(improvements.to_string()),
            ..Default::default()
        }
    }
}

/// How a metric value is rendered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricFormat {
    /// Plain 0-100 score.
    #[default]
    Score,
    /// One decimal, `12.5%`.
    Percent,
    /// One decimal with explicit sign, `+12.5%`.
    SignedPercent,
    /// Whole number with explicit sign, `+40%`.
    Growth,
    /// Whole number, `40%`.
    WholePercent,
    /// Whole dollars, `$120`.
    Currency,
}

impl MetricFormat {
    pub fn render(self, value: f64) -> String {
        let sign = if value >= 0.0 { "+" } else { "" };
        match self {
            MetricFormat::Score => format!("{:.0}", value),
            MetricFormat::Percent => format!("{:.1}%", value),
            MetricFormat::SignedPercent => format!("{}{:.1}%", sign, value),
            MetricFormat::Growth => format!("{}{:.0}%", sign, value),
            MetricFormat::WholePercent => format!("{:.0}%", value),
            MetricFormat::Currency => format!("${:.0}", value),
        }
    }
}

/// One row of a product's metric panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricSpec {
    pub label: &'static str,
    pub key: &'static str,
    pub format: MetricFormat,
}

impl MetricSpec {
    pub const fn score(label: &'static str, key: &'static str) -> Self {
        Self::new(label, key, MetricFormat::Score)
    }

    pub const fn new(label: &'static str, key: &'static str, format: MetricFormat) -> Self {
        Self { label, key, format }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_merge_keeps_unset_fields() {
        let base = Labels::new("Run", "Save", "Copy", "Editor", "Result", "Original", "Changes");
        let merged = base.merged(&LabelOverrides::run_result_improvements(
            "Go", "Output", "Notes",
        ));
        assert_eq!(merged.run, "Go");
        assert_eq!(merged.result, "Output");
        assert_eq!(merged.improvements, "Notes");
        assert_eq!(merged.save, "Save");
        assert_eq!(merged.original, "Original");
    }

    #[test]
    fn test_metric_formats() {
        assert_eq!(MetricFormat::Score.render(72.4), "72");
        assert_eq!(MetricFormat::Percent.render(2.345), "2.3%");
        assert_eq!(MetricFormat::SignedPercent.render(12.34), "+12.3%");
        assert_eq!(MetricFormat::SignedPercent.render(-4.0), "-4.0%");
        assert_eq!(MetricFormat::Growth.render(150.0), "+150%");
        assert_eq!(MetricFormat::WholePercent.render(35.0), "35%");
        assert_eq!(MetricFormat::Currency.render(129.0), "$129");
    }
}
