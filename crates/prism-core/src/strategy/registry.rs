//! Product id to strategy lookup.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::builtin::{
    AutoRewrite, BundleBuilder, ContentSpawner, LeadGeneration, NovusProtocol, SeoOptimizer,
};
use super::{LabelOverrides, Strategy, with_labels};
use crate::error::{PrismError, Result};

pub const NOVUS_PROTOCOL: &str = "novus-protocol";
pub const AUTO_REWRITE: &str = "auto-rewrite";
pub const CONTENT_SPAWNER: &str = "content-spawner";
pub const SEO_OPTIMIZER: &str = "seo-optimizer-pro";
pub const LEAD_GENERATION: &str = "lead-generation-pro";
pub const BUNDLE_BUILDER: &str = "bundle-builder";

/// `(product id, base product id, run, result, improvements)` for products that
/// only relabel a base strategy.
const DERIVED: &[(&str, &str, &str, &str, &str)] = &[
    ("live-dashboard", AUTO_REWRITE, "Update Dashboard", "Dashboard Content", "Dashboard Updates"),
    ("customer-service-ai", AUTO_REWRITE, "Generate Response", "Service Response", "Response Quality"),
    ("education-ai-compliance", AUTO_REWRITE, "Check Compliance", "Compliance Report", "Compliance Updates"),
    ("financial-ai-compliance", AUTO_REWRITE, "Check Compliance", "Compliance Report", "Compliance Updates"),
    ("healthcare-ai-compliance", AUTO_REWRITE, "Check Compliance", "Compliance Report", "Compliance Updates"),
    ("legal-ai-compliance", AUTO_REWRITE, "Check Compliance", "Compliance Report", "Compliance Updates"),
    ("medical-ai-assistant", AUTO_REWRITE, "Generate Response", "Medical Response", "Response Quality"),
    ("quantum-ai-processor", AUTO_REWRITE, "Process Data", "Processed Output", "Processing Enhancements"),
    ("affiliate-portal", LEAD_GENERATION, "Generate Affiliate", "Affiliate Content", "Affiliate Features"),
    ("email-marketing-suite", LEAD_GENERATION, "Create Campaign", "Email Campaign", "Campaign Features"),
    ("aesthetic-generator", CONTENT_SPAWNER, "Generate Aesthetic", "Design Elements", "Design Features"),
    ("auto-niche-engine", CONTENT_SPAWNER, "Discover Niche", "Niche Analysis", "Niche Insights"),
    ("content-calendar-pro", CONTENT_SPAWNER, "Generate Calendar", "Content Schedule", "Calendar Features"),
    ("invoice-generator", CONTENT_SPAWNER, "Generate Invoice", "Invoice Content", "Invoice Features"),
    ("podcast-producer", CONTENT_SPAWNER, "Create Script", "Podcast Script", "Script Features"),
    ("project-management-pro", CONTENT_SPAWNER, "Generate Plan", "Project Plan", "Plan Features"),
    ("prompt-packs", CONTENT_SPAWNER, "Generate Prompts", "Prompt Collection", "Prompt Features"),
    ("social-media-manager", CONTENT_SPAWNER, "Create Posts", "Social Content", "Content Features"),
    ("time-tracking-ai", CONTENT_SPAWNER, "Generate Report", "Time Report", "Report Features"),
    ("video-editor-ai", CONTENT_SPAWNER, "Generate Script", "Video Script", "Script Features"),
    ("ecommerce-optimizer", SEO_OPTIMIZER, "Optimize Store", "Optimized Content", "Store Improvements"),
];

/// Registered products, ordered by id.
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: BTreeMap<String, Arc<dyn Strategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in base and derived product.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(NOVUS_PROTOCOL, Arc::new(NovusProtocol::new()));
        registry.register(AUTO_REWRITE, Arc::new(AutoRewrite::new()));
        registry.register(CONTENT_SPAWNER, Arc::new(ContentSpawner::new()));
        registry.register(SEO_OPTIMIZER, Arc::new(SeoOptimizer::new()));
        registry.register(LEAD_GENERATION, Arc::new(LeadGeneration::new()));
        registry.register(BUNDLE_BUILDER, Arc::new(BundleBuilder::new()));

        for &(id, base, run, result, improvements) in DERIVED {
            if let Some(base) = registry.get(base) {
                let derived = with_labels(
                    base,
                    LabelOverrides::run_result_improvements(run, result, improvements),
                );
                registry.register(id, derived);
            }
        }
        registry
    }

    /// Adds or replaces the strategy for `product_id`.
    pub fn register(&mut self, product_id: impl Into<String>, strategy: Arc<dyn Strategy>) {
        self.strategies.insert(product_id.into(), strategy);
    }

    pub fn get(&self, product_id: &str) -> Option<Arc<dyn Strategy>> {
        self.strategies.get(product_id).cloned()
    }

    /// Like [`get`](Self::get) but fails with `UnknownProduct`.
    pub fn require(&self, product_id: &str) -> Result<Arc<dyn Strategy>> {
        self.get(product_id)
            .ok_or_else(|| PrismError::UnknownProduct(product_id.to_string()))
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.strategies.contains_key(product_id)
    }

    pub fn product_ids(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Strategy>)> {
        self.strategies.iter().map(|(id, s)| (id.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.strategies.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Params;
    use serde_json::json;

    const SAMPLE: &str = "Our team is gonna launch a really nice product for customers. It helps people.";

    #[test]
    fn test_builtin_contains_every_product() {
        let registry = StrategyRegistry::builtin();
        assert_eq!(registry.len(), 6 + DERIVED.len());
        for id in [NOVUS_PROTOCOL, AUTO_REWRITE, CONTENT_SPAWNER, SEO_OPTIMIZER, LEAD_GENERATION, BUNDLE_BUILDER] {
            assert!(registry.contains(id), "missing {id}");
        }
        for (id, ..) in DERIVED {
            assert!(registry.contains(id), "missing {id}");
        }
    }

    #[test]
    fn test_unknown_product() {
        let err = StrategyRegistry::builtin().require("nope").err().unwrap();
        assert!(matches!(err, PrismError::UnknownProduct(ref id) if id == "nope"));
    }

    #[test]
    fn test_derived_products_share_base_behavior() {
        let registry = StrategyRegistry::builtin();
        let params = Params::new();
        for (id, base_id, run, ..) in DERIVED {
            let derived = registry.require(id).unwrap();
            let base = registry.require(base_id).unwrap();
            assert_eq!(derived.labels().run, *run);
            assert_eq!(derived.metrics_config(), base.metrics_config());
            if base.is_deterministic() {
                assert_eq!(
                    derived.run(SAMPLE, &params).unwrap(),
                    base.run(SAMPLE, &params).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_every_strategy_is_deterministic_or_seedable() {
        let registry = StrategyRegistry::builtin();
        let mut seeded = Params::new();
        seeded.insert("seed".to_string(), json!(1234));

        for (id, strategy) in registry.iter() {
            let params = if strategy.is_deterministic() { Params::new() } else { seeded.clone() };
            let first = strategy.run(SAMPLE, &params).unwrap();
            let second = strategy.run(SAMPLE, &params).unwrap();
            assert_eq!(first, second, "{id} is not reproducible");
        }
    }

    #[test]
    fn test_metrics_match_config_and_bounds() {
        let registry = StrategyRegistry::builtin();
        let mut params = Params::new();
        params.insert("seed".to_string(), json!(5));

        for (id, strategy) in registry.iter() {
            let out = strategy.run(SAMPLE, &params).unwrap();
            for spec in strategy.metrics_config() {
                assert!(out.metrics.contains_key(spec.key), "{id} missing {}", spec.key);
            }
            for key in ["readability", "structure", "safety", "sentiment", "grammarScore", "seoScore"] {
                if let Some(v) = out.metrics.get(key) {
                    assert!((0.0..=100.0).contains(v), "{id} {key}={v}");
                }
            }
        }
    }
}
