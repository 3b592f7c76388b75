//! Pure text-scoring functions.
//!
//! Every score is deterministic and lies in `0..=100`, except the token delta
//! which is a signed percentage. Strategies collect their scores into a
//! [`MetricsBag`], keyed by the camelCase names persisted with sessions.

mod engagement;
mod seo;
mod text;

use std::collections::BTreeMap;

pub use engagement::{Platform, engagement, viral_potential};
pub use seo::{compliance, coverage, keyword_density, seo_score};
pub use text::{grammar, readability, safety, sentiment, structure, token_count, token_delta_pct};

pub(crate) use text::sentences;

/// Named scores produced by one run.
///
/// Ordered so that serialized sessions are byte-stable.
pub type MetricsBag = BTreeMap<String, f64>;

/// Well-known metric keys.
pub mod keys {
    pub const READABILITY: &str = "readability";
    pub const STRUCTURE: &str = "structure";
    pub const SAFETY: &str = "safety";
    pub const SENTIMENT: &str = "sentiment";
    pub const SEO_SCORE: &str = "seoScore";
    pub const GRAMMAR_SCORE: &str = "grammarScore";
    pub const KEYWORD_DENSITY: &str = "keywordDensity";
    pub const KEYWORD_COVERAGE: &str = "keywordCoverage";
    pub const COVERAGE: &str = "coverage";
    pub const COMPLIANCE: &str = "compliance";
    pub const ENGAGEMENT: &str = "engagement";
    pub const VIRAL_POTENTIAL: &str = "viralPotential";
    pub const TOKEN_DELTA_PCT: &str = "tokenDeltaPct";
}

/// Builds a [`MetricsBag`] from `(key, value)` pairs.
pub fn bag<I>(entries: I) -> MetricsBag
where
    I: IntoIterator<Item = (&'static str, f64)>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
