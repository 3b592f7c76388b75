//! Social-platform engagement heuristics.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::text::sentences;

/// Publishing target that tunes engagement scoring and content generation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Platform {
    Instagram,
    Tiktok,
    Twitter,
    Linkedin,
    Youtube,
    #[default]
    General,
}

const ENGAGEMENT_TRIGGERS: &[&str] = &[
    "how to", "why", "what", "when", "where", "tips", "secrets", "guide",
    "tutorial", "step by step", "beginner", "expert", "professional",
    "ultimate", "complete", "comprehensive", "essential", "must-know",
];

const EMOTIONAL_HOOKS: &[&str] = &[
    "amazing", "incredible", "shocking", "surprising", "unbelievable",
    "life-changing", "game-changing", "revolutionary", "breakthrough",
];

const CTA_WORDS: &[&str] = &[
    "click", "subscribe", "follow", "share", "comment", "like", "buy", "get", "download",
];

const VIRAL_TRIGGERS: &[&str] = &[
    "breaking", "exclusive", "first time", "never seen", "leaked",
    "behind the scenes", "secret", "hidden", "exposed", "revealed",
    "shocking", "unbelievable", "insane", "mind-blowing", "crazy",
];

const TRENDING_INDICATORS: &[&str] = &[
    "trending", "viral", "hot", "popular", "everyone is talking",
    "latest", "new", "just dropped", "now", "today",
];

const SHAREABILITY: &[&str] = &[
    "share", "tell your friends", "spread the word", "pass it on",
    "you have to see this", "check this out", "omg", "wow",
];

fn hits(lower: &str, vocabulary: &[&str]) -> f64 {
    vocabulary.iter().filter(|w| lower.contains(*w)).count() as f64
}

/// Predicted engagement for `text` on `platform`.
pub fn engagement(text: &str, platform: Platform) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let lower = text.to_lowercase();
    let len = text.chars().count();

    let mut score = hits(&lower, ENGAGEMENT_TRIGGERS) * 5.0 + hits(&lower, EMOTIONAL_HOOKS) * 8.0;

    match platform {
        Platform::Instagram => {
            if text.contains('#') {
                score += 10.0;
            }
            if len <= 2200 {
                score += 15.0;
            }
        }
        Platform::Twitter => {
            if len <= 280 {
                score += 20.0;
            }
            if text.contains('@') || text.contains('#') {
                score += 10.0;
            }
        }
        Platform::Linkedin => {
            if (1000..=3000).contains(&len) {
                score += 15.0;
            }
            if lower.contains("professional") || lower.contains("business") {
                score += 10.0;
            }
        }
        Platform::Tiktok => {
            if text.contains('#') {
                score += 15.0;
            }
            if lower.contains("trending") || lower.contains("viral") {
                score += 10.0;
            }
        }
        Platform::Youtube => {
            if text.contains("subscribe") || text.contains("like") {
                score += 10.0;
            }
            if len >= 1000 {
                score += 15.0;
            }
        }
        Platform::General => {}
    }

    if CTA_WORDS.iter().any(|w| lower.contains(w)) {
        score += 15.0;
    }

    score.min(100.0)
}

/// Likelihood of wide sharing, from trigger vocabulary and punctuation shape.
pub fn viral_potential(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let lower = text.to_lowercase();
    let mut score = hits(&lower, VIRAL_TRIGGERS) * 10.0
        + hits(&lower, TRENDING_INDICATORS) * 8.0
        + hits(&lower, SHAREABILITY) * 12.0;

    if text.contains('?') {
        score += 5.0;
    }
    if text.matches('!').count() > 1 {
        score += 10.0;
    }
    if (3..=10).contains(&sentences(text).len()) {
        score += 15.0;
    }

    score.min(100.0)
}
