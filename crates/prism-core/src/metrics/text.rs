//! General-purpose text scores: readability, structure, safety, sentiment,
//! grammar and token estimates.

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("valid regex"));
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-*•]").expect("valid regex"));
static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.").expect("valid regex"));
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[#*]+\s+").expect("valid regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

const SAFETY_KEYWORDS: &[&str] = &[
    "ethical",
    "bias",
    "inclusive",
    "respectful",
    "accurate",
    "evidence",
    "verified",
    "reliable",
    "harmful",
    "unsafe",
    "appropriate",
    "consent",
    "privacy",
    "confidential",
];

static SAFETY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    SAFETY_KEYWORDS
        .iter()
        .map(|k| Regex::new(&format!(r"(?i)\b{}\b", k)).expect("valid regex"))
        .collect()
});

const POSITIVE_WORDS: &[&str] = &[
    "excellent", "amazing", "fantastic", "great", "wonderful", "outstanding",
    "brilliant", "superb", "perfect", "awesome", "incredible", "marvelous",
    "love", "enjoy", "happy", "excited", "thrilled", "delighted", "pleased",
    "satisfied", "success", "achievement", "victory", "triumph", "benefit",
    "advantage", "opportunity", "valuable", "helpful", "useful", "effective",
];

const NEGATIVE_WORDS: &[&str] = &[
    "terrible", "awful", "horrible", "bad", "worst", "disappointing",
    "frustrating", "annoying", "difficult", "impossible", "failure",
    "problem", "issue", "concern", "worry", "fear", "hate", "dislike",
    "angry", "upset", "sad", "depressed", "confused", "lost", "stuck",
    "broken", "wrong", "error", "mistake", "disadvantage", "useless",
];

static GRAMMAR_ISSUES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(their|there|they're)\s+(are|is)\b",
        r"(?i)\b(your|you're)\s+(are|is)\b",
        r"(?i)\b(its|it's)\s+(a|an|the)\b",
        r"[.!?]\s*[a-z]",
        r"\s{2,}",
        r"[,;:]\s*[A-Z]",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Non-empty sentence fragments, split on runs of terminal punctuation.
pub(crate) fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_SPLIT
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .collect()
}

pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub(crate) fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

/// Flesch-style readability from sentence length and long-word ratio.
pub fn readability(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let sentence_count = sentences(text).len();
    let words: Vec<&str> = text.split_whitespace().collect();
    if sentence_count == 0 || words.is_empty() {
        return 0.0;
    }

    let avg_sentence_length = words.len() as f64 / sentence_count as f64;
    let complex_words = words.iter().filter(|w| w.chars().count() > 6).count();
    let complex_ratio = complex_words as f64 / words.len() as f64;

    clamp_score(206.835 - 1.015 * avg_sentence_length - 84.6 * complex_ratio)
}

/// Capped contributions from line breaks, bullets, numbered items and headings.
pub fn structure(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let line_breaks = text.matches('\n').count() as f64;
    let bullets = BULLET.find_iter(text).count() as f64;
    let numbered = NUMBERED.find_iter(text).count() as f64;
    let sections = HEADING.find_iter(text).count() as f64;

    let score = (line_breaks * 5.0).min(30.0)
        + (bullets * 4.0).min(20.0)
        + (numbered * 4.0).min(20.0)
        + (sections * 10.0).min(30.0);

    score.min(100.0)
}

/// Ten points per distinct safety keyword present as a whole word.
pub fn safety(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let matches = SAFETY_PATTERNS.iter().filter(|re| re.is_match(text)).count() as f64;
    (matches * 10.0).min(100.0)
}

/// Share of positive hits among all sentiment hits; 50 is neutral.
pub fn sentiment(text: &str) -> f64 {
    if text.is_empty() {
        return 50.0;
    }

    let lower = text.to_lowercase();
    let mut positive = 0usize;
    let mut negative = 0usize;

    for word in lower.split_whitespace() {
        if POSITIVE_WORDS.iter().any(|p| word.contains(p)) {
            positive += 1;
        }
        if NEGATIVE_WORDS.iter().any(|n| word.contains(n)) {
            negative += 1;
        }
    }

    let total = positive + negative;
    if total == 0 {
        return 50.0;
    }

    clamp_score(positive as f64 / total as f64 * 100.0)
}

/// Starts at 100 and deducts fixed penalties per detected issue.
pub fn grammar(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let mut score = 100.0;
    for pattern in GRAMMAR_ISSUES.iter() {
        score -= pattern.find_iter(text).count() as f64 * 5.0;
    }

    let parts = sentences(text);
    if !parts.is_empty() {
        // Segments between whitespace runs, so the space after a full stop
        // adds an empty leading segment to the next sentence.
        let total_words: usize = parts.iter().map(|s| WHITESPACE_RUN.split(s).count()).sum();
        let avg = total_words as f64 / parts.len() as f64;
        if avg > 30.0 {
            score -= 10.0;
        }
        if avg < 5.0 {
            score -= 10.0;
        }
    }

    clamp_score(score)
}

/// Rough token estimate: one token per four characters, rounded up.
pub fn token_count(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Signed percentage change in estimated tokens from `original` to `result`.
pub fn token_delta_pct(original: &str, result: &str) -> f64 {
    let original_tokens = token_count(original);
    if original_tokens == 0 {
        return 0.0;
    }
    let result_tokens = token_count(result);
    (result_tokens as f64 - original_tokens as f64) / original_tokens as f64 * 100.0
}
