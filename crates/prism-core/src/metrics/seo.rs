//! Keyword and search-oriented scores.

use once_cell::sync::Lazy;
use regex::Regex;

use super::text::word_count;

static H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#\s").expect("valid regex"));
static H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^##\s").expect("valid regex"));
static H3: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^###\s").expect("valid regex"));
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-*•]|\d+\.").expect("valid regex"));

static COMPLIANCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(must|required|mandatory|shall)\b",
        r"(?i)\b(guideline|regulation|standard|policy)\b",
        r"(?i)\b(compliant|accordance|conform)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Weighted heading, length, keyword-density and list-structure score.
pub fn seo_score<S: AsRef<str>>(text: &str, keywords: &[S]) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let mut score = 0.0;

    match H1.find_iter(text).count() {
        0 => {}
        1 => score += 20.0,
        _ => score += 10.0,
    }
    if H2.is_match(text) {
        score += 15.0;
    }
    if H3.is_match(text) {
        score += 10.0;
    }

    let words = word_count(text);
    if (300..=2000).contains(&words) {
        score += 20.0;
    } else if words > 2000 {
        score += 15.0;
    } else if words >= 150 {
        score += 10.0;
    }

    if !keywords.is_empty() {
        let density = keyword_density(text, keywords);
        if (1.0..=3.0).contains(&density) {
            score += 20.0;
        } else if density > 0.0 {
            score += 10.0;
        }
    }

    if LIST_MARKER.is_match(text) {
        score += 15.0;
    }

    f64::min(score, 100.0)
}

/// Keyword hits as a percentage of all words.
///
/// Single-word keywords match any word containing them; multi-word keywords
/// count phrase occurrences in the whitespace-normalized text.
pub fn keyword_density<S: AsRef<str>>(text: &str, keywords: &[S]) -> f64 {
    if text.is_empty() || keywords.is_empty() {
        return 0.0;
    }

    let lower = text.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let joined = words.join(" ");

    let mut hits = 0usize;
    for keyword in keywords {
        let keyword = keyword.as_ref().to_lowercase();
        let parts: Vec<&str> = keyword.split_whitespace().collect();
        match parts.as_slice() {
            [] => {}
            [single] => hits += words.iter().filter(|w| w.contains(single)).count(),
            _ => hits += joined.matches(parts.join(" ").as_str()).count(),
        }
    }

    hits as f64 / words.len() as f64 * 100.0
}

/// Percentage of `keywords` that appear anywhere in `text` (case-insensitive).
pub fn coverage<S: AsRef<str>>(text: &str, keywords: &[S]) -> f64 {
    if text.is_empty() || keywords.is_empty() {
        return 0.0;
    }

    let lower = text.to_lowercase();
    let matched = keywords
        .iter()
        .filter(|k| lower.contains(&k.as_ref().to_lowercase()))
        .count();

    matched as f64 / keywords.len() as f64 * 100.0
}

/// Capped sum of regulatory-vocabulary hits.
pub fn compliance(text: &str) -> f64 {
    let score: f64 = COMPLIANCE_PATTERNS
        .iter()
        .map(|re| (re.find_iter(text).count() as f64 * 5.0).min(25.0))
        .sum();
    score.min(100.0)
}
