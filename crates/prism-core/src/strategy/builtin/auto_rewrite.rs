//! Rule-based rewriting by style, tone, length, audience and purpose.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use strum::{Display, EnumString};

use crate::error::Result;
use crate::metrics::{self, keys, sentences};
use crate::strategy::{Labels, MetricFormat, MetricSpec, ParamReader, Params, RunOutput, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Style {
    Professional,
    Casual,
    Persuasive,
    Technical,
    Creative,
    Concise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Tone {
    Professional,
    Friendly,
    Authoritative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LengthControl {
    Maintain,
    Expand,
    Condense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Audience {
    General,
    Technical,
    Business,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Purpose {
    Inform,
    Persuade,
    Entertain,
}

/// Parsed parameters for [`AutoRewrite`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    pub style: Style,
    pub tone: Tone,
    pub length: LengthControl,
    pub audience: Audience,
    pub purpose: Purpose,
    pub seo_keywords: Vec<String>,
    pub seo_optimization: bool,
    pub grammar_check: bool,
}

impl RewriteOptions {
    pub fn from_params(params: &Params) -> Result<Self> {
        let r = ParamReader::new(params);
        Ok(Self {
            style: r.parse_or("style", Style::Professional)?,
            tone: r.parse_or("tone", Tone::Professional)?,
            length: r.parse_or("lengthControl", LengthControl::Maintain)?,
            audience: r.parse_or("audience", Audience::General)?,
            purpose: r.parse_or("purpose", Purpose::Inform)?,
            seo_keywords: r.list("seoKeywords")?,
            seo_optimization: r.bool_or("seoOptimization", false)?,
            grammar_check: r.bool_or("grammarCheck", false)?,
        })
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

static SLANG: Lazy<Regex> = Lazy::new(|| re(r"(?i)\b(gonna|wanna|gotta|kinda|sorta)\b"));
static INFORMAL: Lazy<Regex> = Lazy::new(|| re(r"(?i)\b(awesome|cool|super|really)\b"));
static JARGON: Lazy<Regex> = Lazy::new(|| re(r"(?i)\b(utilize|implement|facilitate|expedite)\b"));
static CROWD: Lazy<Regex> = Lazy::new(|| re(r"(?i)\b(people|users|customers)\b"));
static VAGUE: Lazy<Regex> = Lazy::new(|| re(r"(?i)\b(thing|stuff|lots of)\b"));
static VERY_GOOD: Lazy<Regex> = Lazy::new(|| re(r"(?i)\bvery good\b"));
static BIG: Lazy<Regex> = Lazy::new(|| re(r"(?i)\bbig\b"));
static NICE: Lazy<Regex> = Lazy::new(|| re(r"(?i)\bnice\b"));
static WORDY_TO: Lazy<Regex> =
    Lazy::new(|| re(r"(?i)\b(in order to|for the purpose of|with the intention of)\b"));
static WORDY_BECAUSE: Lazy<Regex> =
    Lazy::new(|| re(r"(?i)\b(due to the fact that|owing to the fact that)\b"));
static WORDY_NOW: Lazy<Regex> =
    Lazy::new(|| re(r"(?i)\b(at this point in time|at the present time)\b"));
static THE_COMPANY: Lazy<Regex> = Lazy::new(|| re(r"(?i)\bthe company\b"));
static HEDGES: Lazy<Regex> = Lazy::new(|| re(r"(?i)\b(I think|maybe|perhaps|might)\b"));
static FILLERS: Lazy<Regex> =
    Lazy::new(|| re(r"(?i)\b(that is to say|in other words|to put it simply)\b"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| re(r"\s+"));
static SOFT_VERBS: Lazy<Regex> = Lazy::new(|| re(r"(?i)\b(help|make better)\b"));
static LONE_I: Lazy<Regex> = Lazy::new(|| re(r"\bi\b"));
static LOWER_AFTER_STOP: Lazy<Regex> = Lazy::new(|| re(r"([.!?])\s*([a-z])"));
static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| re(r"[ \t]{2,}"));

const PERSUASIVE_WORDS: &[&str] = &["proven", "guaranteed", "exclusive", "limited time", "revolutionary"];
const BUSINESS_TERMS: &[&str] = &["roi", "stakeholders", "strategic advantage", "market position"];
const ENTERTAINING_OPENERS: &[&str] = &["imagine", "picture this", "here's the thing"];

const METRICS: &[MetricSpec] = &[
    MetricSpec::score("Readability", keys::READABILITY),
    MetricSpec::score("Structure", keys::STRUCTURE),
    MetricSpec::score("Sentiment", keys::SENTIMENT),
    MetricSpec::score("SEO Score", keys::SEO_SCORE),
    MetricSpec::score("Grammar", keys::GRAMMAR_SCORE),
    MetricSpec::new("Keyword Density", keys::KEYWORD_DENSITY, MetricFormat::Percent),
    MetricSpec::score("Safety", keys::SAFETY),
    MetricSpec::new("Content Change", keys::TOKEN_DELTA_PCT, MetricFormat::SignedPercent),
];

/// Replaces every match of `pattern` using `table`, noting each replacement.
fn replace_each(
    text: &str,
    pattern: &Regex,
    table: &[(&str, &str)],
    improvements: &mut Vec<String>,
    note: impl Fn(&str) -> String,
) -> String {
    pattern
        .replace_all(text, |caps: &Captures<'_>| {
            let matched = &caps[0];
            improvements.push(note(matched));
            table
                .iter()
                .find(|(from, _)| from.eq_ignore_ascii_case(matched))
                .map(|(_, to)| (*to).to_string())
                .unwrap_or_else(|| matched.to_string())
        })
        .into_owned()
}

/// Replaces every match with `to`; returns `None` when nothing matched.
fn replace_if_match(text: &str, pattern: &Regex, to: &str) -> Option<String> {
    pattern
        .is_match(text)
        .then(|| pattern.replace_all(text, to).into_owned())
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    let lower = text.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}

/// Deterministic rewriter. Every improvement it reports names a rule that fired.
pub struct AutoRewrite {
    labels: Labels,
}

impl AutoRewrite {
    pub fn new() -> Self {
        Self {
            labels: Labels::new(
                "Rewrite Content",
                "Save Rewrite",
                "Copy Rewritten",
                "Content Editor",
                "Rewritten Content",
                "Original",
                "Improvements Made",
            ),
        }
    }

    /// Applies every rule selected by `opts` to `input`.
    pub fn rewrite(&self, input: &str, opts: &RewriteOptions) -> (String, Vec<String>) {
        let mut improvements = Vec::new();
        let mut output = input.to_string();

        output = apply_style(&output, opts.style, &mut improvements);
        output = apply_tone(&output, opts.tone, &mut improvements);
        output = apply_length(&output, opts.length, &mut improvements);
        output = apply_audience(&output, opts.audience, &mut improvements);
        output = apply_purpose(&output, opts.purpose, &mut improvements);

        if opts.seo_optimization && !opts.seo_keywords.is_empty() {
            output = apply_seo(&output, &opts.seo_keywords, &mut improvements);
        }
        if opts.grammar_check {
            output = apply_grammar(&output, &mut improvements);
        }

        (output, improvements)
    }
}

impl Default for AutoRewrite {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_style(text: &str, style: Style, improvements: &mut Vec<String>) -> String {
    match style {
        Style::Professional => {
            let out = replace_each(
                text,
                &SLANG,
                &[
                    ("gonna", "going to"),
                    ("wanna", "want to"),
                    ("gotta", "have to"),
                    ("kinda", "somewhat"),
                    ("sorta", "somewhat"),
                ],
                improvements,
                |m| format!("Enhanced formality: \"{}\" → professional equivalent", m),
            );
            replace_each(
                &out,
                &INFORMAL,
                &[
                    ("awesome", "excellent"),
                    ("cool", "effective"),
                    ("super", "highly"),
                    ("really", "significantly"),
                ],
                improvements,
                |m| format!("Professional vocabulary enhancement: \"{}\"", m),
            )
        }
        Style::Casual => replace_each(
            text,
            &JARGON,
            &[
                ("utilize", "use"),
                ("implement", "do"),
                ("facilitate", "help"),
                ("expedite", "speed up"),
            ],
            improvements,
            |m| format!("Casual tone: simplified \"{}\"", m),
        ),
        Style::Persuasive => {
            let mut out = text.to_string();
            if !out.contains("you") {
                if let Some(addressed) = replace_if_match(&out, &CROWD, "you") {
                    out = addressed;
                    improvements.push("Added direct address for persuasive impact".to_string());
                }
            }
            if sentences(&out).len() >= 2 && !contains_any(&out, PERSUASIVE_WORDS) {
                out.push_str(" This proven approach delivers guaranteed results.");
                improvements.push("Enhanced persuasive language".to_string());
            }
            out
        }
        Style::Technical => replace_each(
            text,
            &VAGUE,
            &[("thing", "component"), ("stuff", "elements"), ("lots of", "numerous")],
            improvements,
            |m| format!("Technical precision: replaced vague term \"{}\"", m),
        ),
        Style::Creative => {
            let mut out = text.to_string();
            for (pattern, to, desc) in [
                (&*VERY_GOOD, "exceptional", "vivid language"),
                (&*BIG, "tremendous", "expressive vocabulary"),
                (&*NICE, "delightful", "creative expression"),
            ] {
                if let Some(replaced) = replace_if_match(&out, pattern, to) {
                    out = replaced;
                    improvements.push(format!("Creative enhancement: {}", desc));
                }
            }
            out
        }
        Style::Concise => {
            let mut out = WORDY_TO.replace_all(text, "to").into_owned();
            out = WORDY_BECAUSE.replace_all(&out, "because").into_owned();
            out = WORDY_NOW.replace_all(&out, "now").into_owned();
            if out != text {
                improvements.push("Eliminated redundant phrases for conciseness".to_string());
            }
            out
        }
    }
}

fn apply_tone(text: &str, tone: Tone, improvements: &mut Vec<String>) -> String {
    match tone {
        Tone::Professional => text.to_string(),
        Tone::Friendly => {
            let mut out = text.to_string();
            if !out.contains('!') && out.chars().count() > 50 && out.ends_with('.') {
                out.pop();
                out.push('!');
                improvements.push("Added friendly enthusiasm".to_string());
            }
            if !contains_any(&out, &["we", "our"]) {
                if let Some(inclusive) = replace_if_match(&out, &THE_COMPANY, "we") {
                    out = inclusive;
                    improvements.push("Enhanced friendly, inclusive tone".to_string());
                }
            }
            out
        }
        Tone::Authoritative => replace_each(
            text,
            &HEDGES,
            &[
                ("i think", "Research shows"),
                ("maybe", "likely"),
                ("perhaps", "certainly"),
                ("might", "will"),
            ],
            improvements,
            |m| format!("Strengthened authority: removed tentative language \"{}\"", m),
        ),
    }
}

fn apply_length(text: &str, length: LengthControl, improvements: &mut Vec<String>) -> String {
    match length {
        LengthControl::Maintain => text.to_string(),
        LengthControl::Expand => {
            let parts = sentences(text);
            let mut expanded = false;
            let rebuilt: Vec<String> = parts
                .iter()
                .map(|s| {
                    let s = s.trim();
                    if s.split_whitespace().count() < 10 {
                        expanded = true;
                        format!("{}, providing comprehensive insights and actionable strategies", s)
                    } else {
                        s.to_string()
                    }
                })
                .collect();
            if !expanded {
                return text.to_string();
            }
            improvements.push("Expanded content with additional detail and context".to_string());
            format!("{}.", rebuilt.join(". "))
        }
        LengthControl::Condense => {
            let stripped = FILLERS.replace_all(text, "");
            let out = WHITESPACE.replace_all(&stripped, " ").trim().to_string();
            if out != text {
                improvements.push("Condensed content by removing redundancies".to_string());
            }
            out
        }
    }
}

fn apply_audience(text: &str, audience: Audience, improvements: &mut Vec<String>) -> String {
    match audience {
        Audience::General => text.to_string(),
        Audience::Technical => replace_each(
            text,
            &SOFT_VERBS,
            &[("help", "optimize"), ("make better", "enhance performance")],
            improvements,
            |m| format!("Technical audience: enhanced precision for \"{}\"", m),
        ),
        Audience::Business => {
            if contains_any(text, BUSINESS_TERMS) {
                return text.to_string();
            }
            improvements.push("Added business-focused terminology and value proposition".to_string());
            format!(
                "{} This approach delivers measurable ROI and strengthens market position.",
                text
            )
        }
    }
}

fn apply_purpose(text: &str, purpose: Purpose, improvements: &mut Vec<String>) -> String {
    match purpose {
        Purpose::Inform => text.to_string(),
        Purpose::Persuade => {
            if text.contains("you should") || text.contains("you need") {
                return text.to_string();
            }
            improvements.push("Added persuasive call-to-action".to_string());
            format!(
                "{} You should consider implementing this approach for optimal results.",
                text
            )
        }
        Purpose::Entertain => {
            if contains_any(text, ENTERTAINING_OPENERS) {
                return text.to_string();
            }
            improvements.push("Added engaging, entertaining opening".to_string());
            format!("Picture this: {}", text)
        }
    }
}

fn apply_seo(text: &str, keywords: &[String], improvements: &mut Vec<String>) -> String {
    let mut out = text.to_string();

    for keyword in keywords {
        if metrics::keyword_density(&out, std::slice::from_ref(keyword)) < 1.0 {
            out.push_str(&format!(
                " Learn more about {} and how it can transform your approach.",
                keyword
            ));
            improvements.push(format!("SEO optimization: integrated keyword \"{}\"", keyword));
        }
    }

    if !out.contains("# ") {
        let parts: Vec<String> = sentences(&out).iter().map(|s| s.trim().to_string()).collect();
        if let Some((title, rest)) = parts.split_first() {
            out = if rest.is_empty() {
                format!("# {}", title)
            } else {
                format!("# {}\n\n{}.", title, rest.join(". "))
            };
            improvements.push("Added SEO-optimized header structure".to_string());
        }
    }

    out
}

fn apply_grammar(text: &str, improvements: &mut Vec<String>) -> String {
    let out = LONE_I.replace_all(text, "I").into_owned();
    if out != text {
        improvements.push("Capitalized standalone \"i\"".to_string());
    }

    let out = LOWER_AFTER_STOP
        .replace_all(&out, |caps: &Captures<'_>| {
            improvements.push("Fixed capitalization after punctuation".to_string());
            format!("{} {}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned();

    let collapsed = SPACE_RUNS.replace_all(&out, " ").into_owned();
    if collapsed != out {
        improvements.push("Removed repeated spaces".to_string());
    }
    collapsed
}

impl Strategy for AutoRewrite {
    fn labels(&self) -> &Labels {
        &self.labels
    }

    fn metrics_config(&self) -> &[MetricSpec] {
        METRICS
    }

    fn run(&self, input: &str, params: &Params) -> Result<RunOutput> {
        let opts = RewriteOptions::from_params(params)?;
        let (output, improvements) = self.rewrite(input, &opts);
        let keywords = &opts.seo_keywords;

        let metrics = metrics::bag([
            (keys::READABILITY, metrics::readability(&output)),
            (keys::STRUCTURE, metrics::structure(&output)),
            (keys::SENTIMENT, metrics::sentiment(&output)),
            (keys::SEO_SCORE, metrics::seo_score(&output, keywords)),
            (keys::GRAMMAR_SCORE, metrics::grammar(&output)),
            (
                keys::KEYWORD_DENSITY,
                if keywords.is_empty() {
                    0.0
                } else {
                    metrics::keyword_density(&output, keywords)
                },
            ),
            (keys::SAFETY, metrics::safety(&output)),
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
