use once_cell::sync::Lazy;
use regex::Regex;

/// Text and the improvements one stage applied to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
    pub text: String,
    pub improvements: Vec<String>,
}

impl StageOutcome {
    fn new(text: String) -> Self {
        Self {
            text,
            improvements: Vec::new(),
        }
    }

    /// Appends `directive` as a new paragraph unless `present` already matches.
    fn append_unless(&mut self, present: &Regex, directive: &str, improvement: &str) {
        if !present.is_match(&self.text) {
            self.text = format!("{}\n\n{}", self.text, directive);
            self.improvements.push(improvement.to_string());
        }
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

static ROLE_PREFIX: Lazy<Regex> = Lazy::new(|| re(r"(?i)^\s*(You are|Act as|Imagine you|Assume the role)"));
static TERMINATED: Lazy<Regex> = Lazy::new(|| re(r"[.!?]\s*$"));
static INSTRUCTION_PREFIX: Lazy<Regex> = Lazy::new(|| re(r"(?i)^\s*(Please|You are|Act as)"));
static STRUCTURE_WORDS: Lazy<Regex> = Lazy::new(|| re(r"(?i)structure|organize|format"));
static SPECIFICITY_WORDS: Lazy<Regex> = Lazy::new(|| re(r"(?i)constraint|limitation|specific"));
static CLARITY_WORDS: Lazy<Regex> = Lazy::new(|| re(r"(?i)clear|concise|understandable"));
static ACTIONABLE_WORDS: Lazy<Regex> = Lazy::new(|| re(r"(?i)actionable|step|procedure"));
static ETHICS_WORDS: Lazy<Regex> = Lazy::new(|| re(r"(?i)ethical|bias|inclusive|respectful"));
static ACCURACY_WORDS: Lazy<Regex> = Lazy::new(|| re(r"(?i)accurate|fact|verify|evidence"));

pub const ROLE_DEFINITION: &str = "Act as a professional expert in this domain.";
pub const INSTRUCTION_LEAD: &str = "Please provide a detailed response that:";
pub const STRUCTURE_DIRECTIVE: &str = "Structure your response with clear sections or bullet points.";
pub const SPECIFICITY_DIRECTIVE: &str = "Be specific and include concrete examples where relevant.";
pub const CLARITY_DIRECTIVE: &str =
    "Be clear, concise, and ensure all information is accurate and helpful.";
pub const ACTIONABLE_DIRECTIVE: &str = "Provide actionable steps or procedures where applicable.";
pub const ETHICS_DIRECTIVE: &str =
    "Follow ethical guidelines, avoid bias, and be respectful in your response.";
pub const ACCURACY_DIRECTIVE: &str = "Ensure accuracy and provide evidence-based information.";

/// Stage 1: role prefix, terminal punctuation, leading capital.
pub fn normalize_tone(text: &str) -> StageOutcome {
    let mut out = StageOutcome::new(text.trim().to_string());

    if !ROLE_PREFIX.is_match(&out.text) {
        out.text = format!("{} {}", ROLE_DEFINITION, out.text);
        out.improvements
            .push("Added role definition for better context".to_string());
    }

    if !TERMINATED.is_match(&out.text) {
        out.text.push('.');
        out.improvements
            .push("Added proper sentence termination".to_string());
    }

    let mut chars = out.text.chars();
    if let Some(first) = chars.next().filter(|c| c.is_lowercase()) {
        out.text = first.to_uppercase().chain(chars).collect();
        out.improvements.push("Capitalized first letter".to_string());
    }

    out
}

/// Stage 2: instruction lead-in, structure and specificity directives.
pub fn enforce_structure(text: &str) -> StageOutcome {
    let mut out = StageOutcome::new(text.to_string());

    if !INSTRUCTION_PREFIX.is_match(&out.text) {
        out.text = format!("{}\n{}", INSTRUCTION_LEAD, out.text);
        out.improvements
            .push("Added clear instruction format".to_string());
    }

    out.append_unless(
        &STRUCTURE_WORDS,
        STRUCTURE_DIRECTIVE,
        "Added structure requirements",
    );
    out.append_unless(
        &SPECIFICITY_WORDS,
        SPECIFICITY_DIRECTIVE,
        "Added specificity requirements",
    );

    out
}

/// Stage 3: clarity and actionability directives.
pub fn apply_constraints(text: &str) -> StageOutcome {
    let mut out = StageOutcome::new(text.to_string());
    out.append_unless(&CLARITY_WORDS, CLARITY_DIRECTIVE, "Added clarity requirements");
    out.append_unless(
        &ACTIONABLE_WORDS,
        ACTIONABLE_DIRECTIVE,
        "Added actionable requirements",
    );
    out
}

/// Stage 4: ethics and accuracy directives.
pub fn apply_safety(text: &str) -> StageOutcome {
    let mut out = StageOutcome::new(text.to_string());
    out.append_unless(&ETHICS_WORDS, ETHICS_DIRECTIVE, "Added ethical guidelines");
    out.append_unless(&ACCURACY_WORDS, ACCURACY_DIRECTIVE, "Added accuracy requirements");
    out
}
