use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}\s]+)\}").expect("valid regex"));

/// Placeholder names in order of first appearance, without duplicates.
///
/// ```
/// use prism_core::template::extract_variables;
///
/// let vars = extract_variables("Write about {topic} for {audience}, focusing on {topic}.");
/// assert_eq!(vars, vec!["topic", "audience"]);
/// ```
pub fn extract_variables(body: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(body) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Replaces every `{name}` occurrence that has a value. Placeholders without
/// a value are left as they are.
pub fn substitute<'a>(text: &'a str, values: &HashMap<String, String>) -> Cow<'a, str> {
    if values.is_empty() {
        return Cow::Borrowed(text);
    }
    PLACEHOLDER.replace_all(text, |caps: &Captures<'_>| match values.get(&caps[1]) {
        Some(value) => value.clone(),
        None => caps[0].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extract_unique_in_order() {
        assert_eq!(
            extract_variables("{b} then {a} then {b} and { not this }"),
            vec!["b", "a"]
        );
        assert!(extract_variables("no placeholders").is_empty());
    }

    #[test]
    fn test_substitute_replaces_every_occurrence() {
        let out = substitute("{x} + {x} = {y}", &values(&[("x", "1"), ("y", "2")]));
        assert_eq!(out, "1 + 1 = 2");
    }

    #[test]
    fn test_substitute_keeps_unknown_placeholders() {
        let out = substitute("Hi {name}, see {link}", &values(&[("name", "Ann")]));
        assert_eq!(out, "Hi Ann, see {link}");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let out = substitute("{a}", &values(&[("a", "{b}"), ("b", "boom")]));
        assert_eq!(out, "{b}");
    }
}
