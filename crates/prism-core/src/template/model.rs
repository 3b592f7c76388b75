use serde::{Deserialize, Serialize};

use super::variables::extract_variables;

pub const TEMPLATE_ID_PREFIX: &str = "tmpl_";

/// A named text pattern with `{variable}` placeholders.
///
/// `variables` is informational; it is not checked against `body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub variables: Vec<String>,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,
    #[serde(default)]
    pub variables: Vec<String>,
    pub body: String,
}

impl NewTemplate {
    /// Declares exactly the placeholders found in `body`.
    pub fn from_body(name: impl Into<String>, body: impl Into<String>) -> Self {
        let body = body.into();
        Self {
            name: name.into(),
            variables: extract_variables(&body),
            body,
        }
    }

    pub fn into_template(self, id: String) -> Template {
        Template {
            id,
            name: self.name,
            variables: self.variables,
            body: self.body,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePatch {
    pub name: Option<String>,
    pub variables: Option<Vec<String>>,
    pub body: Option<String>,
}

impl Template {
    pub fn apply(&mut self, patch: TemplatePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(variables) = patch.variables {
            self.variables = variables;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_fills_variables() {
        let new = NewTemplate::from_body("Blog intro", "Write about {topic} for {audience}.");
        assert_eq!(new.variables, vec!["topic", "audience"]);
        let template = new.into_template("tmpl_1".to_string());
        assert_eq!(template.id, "tmpl_1");
    }

    #[test]
    fn test_apply_leaves_unset_fields() {
        let mut template = NewTemplate::from_body("A", "{x}").into_template("tmpl_1".to_string());
        template.apply(TemplatePatch {
            name: Some("B".to_string()),
            ..Default::default()
        });
        assert_eq!(template.name, "B");
        assert_eq!(template.body, "{x}");
        assert_eq!(template.variables, vec!["x"]);
    }
}
