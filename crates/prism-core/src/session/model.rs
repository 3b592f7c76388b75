use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::MetricsBag;

pub const SESSION_ID_PREFIX: &str = "sess_";

/// A saved product run.
///
/// `id` and `created_at` are assigned once on creation and never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub input: String,
    pub output: String,
    #[serde(default)]
    pub metrics: MetricsBag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

/// Caller-supplied content for a new session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub input: String,
    pub output: String,
    #[serde(default)]
    pub metrics: MetricsBag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl NewSession {
    /// Stamps the content with its identity.
    pub fn into_session(self, id: String, created_at: DateTime<Utc>) -> Session {
        Session {
            id,
            created_at,
            title: self.title,
            tags: self.tags,
            input: self.input,
            output: self.output,
            metrics: self.metrics,
            diff: self.diff,
        }
    }
}

/// Partial update of a session. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    pub title: Option<String>,
    pub tags: Option<Vec<String>>,
    pub input: Option<String>,
    pub output: Option<String>,
    pub metrics: Option<MetricsBag>,
    pub diff: Option<String>,
}

impl SessionPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Session {
    /// Merges `patch` into the session. Identity fields are not patchable.
    pub fn apply(&mut self, patch: SessionPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(input) = patch.input {
            self.input = input;
        }
        if let Some(output) = patch.output {
            self.output = output;
        }
        if let Some(metrics) = patch.metrics {
            self.metrics = metrics;
        }
        if let Some(diff) = patch.diff {
            self.diff = Some(diff);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Session {
        NewSession {
            title: "Draft".to_string(),
            tags: vec!["blog".to_string()],
            input: "in".to_string(),
            output: "out".to_string(),
            metrics: MetricsBag::from([("readability".to_string(), 72.5)]),
            diff: None,
        }
        .into_session(
            "sess_1".to_string(),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["createdAt"], "2024-03-01T12:00:00Z");
        assert_eq!(json["metrics"]["readability"], 72.5);
        assert!(json.get("diff").is_none());
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut session = sample();
        let created_at = session.created_at;
        session.apply(SessionPatch {
            title: Some("Final".to_string()),
            diff: Some("+ x".to_string()),
            ..Default::default()
        });
        assert_eq!(session.id, "sess_1");
        assert_eq!(session.created_at, created_at);
        assert_eq!(session.title, "Final");
        assert_eq!(session.tags, vec!["blog"]);
        assert_eq!(session.diff.as_deref(), Some("+ x"));
    }

    #[test]
    fn test_empty_patch() {
        assert!(SessionPatch::default().is_empty());
        let patch = SessionPatch {
            tags: Some(vec![]),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
