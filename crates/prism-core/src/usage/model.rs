use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stored usage for one scope: `count` runs on `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub count: u32,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
}

impl UsageRecord {
    pub fn fresh(date: NaiveDate) -> Self {
        Self { count: 0, date }
    }

    /// The record as seen on `today`: unchanged for the same date, reset
    /// otherwise. Returns whether a reset happened.
    pub fn rolled_over(self, today: NaiveDate) -> (Self, bool) {
        if self.date == today {
            (self, false)
        } else {
            (Self::fresh(today), true)
        }
    }
}

/// Usage together with the plan ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageInfo {
    pub count: u32,
    pub date: NaiveDate,
    /// `None` for unlimited plans.
    pub limit: Option<u32>,
    /// `None` for unlimited plans, otherwise `max(0, limit - count)`.
    pub remaining: Option<u32>,
}

impl UsageInfo {
    pub fn new(record: UsageRecord, limit: Option<u32>) -> Self {
        Self {
            count: record.count,
            date: record.date,
            limit,
            remaining: limit.map(|l| l.saturating_sub(record.count)),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

/// Answer to "may this user run the product now?".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitCheck {
    pub allowed: bool,
    pub remaining: Option<u32>,
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LimitCheck {
    pub fn from_usage(usage: &UsageInfo) -> Self {
        let allowed = !usage.is_exhausted();
        let message = match usage.limit {
            Some(limit) if !allowed => Some(format!(
                "Daily limit of {} runs reached. Upgrade your plan or try again tomorrow.",
                limit
            )),
            _ => None,
        };
        Self {
            allowed,
            remaining: usage.remaining,
            limit: usage.limit,
            message,
        }
    }

    /// The answer when usage could not be determined.
    pub fn denied(message: impl Into<String>) -> Self {
        Self {
            allowed: false,
            remaining: Some(0),
            limit: None,
            message: Some(message.into()),
        }
    }
}
