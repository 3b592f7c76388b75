use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Subscription tier.
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
pub enum Plan {
    #[default]
    Free,
    Pro,
    Enterprise,
}

/// Daily run ceilings per plan. `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanLimits {
    pub free: Option<u32>,
    pub pro: Option<u32>,
    pub enterprise: Option<u32>,
}

impl Default for PlanLimits {
    fn default() -> Self {
        Self {
            free: Some(5),
            pro: None,
            enterprise: None,
        }
    }
}

impl PlanLimits {
    pub fn limit_for(&self, plan: Plan) -> Option<u32> {
        match plan {
            Plan::Free => self.free,
            Plan::Pro => self.pro,
            Plan::Enterprise => self.enterprise,
        }
    }
}

/// Resolves which plan a user is on.
pub trait PlanDirectory: Send + Sync {
    fn plan_for(&self, user_id: &str) -> Plan;
}

/// Plan assignments held in memory, usually loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticPlanDirectory {
    default_plan: Plan,
    users: HashMap<String, Plan>,
}

impl StaticPlanDirectory {
    pub fn new(default_plan: Plan) -> Self {
        Self {
            default_plan,
            users: HashMap::new(),
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>, plan: Plan) -> Self {
        self.users.insert(user_id.into(), plan);
        self
    }

    pub fn with_users(mut self, users: impl IntoIterator<Item = (String, Plan)>) -> Self {
        self.users.extend(users);
        self
    }
}

impl PlanDirectory for StaticPlanDirectory {
    fn plan_for(&self, user_id: &str) -> Plan {
        self.users.get(user_id).copied().unwrap_or(self.default_plan)
    }
}
