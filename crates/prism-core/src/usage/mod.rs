//! Daily usage accounting.
//!
//! One [`UsageRecord`] is kept per scope. The record belongs to a single
//! calendar date and starts over at zero on the first access of a new date.
//! Limits come from the user's [`Plan`].

mod clock;
mod model;
mod plan;
mod repository;

pub use clock::{Clock, FixedClock, SystemClock};
pub use model::{LimitCheck, UsageInfo, UsageRecord};
pub use plan::{Plan, PlanDirectory, PlanLimits, StaticPlanDirectory};
pub use repository::{UsageRepository, UsageUpdate};
