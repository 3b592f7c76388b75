//! Per-user, per-product daily quota.
//!
//! Each scope owns one [`UsageRecord`]. Reads that land on a new calendar date
//! reset the record to zero and persist the reset before anything else looks
//! at it. Every debit is a single atomic read-modify-write in the usage
//! repository, so callers in other processes sharing the same store can never
//! push the count past the plan limit either. Within one process, debits of a
//! scope also queue on an async lock.
//!
//! Storage failures fail closed: the scope is treated as having no remaining
//! runs.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use prism_core::Scope;
use prism_core::error::Result;
use prism_core::usage::{
    Clock, LimitCheck, PlanDirectory, PlanLimits, UsageInfo, UsageRecord, UsageRepository,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Today's view of `stored`, and whether it differs from what is stored.
fn rolled_over(stored: Option<UsageRecord>, today: NaiveDate) -> (UsageRecord, bool) {
    match stored {
        Some(record) => record.rolled_over(today),
        None => (UsageRecord::fresh(today), false),
    }
}

/// What one debit attempt does to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Debit {
    current: UsageRecord,
    write: Option<UsageRecord>,
    granted: bool,
}

impl Debit {
    fn plan(stored: Option<UsageRecord>, today: NaiveDate, limit: Option<u32>) -> Self {
        let (current, reset) = rolled_over(stored, today);
        if UsageInfo::new(current, limit).is_exhausted() {
            return Self {
                current,
                write: reset.then_some(current),
                granted: false,
            };
        }
        Self {
            current,
            write: Some(UsageRecord {
                count: current.count.saturating_add(1),
                date: current.date,
            }),
            granted: true,
        }
    }
}

pub struct QuotaManager {
    repository: Arc<dyn UsageRepository>,
    plans: Arc<dyn PlanDirectory>,
    limits: PlanLimits,
    clock: Arc<dyn Clock>,
    /// One lock per scope with a debit in flight.
    locks: Mutex<HashMap<Scope, Arc<Mutex<()>>>>,
}

impl QuotaManager {
    pub fn new(
        repository: Arc<dyn UsageRepository>,
        plans: Arc<dyn PlanDirectory>,
        limits: PlanLimits,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            plans,
            limits,
            clock,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Daily ceiling for `user_id`; `None` when unlimited.
    pub fn limit_for(&self, user_id: &str) -> Option<u32> {
        self.limits.limit_for(self.plans.plan_for(user_id))
    }

    async fn lock_for(&self, scope: &Scope) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(scope.clone()).or_default().clone()
    }

    /// Drops the scope's lock from the map once no other caller holds it.
    async fn release(&self, scope: &Scope, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        drop(lock);
        if locks.get(scope).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(scope);
        }
    }

    /// Usage of `scope` for today.
    pub async fn get_usage(&self, scope: &Scope) -> Result<UsageInfo> {
        let today = self.clock.today();
        let limit = self.limit_for(&scope.user_id);

        let (record, reset) = rolled_over(self.repository.load(scope).await?, today);
        if !reset {
            return Ok(UsageInfo::new(record, limit));
        }

        debug!(%scope, %today, "Resetting daily usage");
        let seen = self
            .repository
            .update(
                scope,
                Box::new(move |stored| {
                    let (record, reset) = rolled_over(stored, today);
                    reset.then_some(record)
                }),
            )
            .await?;
        let (record, _) = rolled_over(seen, today);
        Ok(UsageInfo::new(record, limit))
    }

    /// Whether `scope` may run now. Never errors.
    pub async fn check_limits(&self, scope: &Scope) -> LimitCheck {
        match self.get_usage(scope).await {
            Ok(usage) => LimitCheck::from_usage(&usage),
            Err(e) => {
                warn!(%scope, error = %e, "Usage unavailable, denying run");
                LimitCheck::denied("Usage could not be verified. Please try again later.")
            }
        }
    }

    /// Debits one run. `false` when the limit is reached or usage could not be
    /// read or written; the count is unchanged in that case.
    pub async fn consume_quota(&self, scope: &Scope) -> bool {
        let lock = self.lock_for(scope).await;
        let granted = {
            let _guard = lock.lock().await;
            self.debit(scope).await
        };
        self.release(scope, lock).await;
        granted
    }

    async fn debit(&self, scope: &Scope) -> bool {
        let today = self.clock.today();
        let limit = self.limit_for(&scope.user_id);

        let seen = self
            .repository
            .update(
                scope,
                Box::new(move |stored| Debit::plan(stored, today, limit).write),
            )
            .await;
        let debit = match seen {
            Ok(stored) => Debit::plan(stored, today, limit),
            Err(e) => {
                warn!(%scope, error = %e, "Usage unavailable, refusing to debit");
                return false;
            }
        };

        if !debit.granted {
            debug!(%scope, count = debit.current.count, "Daily limit reached");
            return false;
        }
        info!(%scope, count = debit.current.count + 1, limit = ?limit, "Debited one run");
        true
    }
}
