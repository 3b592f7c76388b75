use std::sync::RwLock;

use chrono::{Days, NaiveDate, Utc};

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// UTC date of the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A settable date for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    today: RwLock<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: RwLock::new(today),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        match self.today.write() {
            Ok(mut guard) => *guard = today,
            Err(poisoned) => *poisoned.into_inner() = today,
        }
    }

    /// Moves the clock forward by whole days.
    pub fn advance_days(&self, days: u64) {
        let next = self.today() + Days::new(days);
        self.set(next);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        match self.today.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        clock.advance_days(1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }
}
