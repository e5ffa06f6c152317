//! Consecutive-day streak calculation.
//!
//! Entries are bucketed into calendar days in the clock's time zone,
//! deduplicated into an ordered set of integral [`DayKey`]s, and walked to
//! find the current and longest runs.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::clock::{Clock, SystemClock};
use crate::entry::Timestamped;

/// Calendar day as a day number, so "the day before" is plain subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(i32);

impl DayKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.num_days_from_ce())
    }

    /// Calendar day of `instant` in its own time zone.
    pub fn of<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self::from_date(instant.date_naive())
    }

    pub fn pred(self) -> Self {
        Self(self.0 - 1)
    }

    pub fn succ(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_num_days_from_ce_opt(self.0)
    }
}

/// What to do with entries whose day is after today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FutureEntryPolicy {
    /// Treat them like any other entry.
    #[default]
    Include,
    /// Drop them before evaluation.
    Exclude,
}

/// Streak state derived from a set of journal entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakInfo {
    /// Consecutive active days ending today or yesterday
    pub current_streak: u32,
    /// Longest run of consecutive active days ever
    pub longest_streak: u32,
    /// Most recent active day
    pub last_entry_date: Option<NaiveDate>,
    /// Whether today already has an entry
    pub is_active_today: bool,
    /// Yesterday was active but today is not yet
    pub streak_at_risk: bool,
}

/// Streak evaluator bound to a clock.
#[derive(Debug, Clone)]
pub struct StreakCalculator<C: Clock = SystemClock> {
    clock: C,
    future_policy: FutureEntryPolicy,
}

impl StreakCalculator<SystemClock> {
    /// Create a calculator reading the local wall clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for StreakCalculator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> StreakCalculator<C> {
    /// Create a calculator with an explicit clock
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            future_policy: FutureEntryPolicy::default(),
        }
    }

    pub fn with_future_policy(mut self, policy: FutureEntryPolicy) -> Self {
        self.future_policy = policy;
        self
    }

    pub fn future_policy(&self) -> FutureEntryPolicy {
        self.future_policy
    }

    /// Compute streak state for `entries`, in any order, duplicates allowed.
    pub fn calculate<I>(&self, entries: I) -> StreakInfo
    where
        I: IntoIterator,
        I::Item: Timestamped,
    {
        let now = self.clock.now();
        let zone = now.timezone();
        let today = DayKey::of(&now);

        let days: BTreeSet<DayKey> = entries
            .into_iter()
            .map(|entry| DayKey::of(&entry.recorded_at().with_timezone(&zone)))
            .filter(|day| self.future_policy == FutureEntryPolicy::Include || *day <= today)
            .collect();

        let info = evaluate(&days, today);
        debug!(
            active_days = days.len(),
            current = info.current_streak,
            longest = info.longest_streak,
            at_risk = info.streak_at_risk,
            "streak evaluated"
        );
        info
    }
}

/// Compute streak state against the local wall clock.
pub fn calculate_streak<I>(entries: I) -> StreakInfo
where
    I: IntoIterator,
    I::Item: Timestamped,
{
    StreakCalculator::new().calculate(entries)
}

fn evaluate(days: &BTreeSet<DayKey>, today: DayKey) -> StreakInfo {
    let Some(&most_recent) = days.last() else {
        return StreakInfo::default();
    };

    let yesterday = today.pred();
    let is_active_today = most_recent == today;
    let was_active_yesterday = most_recent == yesterday;

    let anchor = if is_active_today {
        Some(today)
    } else if was_active_yesterday {
        Some(yesterday)
    } else {
        None
    };
    let current_streak = anchor.map_or(0, |anchor| run_ending_at(days, anchor));

    StreakInfo {
        current_streak,
        longest_streak: longest_run(days),
        last_entry_date: most_recent.to_date(),
        is_active_today,
        streak_at_risk: !is_active_today && was_active_yesterday && current_streak > 0,
    }
}

/// Length of the run of consecutive days ending at `anchor`.
fn run_ending_at(days: &BTreeSet<DayKey>, anchor: DayKey) -> u32 {
    let mut expected = anchor;
    let mut run = 0;
    for &day in days.iter().rev() {
        if day > expected {
            continue;
        }
        if day < expected {
            break;
        }
        run += 1;
        expected = expected.pred();
    }
    run
}

fn longest_run(days: &BTreeSet<DayKey>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<DayKey> = None;
    for &day in days {
        run = match prev {
            Some(p) if p.succ() == day => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }
    longest
}
