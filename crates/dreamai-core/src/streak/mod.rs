//! Journal streak tracking.
//!
//! Derives consecutive-day streaks from timestamped journal entries.
//! Evaluation is pure: the only inputs are the entries and a [`Clock`],
//! and nothing is cached between calls.

mod clock;
mod describe;
mod engine;

pub use clock::{Clock, FixedClock, SystemClock};
pub use describe::{describe_streak, StreakTier};
pub use engine::{calculate_streak, DayKey, FutureEntryPolicy, StreakCalculator, StreakInfo};
