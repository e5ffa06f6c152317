//! # Dream AI Core Library
//!
//! This library provides the core logic behind the Dream AI journal. All
//! operations are available through the standalone `dreamai` CLI binary,
//! which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Streak Engine**: pure functions deriving consecutive-day streaks from
//!   timestamped journal entries, evaluated against an injectable clock
//! - **Entries**: the journal entry model and timestamp parsing
//! - **Storage**: SQLite-based entry storage and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`StreakCalculator`]: streak evaluation with an explicit clock
//! - [`calculate_streak`] / [`describe_streak`]: real-clock convenience API
//! - [`EntryStore`]: journal entry persistence
//! - [`Config`]: application configuration management

pub mod entry;
pub mod error;
pub mod storage;
pub mod streak;

pub use entry::{parse_recorded_at, parse_recorded_at_in, JournalEntry, Timestamped};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use storage::{Config, EntryStore};
pub use streak::{
    calculate_streak, describe_streak, Clock, DayKey, FixedClock, FutureEntryPolicy,
    StreakCalculator, StreakInfo, StreakTier, SystemClock,
};
