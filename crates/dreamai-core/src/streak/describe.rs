//! Motivational copy for the streak banner.

use serde::{Deserialize, Serialize};

use super::engine::StreakInfo;

/// Bucket a streak falls into for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTier {
    /// Yesterday was active, today not yet
    AtRisk,
    /// No current streak
    Inactive,
    /// 1 day
    Started,
    /// 2-6 days
    Building,
    /// 7-29 days
    OnFire,
    /// 30+ days
    Legendary,
}

impl StreakTier {
    /// Classify streak state. The at-risk flag wins over the length.
    pub fn of(info: &StreakInfo) -> Self {
        if info.streak_at_risk {
            return StreakTier::AtRisk;
        }
        match info.current_streak {
            0 => StreakTier::Inactive,
            1 => StreakTier::Started,
            2..=6 => StreakTier::Building,
            7..=29 => StreakTier::OnFire,
            _ => StreakTier::Legendary,
        }
    }
}

/// User-facing line describing the streak.
pub fn describe_streak(info: &StreakInfo) -> String {
    let n = info.current_streak;
    match StreakTier::of(info) {
        StreakTier::AtRisk => {
            format!("Don't lose your {n} day streak! Record a dream today to keep it alive.")
        }
        StreakTier::Inactive => {
            "Start your dream journey today. Record your first dream!".to_string()
        }
        StreakTier::Started => "Great start! Come back tomorrow to build your streak.".to_string(),
        StreakTier::Building => format!("{n} days strong! Keep the momentum going."),
        StreakTier::OnFire => format!("{n} day streak! You're on fire!"),
        StreakTier::Legendary => format!("Incredible {n} day streak! Your dream recall is unmatched."),
    }
}
