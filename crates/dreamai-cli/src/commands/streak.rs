use chrono::DateTime;
use clap::Subcommand;
use dreamai_core::{
    describe_streak, Clock, Config, FixedClock, JournalEntry, StreakCalculator, StreakInfo,
    StreakTier, ValidationError,
};
use serde::Serialize;
use tracing::debug;

use super::open_store;

#[derive(Subcommand)]
pub enum StreakAction {
    /// Current and longest streak
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Evaluate as of this RFC 3339 instant; its offset sets the calendar
        #[arg(long)]
        now: Option<String>,
    },
    /// Motivational line only
    Describe,
}

#[derive(Serialize)]
struct StreakReport {
    #[serde(flatten)]
    info: StreakInfo,
    tier: StreakTier,
    message: String,
}

pub fn run(action: StreakAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let entries = open_store(config)?.list_entries()?;
    debug!(entries = entries.len(), "loaded entries for streak");

    match action {
        StreakAction::Show { json, now: None } => {
            show(&config.streak_calculator(), &entries, json)
        }
        StreakAction::Show {
            json,
            now: Some(now),
        } => {
            let instant = DateTime::parse_from_rfc3339(now.trim())
                .map_err(|_| ValidationError::InvalidTimestamp { value: now.clone() })?;
            let calculator = StreakCalculator::with_clock(FixedClock::new(instant))
                .with_future_policy(config.streak.future_entries);
            show(&calculator, &entries, json)
        }
        StreakAction::Describe => {
            let info = config.streak_calculator().calculate(&entries);
            println!("{}", describe_streak(&info));
            Ok(())
        }
    }
}

fn show<C: Clock>(
    calculator: &StreakCalculator<C>,
    entries: &[JournalEntry],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let info = calculator.calculate(entries);
    let report = StreakReport {
        info,
        tier: StreakTier::of(&info),
        message: describe_streak(&info),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    println!("current streak: {}", info.current_streak);
    println!("longest streak: {}", info.longest_streak);
    match info.last_entry_date {
        Some(date) => println!("last entry:     {date}"),
        None => println!("last entry:     -"),
    }
    println!("active today:   {}", yes_no(info.is_active_today));
    println!("at risk:        {}", yes_no(info.streak_at_risk));
    println!();
    println!("{}", report.message);
    Ok(())
}
