//! Integration tests for streak reporting over stored entries.
//!
//! Entries go through the SQLite store and come back out before being
//! handed to the calculator, the way the CLI does it.

use chrono::{Duration, FixedOffset, TimeZone, Utc};
use dreamai_core::{
    describe_streak, EntryStore, FixedClock, FutureEntryPolicy, JournalEntry, StreakCalculator,
    StreakTier,
};

fn clock() -> FixedClock<FixedOffset> {
    let tz = FixedOffset::west_opt(5 * 3600).unwrap();
    FixedClock::new(tz.with_ymd_and_hms(2026, 10, 17, 20, 0, 0).unwrap())
}

#[test]
fn test_month_of_journaling_through_store() {
    let store = EntryStore::open_memory().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();

    // 30 consecutive mornings, two dreams on some days
    for days_ago in 0..30 {
        let at = now - Duration::days(days_ago);
        store
            .add_entry(&JournalEntry::new("Morning dream", "", at))
            .unwrap();
        if days_ago % 3 == 0 {
            store
                .add_entry(&JournalEntry::new("Nap dream", "", at + Duration::hours(2)))
                .unwrap();
        }
    }

    let entries = store.list_entries().unwrap();
    assert_eq!(entries.len(), 40);

    let info = StreakCalculator::with_clock(clock()).calculate(&entries);
    assert_eq!(info.current_streak, 30);
    assert_eq!(info.longest_streak, 30);
    assert!(info.is_active_today);
    assert!(!info.streak_at_risk);
    assert_eq!(StreakTier::of(&info), StreakTier::Legendary);
    assert!(describe_streak(&info).contains("Incredible 30 day streak"));
}

#[test]
fn test_streak_after_deleting_todays_entry() {
    let store = EntryStore::open_memory().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();

    let mut today = None;
    for days_ago in 0..7 {
        let entry = JournalEntry::new("Dream", "", now - Duration::days(days_ago));
        store.add_entry(&entry).unwrap();
        if days_ago == 0 {
            today = Some(entry);
        }
    }

    let calc = StreakCalculator::with_clock(clock());
    let info = calc.calculate(&store.list_entries().unwrap());
    assert_eq!(info.current_streak, 7);
    assert_eq!(StreakTier::of(&info), StreakTier::OnFire);

    assert!(store.delete_entry(&today.unwrap().id).unwrap());
    let info = calc.calculate(&store.list_entries().unwrap());
    assert_eq!(info.current_streak, 6);
    assert!(info.streak_at_risk);
    assert!(describe_streak(&info).contains("your 6 day streak"));
}

#[test]
fn test_windowed_listing_limits_longest_streak() {
    let store = EntryStore::open_memory().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();

    for days_ago in 10..20 {
        store
            .add_entry(&JournalEntry::new("Old", "", now - Duration::days(days_ago)))
            .unwrap();
    }
    store
        .add_entry(&JournalEntry::new("New", "", now - Duration::days(1)))
        .unwrap();

    let calc = StreakCalculator::with_clock(clock());
    let all = calc.calculate(&store.list_entries().unwrap());
    assert_eq!(all.longest_streak, 10);
    assert_eq!(all.current_streak, 1);

    let recent = store
        .list_entries_since(now - Duration::days(12))
        .unwrap();
    let windowed = calc.calculate(&recent);
    assert_eq!(windowed.longest_streak, 3);
    assert_eq!(windowed.current_streak, 1);
}

#[test]
fn test_future_policy_over_stored_entries() {
    let store = EntryStore::open_memory().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
    store
        .add_entry(&JournalEntry::new("Today", "", now))
        .unwrap();
    store
        .add_entry(&JournalEntry::new("Clock skew", "", now + Duration::days(3)))
        .unwrap();

    let entries = store.list_entries().unwrap();
    let lenient = StreakCalculator::with_clock(clock()).calculate(&entries);
    assert_eq!(lenient.current_streak, 0);
    assert!(!lenient.is_active_today);

    let strict = StreakCalculator::with_clock(clock())
        .with_future_policy(FutureEntryPolicy::Exclude)
        .calculate(&entries);
    assert_eq!(strict.current_streak, 1);
    assert!(strict.is_active_today);
}

#[test]
fn test_file_backed_store_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entries.db");
    let entry = JournalEntry::new("Lucid", "I knew I was dreaming", Utc::now());

    {
        let store = EntryStore::open_at(&path).unwrap();
        store.add_entry(&entry).unwrap();
    }

    let store = EntryStore::open_at(&path).unwrap();
    let entries = store.list_entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, entry.id);
    assert_eq!(entries[0].transcript, "I knew I was dreaming");
}
