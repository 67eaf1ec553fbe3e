//! Daily and weekly focus statistics.
//!
//! Counters are keyed by calendar day and ISO week and pruned to a rolling
//! window: seven days of daily entries, and only the current week's weekly
//! entry survive a cleanup pass.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Days of daily history kept by [`StatsTracker::cleanup`].
pub const DAILY_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStat {
    pub sessions: u64,
    pub focus_minutes: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStat {
    pub sessions: u64,
    pub focus_minutes: u64,
    /// Weekly focus minutes divided by a flat 7, matching the original
    /// reporting quirk.
    pub daily_average: f64,
}

/// Snapshot returned to the control surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsSummary {
    pub daily: BTreeMap<NaiveDate, DailyStat>,
    pub weekly: BTreeMap<String, WeeklyStat>,
}

/// Aggregate focus counters with a rolling retention window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsTracker {
    daily: BTreeMap<NaiveDate, DailyStat>,
    weekly: BTreeMap<String, WeeklyStat>,
}

/// ISO week key, e.g. `2026-W35`.
pub fn week_key(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

impl StatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        daily: BTreeMap<NaiveDate, DailyStat>,
        weekly: BTreeMap<String, WeeklyStat>,
    ) -> Self {
        Self { daily, weekly }
    }

    /// Record one completed (or interrupted) focus session.
    pub fn record(&mut self, focus_minutes: u64, at: DateTime<Utc>) {
        let day = at.date_naive();

        let daily = self.daily.entry(day).or_default();
        daily.sessions += 1;
        daily.focus_minutes += focus_minutes;

        let weekly = self.weekly.entry(week_key(day)).or_default();
        weekly.sessions += 1;
        weekly.focus_minutes += focus_minutes;
        weekly.daily_average = weekly.focus_minutes as f64 / 7.0;
    }

    /// Prune daily entries older than [`DAILY_WINDOW_DAYS`] and weekly
    /// entries other than the current ISO week.
    pub fn cleanup(&mut self, now: DateTime<Utc>) {
        let today = now.date_naive();
        let cutoff = today - Duration::days(DAILY_WINDOW_DAYS);
        self.daily.retain(|day, _| *day >= cutoff);

        let current_week = week_key(today);
        self.weekly.retain(|week, _| *week == current_week);
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            daily: self.daily.clone(),
            weekly: self.weekly.clone(),
        }
    }

    pub fn daily(&self) -> &BTreeMap<NaiveDate, DailyStat> {
        &self.daily
    }

    pub fn weekly(&self) -> &BTreeMap<String, WeeklyStat> {
        &self.weekly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn record_bumps_daily_and_weekly() {
        let mut stats = StatsTracker::new();
        stats.record(25, at(2026, 8, 25));
        stats.record(25, at(2026, 8, 25));

        let day = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let daily = stats.daily()[&day];
        assert_eq!(daily.sessions, 2);
        assert_eq!(daily.focus_minutes, 50);

        let weekly = stats.weekly()[&week_key(day)];
        assert_eq!(weekly.sessions, 2);
        assert_eq!(weekly.focus_minutes, 50);
        assert!((weekly.daily_average - 50.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn week_key_uses_iso_week_year() {
        // 2027-01-01 is a Friday and belongs to 2026's last ISO week.
        assert_eq!(week_key(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()), "2026-W01");
        assert_eq!(week_key(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()), "2026-W53");
    }

    #[test]
    fn cleanup_drops_daily_entries_older_than_window() {
        let mut stats = StatsTracker::new();
        stats.record(10, at(2026, 8, 10));
        stats.record(10, at(2026, 8, 20));
        stats.record(10, at(2026, 8, 25));

        stats.cleanup(at(2026, 8, 25));

        let days: Vec<_> = stats.daily().keys().copied().collect();
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
                NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(),
            ]
        );
    }

    #[test]
    fn cleanup_keeps_only_current_week() {
        let mut stats = StatsTracker::new();
        stats.record(10, at(2026, 8, 1));
        stats.record(10, at(2026, 8, 25));

        stats.cleanup(at(2026, 8, 25));

        let weeks: Vec<_> = stats.weekly().keys().cloned().collect();
        assert_eq!(weeks, vec![week_key(NaiveDate::from_ymd_opt(2026, 8, 25).unwrap())]);
    }

    #[test]
    fn summary_serializes_with_readable_keys() {
        let mut stats = StatsTracker::new();
        stats.record(25, at(2026, 8, 25));
        let json = serde_json::to_value(stats.summary()).unwrap();
        assert!(json["daily"]["2026-08-25"]["sessions"].is_u64());
        assert!(json["weekly"]["2026-W35"]["focus_minutes"].is_u64());
    }
}
