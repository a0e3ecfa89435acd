//! Aggregated mindfulness progress.

use std::collections::{BTreeSet, HashMap};

use calma_core::models::mindfulness::{MindfulnessSessionRecord, SessionKind};
use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindTotals {
    pub sessions: usize,
    pub completed: usize,
    pub practiced_seconds: u64,
    pub completed_seconds: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MindfulnessStats {
    pub total_sessions: usize,
    pub completed_sessions: usize,
    /// Seconds across every session, including the run time of stopped ones.
    pub practiced_seconds: u64,
    /// Seconds across completed sessions only.
    pub completed_seconds: u64,
    pub by_kind: HashMap<SessionKind, KindTotals>,
    /// Consecutive days with a completed session, ending today or yesterday.
    pub streak_days: u32,
}

impl MindfulnessStats {
    pub fn from_records(records: &[MindfulnessSessionRecord], today: Date, tz: &TimeZone) -> Self {
        let mut stats = Self::default();
        let mut practice_days = BTreeSet::new();

        for record in records {
            let seconds = u64::from(record.practiced_seconds());
            let totals = stats.by_kind.entry(record.kind).or_default();
            totals.sessions += 1;
            totals.practiced_seconds += seconds;
            stats.total_sessions += 1;
            stats.practiced_seconds += seconds;

            if record.completed {
                totals.completed += 1;
                totals.completed_seconds += seconds;
                stats.completed_sessions += 1;
                stats.completed_seconds += seconds;
                practice_days.insert(record.created_at.to_zoned(tz.clone()).date());
            }
        }

        stats.streak_days = streak(&practice_days, today);
        stats
    }

    pub fn practiced_minutes(&self) -> u64 {
        self.practiced_seconds / 60
    }

    pub fn completed_minutes(&self) -> u64 {
        self.completed_seconds / 60
    }
}

fn streak(days: &BTreeSet<Date>, today: Date) -> u32 {
    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.yesterday() {
            Ok(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut count = 0;
    loop {
        count += 1;
        match cursor.yesterday() {
            Ok(previous) if days.contains(&previous) => cursor = previous,
            _ => return count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn streak_tolerates_missing_today() {
        let days: BTreeSet<Date> = [date(2026, 5, 1), date(2026, 5, 2), date(2026, 5, 3)]
            .into_iter()
            .collect();
        assert_eq!(streak(&days, date(2026, 5, 3)), 3);
        assert_eq!(streak(&days, date(2026, 5, 4)), 3);
        assert_eq!(streak(&days, date(2026, 5, 5)), 0);
    }

    #[test]
    fn gap_breaks_streak() {
        let days: BTreeSet<Date> = [date(2026, 5, 1), date(2026, 5, 3)].into_iter().collect();
        assert_eq!(streak(&days, date(2026, 5, 3)), 1);
    }
}
