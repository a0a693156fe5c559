//! Calendar-day streak computation over journal entry timestamps.
//!
//! A streak counts consecutive local calendar days with at least one entry,
//! ending on `today` or `today - 1`. The one-day allowance means a journal
//! kept up through yesterday still shows a live streak; once the most recent
//! entry is two days back the streak reads zero regardless of prior history.

use chrono::{DateTime, Days, Local, NaiveDate, Utc};

/// Reduce timestamps to distinct local calendar days, most recent first.
fn distinct_days_desc(timestamps: &[DateTime<Utc>]) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = timestamps
        .iter()
        .map(|ts| ts.with_timezone(&Local).date_naive())
        .collect();
    days.sort_unstable();
    days.dedup();
    days.reverse();
    days
}

/// Current consecutive-day streak as of `today`.
///
/// `today` is a parameter rather than a read of the system clock so the
/// today/yesterday window is deterministic under test; callers pass
/// `Local::now().date_naive()`.
pub fn calculate_streak(timestamps: &[DateTime<Utc>], today: NaiveDate) -> u32 {
    let days = distinct_days_desc(timestamps);
    let Some(&most_recent) = days.first() else {
        return 0;
    };
    if most_recent != today && most_recent != today - Days::new(1) {
        return 0;
    }
    let mut streak = 1;
    let mut expected = most_recent - Days::new(1);
    for &day in &days[1..] {
        if day != expected {
            break;
        }
        streak += 1;
        expected = day - Days::new(1);
    }
    streak
}

/// Longest run of consecutive entry days anywhere in the history.
/// A pure historical maximum, not anchored to the current date.
pub fn longest_streak(timestamps: &[DateTime<Utc>]) -> u32 {
    let mut days = distinct_days_desc(timestamps);
    days.reverse();
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for day in days {
        run = match prev {
            Some(p) if day == p + Days::new(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }
    longest
}
