//! Streak reconstruction from a sparse daily-completion map.
//!
//! Streaks count consecutive *calendar* days, not consecutive map entries:
//! a missing date breaks a run exactly like a date recorded as incomplete.
//! The current streak tolerates one grace day (an incomplete today anchors
//! on a completed yesterday); two missed days in a row zero it.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

/// Longest run of consecutive calendar days all marked completed.
///
/// Scans recorded dates in ascending order; an incomplete entry between two
/// completed dates breaks the run just like an unrecorded day.
pub fn longest_streak(days: &BTreeMap<NaiveDate, bool>) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for (&date, &completed) in days {
        if !completed {
            continue;
        }

        run = match prev {
            Some(p) if date == p + Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }

    longest
}

/// Current streak as of `today`.
///
/// If today is completed the walk starts there; otherwise a completed
/// yesterday anchors it (the grace day). With neither completed the streak
/// is 0. From the anchor the count walks backward day by day until the
/// first gap.
pub fn current_streak(days: &BTreeMap<NaiveDate, bool>, today: NaiveDate) -> u32 {
    let completed = |date: NaiveDate| days.get(&date).copied().unwrap_or(false);

    let anchor = if completed(today) {
        today
    } else if completed(today - Duration::days(1)) {
        today - Duration::days(1)
    } else {
        return 0;
    };

    let mut streak = 0u32;
    let mut day = anchor;
    while completed(day) {
        streak += 1;
        day = day - Duration::days(1);
    }

    streak
}
