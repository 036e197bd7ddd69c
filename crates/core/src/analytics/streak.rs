use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::workouts::WorkoutSession;

/// How far back the streak walk will look. A year of daily training is well
/// past any realistic streak.
const STREAK_LOOKBACK_DAYS: i64 = 365;

/// Consecutive days with at least one completed session, ending at `today`
/// and walking backward day by day. A day without a completed session ends
/// the walk, so evaluating on a gap day yields 0.
pub fn streak(sessions: &[WorkoutSession], today: NaiveDate) -> u32 {
    let completed_dates: HashSet<NaiveDate> = sessions
        .iter()
        .filter(|s| s.is_completed)
        .map(|s| s.date)
        .collect();

    let mut count = 0;
    for offset in 0..STREAK_LOOKBACK_DAYS {
        let day = today - Duration::days(offset);
        if !completed_dates.contains(&day) {
            break;
        }
        count += 1;
    }
    count
}
