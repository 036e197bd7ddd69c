use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::exercises::MuscleGroup;
use crate::workouts::WorkoutSession;

/// Aggregates for the calendar week (Sunday-based) containing `today`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_workouts: usize,
    /// Seconds.
    pub total_duration: i64,
    pub total_volume: f64,
    pub total_sets: usize,
    pub total_reps: u64,
    pub calories_burned: u64,
    /// Exercise entries per muscle group across the week's sessions.
    pub muscle_group_breakdown: HashMap<MuscleGroup, u32>,
}

/// Aggregates for the calendar month containing `today`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    /// `YYYY-MM`.
    pub month: String,
    pub total_workouts: usize,
    /// Seconds.
    pub total_duration: i64,
    pub total_volume: f64,
    /// Seconds; 0 when the month has no workouts.
    pub average_workout_duration: i64,
    /// Distinct training days over days in the month, rounded percent.
    pub consistency_percentage: u32,
}

fn completed_in_range<'a>(
    sessions: &'a [WorkoutSession],
    start: NaiveDate,
    end: NaiveDate,
) -> impl Iterator<Item = &'a WorkoutSession> {
    sessions
        .iter()
        .filter(move |s| s.is_completed && s.date >= start && s.date <= end)
}

fn volume_of<'a>(sessions: impl Iterator<Item = &'a WorkoutSession>) -> f64 {
    sessions.map(super::session_volume).sum()
}

/// Sunday that starts the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or(date);
    (first_of_next - Duration::days(1)).day()
}

pub fn weekly_summary(sessions: &[WorkoutSession], today: NaiveDate) -> WeeklySummary {
    let start = week_start(today);
    let end = start + Duration::days(6);
    let week: Vec<&WorkoutSession> = completed_in_range(sessions, start, end).collect();

    let mut breakdown: HashMap<MuscleGroup, u32> = HashMap::new();
    for session in &week {
        for exercise in &session.exercises {
            *breakdown.entry(exercise.muscle_group).or_insert(0) += 1;
        }
    }

    WeeklySummary {
        week_start: start,
        week_end: end,
        total_workouts: week.len(),
        total_duration: week.iter().map(|s| s.duration.unwrap_or(0)).sum(),
        total_volume: volume_of(week.iter().copied()),
        total_sets: week.iter().map(|s| s.completed_sets().count()).sum(),
        total_reps: week
            .iter()
            .flat_map(|s| s.completed_sets())
            .map(|set| set.reps.unwrap_or(0) as u64)
            .sum(),
        calories_burned: week
            .iter()
            .map(|s| s.calories_estimate.unwrap_or(0) as u64)
            .sum(),
        muscle_group_breakdown: breakdown,
    }
}

pub fn monthly_summary(sessions: &[WorkoutSession], today: NaiveDate) -> MonthlySummary {
    let start = today.with_day(1).unwrap_or(today);
    let end = start + Duration::days(days_in_month(today) as i64 - 1);
    let month: Vec<&WorkoutSession> = completed_in_range(sessions, start, end).collect();

    let total_duration: i64 = month.iter().map(|s| s.duration.unwrap_or(0)).sum();
    let training_days: std::collections::HashSet<NaiveDate> =
        month.iter().map(|s| s.date).collect();
    let consistency =
        (training_days.len() as f64 / days_in_month(today) as f64 * 100.0).round() as u32;

    MonthlySummary {
        month: format!("{:04}-{:02}", today.year(), today.month()),
        total_workouts: month.len(),
        total_duration,
        total_volume: volume_of(month.iter().copied()),
        average_workout_duration: if month.is_empty() {
            0
        } else {
            total_duration / month.len() as i64
        },
        consistency_percentage: consistency,
    }
}
