use crate::workouts::WorkoutSession;

/// Estimated one-rep max, Epley formula: `weight × (1 + reps/30)`, with the
/// single-rep case defined as the lifted weight itself.
pub fn one_rep_max(weight: f64, reps: u32) -> f64 {
    if reps <= 1 {
        return weight;
    }
    weight * (1.0 + reps as f64 / 30.0)
}

/// Total volume of a session: Σ weight×reps over completed sets.
pub fn session_volume(session: &WorkoutSession) -> f64 {
    session
        .completed_sets()
        .map(|set| set.weight.unwrap_or(0.0) * set.reps.unwrap_or(0) as f64)
        .sum()
}

/// Estimated calories for a finished session.
///
/// Base burn of 5 kcal per minute of resistance training, scaled by an
/// intensity multiplier derived from average sets per exercise and capped at
/// 1.5. A session with no exercises gets the base rate.
pub fn estimate_session_calories(duration_seconds: i64, exercise_count: usize, total_sets: usize) -> u32 {
    let minutes = duration_seconds.max(0) as f64 / 60.0;
    let intensity = if exercise_count == 0 {
        1.0
    } else {
        (1.0 + (total_sets as f64 / exercise_count as f64) * 0.05).min(1.5)
    };
    (minutes * 5.0 * intensity).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::{EquipmentCategory, ExerciseCatalogEntry, MuscleGroup};
    use crate::workouts::{ExerciseEntry, SetPatch, WorkoutSession};
    use chrono::Utc;

    #[test]
    fn one_rep_max_at_single_rep_is_the_weight() {
        assert_eq!(one_rep_max(140.0, 1), 140.0);
    }

    #[test]
    fn one_rep_max_follows_epley() {
        // 100 kg × (1 + 10/30)
        let estimate = one_rep_max(100.0, 10);
        assert!((estimate - 133.3333).abs() < 0.001);
    }

    #[test]
    fn sixty_minutes_two_exercises_ten_sets_is_375_calories() {
        assert_eq!(estimate_session_calories(3600, 2, 10), 375);
    }

    #[test]
    fn intensity_multiplier_is_capped() {
        // 20 sets over 1 exercise would give ×2.0 uncapped.
        assert_eq!(estimate_session_calories(3600, 1, 20), 450);
    }

    #[test]
    fn empty_session_uses_base_rate() {
        assert_eq!(estimate_session_calories(600, 0, 0), 50);
    }

    #[test]
    fn volume_counts_completed_sets_only() {
        let catalog = ExerciseCatalogEntry {
            id: "ex_1".to_string(),
            name: "Bench Press".to_string(),
            muscle_group: MuscleGroup::Chest,
            category: EquipmentCategory::Barbell,
            is_custom: false,
            description: None,
            instructions: None,
        };
        let mut session = WorkoutSession::started("u1", "Push", Utc::now());
        let mut exercise = ExerciseEntry::from_catalog(&catalog, 0);
        exercise.sets[0].apply(&SetPatch {
            reps: Some(5),
            weight: Some(100.0),
            is_completed: Some(true),
            ..Default::default()
        });
        exercise.add_set();
        // Carried-over second set stays incomplete and must not count.
        session.exercises.push(exercise);

        assert_eq!(session_volume(&session), 500.0);
    }
}
