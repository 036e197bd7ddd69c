use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exercises::MuscleGroup;
use crate::workouts::{ExerciseEntry, WorkoutSession};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExercise {
    pub exercise_id: String,
    pub exercise_name: String,
    pub muscle_group: MuscleGroup,
    pub target_sets: u32,
    pub target_reps: u32,
    pub rest_timer_seconds: u32,
    pub position: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTemplate {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub exercises: Vec<TemplateExercise>,
    pub created_at: DateTime<Utc>,
    pub last_used: Option<DateTime<Utc>>,
    pub times_used: u32,
}

/// Template input; id, owner, creation time, and usage counters are assigned
/// by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkoutTemplate {
    pub name: String,
    pub exercises: Vec<TemplateExercise>,
}

impl WorkoutTemplate {
    pub fn created(account_id: impl Into<String>, input: NewWorkoutTemplate, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.into(),
            name: input.name,
            exercises: input.exercises,
            created_at: now,
            last_used: None,
            times_used: 0,
        }
    }

    /// Start a session pre-filled from this template: one exercise entry per
    /// spec, `target_sets` blank sets each, carrying the template's rest
    /// timers. Positions are compacted to the template's ordering.
    pub fn seed_session(&self, account_id: impl Into<String>, now: DateTime<Utc>) -> WorkoutSession {
        let mut session = WorkoutSession::started(account_id, self.name.clone(), now);
        let mut specs: Vec<&TemplateExercise> = self.exercises.iter().collect();
        specs.sort_by_key(|spec| spec.position);

        session.exercises = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| {
                let mut entry = ExerciseEntry {
                    id: Uuid::new_v4().to_string(),
                    exercise_id: spec.exercise_id.clone(),
                    exercise_name: spec.exercise_name.clone(),
                    muscle_group: spec.muscle_group,
                    sets: Vec::new(),
                    notes: None,
                    rest_timer_seconds: spec.rest_timer_seconds,
                    position: index as u32,
                };
                for _ in 0..spec.target_sets.max(1) {
                    entry.add_set();
                }
                entry
            })
            .collect();
        session
    }
}
