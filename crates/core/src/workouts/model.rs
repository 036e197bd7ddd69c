use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exercises::{ExerciseCatalogEntry, MuscleGroup};

/// Default rest timer suggested for a freshly added exercise.
pub const DEFAULT_REST_TIMER_SECS: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetType {
    Normal,
    Warmup,
    Dropset,
    Failure,
}

/// One logged set within an exercise entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEntry {
    pub id: String,
    /// 1-based, contiguous within the owning exercise.
    pub set_number: u32,
    pub reps: Option<u32>,
    /// Kilograms.
    pub weight: Option<f64>,
    pub is_completed: bool,
    #[serde(rename = "type")]
    pub set_type: SetType,
    /// Rate of perceived exertion, 1-10.
    pub rpe: Option<u8>,
}

impl SetEntry {
    fn blank(set_number: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            set_number,
            reps: None,
            weight: None,
            is_completed: false,
            set_type: SetType::Normal,
            rpe: None,
        }
    }

    /// Merge an edit; `None` fields are left unchanged.
    pub fn apply(&mut self, patch: &SetPatch) {
        if let Some(reps) = patch.reps {
            self.reps = Some(reps);
        }
        if let Some(weight) = patch.weight {
            self.weight = Some(weight);
        }
        if let Some(completed) = patch.is_completed {
            self.is_completed = completed;
        }
        if let Some(set_type) = patch.set_type {
            self.set_type = set_type;
        }
        if let Some(rpe) = patch.rpe {
            self.rpe = Some(rpe);
        }
    }
}

/// Partial set edit; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetPatch {
    pub reps: Option<u32>,
    pub weight: Option<f64>,
    pub is_completed: Option<bool>,
    pub set_type: Option<SetType>,
    pub rpe: Option<u8>,
}

/// An exercise performed within a session. Name and muscle group are
/// denormalized from the catalog so history stays readable if the catalog
/// entry is later edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    pub id: String,
    pub exercise_id: String,
    pub exercise_name: String,
    pub muscle_group: MuscleGroup,
    pub sets: Vec<SetEntry>,
    pub notes: Option<String>,
    pub rest_timer_seconds: u32,
    /// Position within the session, 0-based.
    pub position: u32,
}

impl ExerciseEntry {
    /// New entry seeded with a single empty set.
    pub fn from_catalog(entry: &ExerciseCatalogEntry, position: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            exercise_id: entry.id.clone(),
            exercise_name: entry.name.clone(),
            muscle_group: entry.muscle_group,
            sets: vec![SetEntry::blank(1)],
            notes: None,
            rest_timer_seconds: DEFAULT_REST_TIMER_SECS,
            position,
        }
    }

    /// Append a set, carrying over the previous set's weight and reps as the
    /// starting point.
    pub fn add_set(&mut self) {
        let mut set = SetEntry::blank(self.sets.len() as u32 + 1);
        if let Some(last) = self.sets.last() {
            set.reps = last.reps;
            set.weight = last.weight;
        }
        self.sets.push(set);
    }

    /// Remove a set by id and renumber the remainder 1..N, preserving order.
    /// Returns false when the id is unknown.
    pub fn remove_set(&mut self, set_id: &str) -> bool {
        let before = self.sets.len();
        self.sets.retain(|s| s.id != set_id);
        if self.sets.len() == before {
            return false;
        }
        for (index, set) in self.sets.iter_mut().enumerate() {
            set.set_number = index as u32 + 1;
        }
        true
    }
}

/// One logged gym visit.
///
/// `duration` and `calories_estimate` are populated only once the session is
/// completed; the active (uncompleted) session lives outside the persisted
/// collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Seconds.
    pub duration: Option<i64>,
    pub exercises: Vec<ExerciseEntry>,
    pub notes: Option<String>,
    pub calories_estimate: Option<u32>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl WorkoutSession {
    pub fn started(account_id: impl Into<String>, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.into(),
            name: name.into(),
            date: now.date_naive(),
            start_time: now,
            end_time: None,
            duration: None,
            exercises: Vec::new(),
            notes: None,
            calories_estimate: None,
            is_completed: false,
            created_at: now,
        }
    }

    pub fn exercise_mut(&mut self, exercise_entry_id: &str) -> Option<&mut ExerciseEntry> {
        self.exercises.iter_mut().find(|e| e.id == exercise_entry_id)
    }

    /// Drop an exercise entry. Positions of the remaining entries are
    /// compacted to stay contiguous.
    pub fn remove_exercise(&mut self, exercise_entry_id: &str) -> bool {
        let before = self.exercises.len();
        self.exercises.retain(|e| e.id != exercise_entry_id);
        if self.exercises.len() == before {
            return false;
        }
        for (index, exercise) in self.exercises.iter_mut().enumerate() {
            exercise.position = index as u32;
        }
        true
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    pub fn completed_sets(&self) -> impl Iterator<Item = &SetEntry> {
        self.exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .filter(|s| s.is_completed)
    }
}
