//! Row models for the relational schema.
//!
//! Columns are the snake_case form of the domain's field names. Every
//! persisted field maps both directions; a lossy column here would corrupt
//! data on the next full sync. Nested collections (exercise entries,
//! template specs) live in JSON columns and keep the domain encoding.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use gymtrack_core::accounts::{
    Account, ExperienceLevel, FitnessGoal, Profile, SubscriptionPlan, UnitSystem,
};
use gymtrack_core::body::{BodyMeasurement, BodyWeightEntry};
use gymtrack_core::exercises::{EquipmentCategory, ExerciseCatalogEntry, MuscleGroup};
use gymtrack_core::goals::Goal;
use gymtrack_core::records::PersonalRecord;
use gymtrack_core::templates::{TemplateExercise, WorkoutTemplate};
use gymtrack_core::workouts::{ExerciseEntry, WorkoutSession};

/// `accounts` table. The embedded profile is flattened into columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub name: String,
    pub age: Option<u32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub goal: FitnessGoal,
    pub experience_level: ExperienceLevel,
    pub units: UnitSystem,
    pub subscription: SubscriptionPlan,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            email: account.email.clone(),
            display_name: account.display_name.clone(),
            photo_url: account.photo_url.clone(),
            name: account.profile.name.clone(),
            age: account.profile.age,
            height: account.profile.height,
            weight: account.profile.weight,
            goal: account.profile.goal,
            experience_level: account.profile.experience_level,
            units: account.profile.units,
            subscription: account.subscription,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            photo_url: row.photo_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
            profile: Profile {
                name: row.name,
                age: row.age,
                height: row.height,
                weight: row.weight,
                goal: row.goal,
                experience_level: row.experience_level,
                units: row.units,
            },
            subscription: row.subscription,
        }
    }
}

/// `workout_sessions` table; `exercises` is a JSON column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSessionRow {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<i64>,
    pub exercises: Vec<ExerciseEntry>,
    pub notes: Option<String>,
    pub calories_estimate: Option<u32>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&WorkoutSession> for WorkoutSessionRow {
    fn from(session: &WorkoutSession) -> Self {
        Self {
            id: session.id.clone(),
            account_id: session.account_id.clone(),
            name: session.name.clone(),
            date: session.date,
            start_time: session.start_time,
            end_time: session.end_time,
            duration: session.duration,
            exercises: session.exercises.clone(),
            notes: session.notes.clone(),
            calories_estimate: session.calories_estimate,
            is_completed: session.is_completed,
            created_at: session.created_at,
        }
    }
}

impl From<WorkoutSessionRow> for WorkoutSession {
    fn from(row: WorkoutSessionRow) -> Self {
        Self {
            id: row.id,
            account_id: row.account_id,
            name: row.name,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            duration: row.duration,
            exercises: row.exercises,
            notes: row.notes,
            calories_estimate: row.calories_estimate,
            is_completed: row.is_completed,
            created_at: row.created_at,
        }
    }
}

/// `body_weight_entries` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyWeightRow {
    pub id: String,
    pub account_id: String,
    pub weight: f64,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
}

impl From<&BodyWeightEntry> for BodyWeightRow {
    fn from(entry: &BodyWeightEntry) -> Self {
        Self {
            id: entry.id.clone(),
            account_id: entry.account_id.clone(),
            weight: entry.weight,
            date: entry.date,
            notes: entry.notes.clone(),
        }
    }
}

impl From<BodyWeightRow> for BodyWeightEntry {
    fn from(row: BodyWeightRow) -> Self {
        Self {
            id: row.id,
            account_id: row.account_id,
            weight: row.weight,
            date: row.date,
            notes: row.notes,
        }
    }
}

/// `body_measurements` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurementRow {
    pub id: String,
    pub account_id: String,
    pub date: DateTime<Utc>,
    pub chest: Option<f64>,
    pub arms: Option<f64>,
    pub waist: Option<f64>,
    pub legs: Option<f64>,
    pub notes: Option<String>,
}

impl From<&BodyMeasurement> for BodyMeasurementRow {
    fn from(entry: &BodyMeasurement) -> Self {
        Self {
            id: entry.id.clone(),
            account_id: entry.account_id.clone(),
            date: entry.date,
            chest: entry.chest,
            arms: entry.arms,
            waist: entry.waist,
            legs: entry.legs,
            notes: entry.notes.clone(),
        }
    }
}

impl From<BodyMeasurementRow> for BodyMeasurement {
    fn from(row: BodyMeasurementRow) -> Self {
        Self {
            id: row.id,
            account_id: row.account_id,
            date: row.date,
            chest: row.chest,
            arms: row.arms,
            waist: row.waist,
            legs: row.legs,
            notes: row.notes,
        }
    }
}

/// `personal_records` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecordRow {
    pub id: String,
    pub account_id: String,
    pub exercise_id: String,
    pub exercise_name: String,
    pub weight: f64,
    pub reps: u32,
    pub date: NaiveDate,
    pub one_rep_max: f64,
}

impl From<&PersonalRecord> for PersonalRecordRow {
    fn from(record: &PersonalRecord) -> Self {
        Self {
            id: record.id.clone(),
            account_id: record.account_id.clone(),
            exercise_id: record.exercise_id.clone(),
            exercise_name: record.exercise_name.clone(),
            weight: record.weight,
            reps: record.reps,
            date: record.date,
            one_rep_max: record.one_rep_max,
        }
    }
}

impl From<PersonalRecordRow> for PersonalRecord {
    fn from(row: PersonalRecordRow) -> Self {
        Self {
            id: row.id,
            account_id: row.account_id,
            exercise_id: row.exercise_id,
            exercise_name: row.exercise_name,
            weight: row.weight,
            reps: row.reps,
            date: row.date,
            one_rep_max: row.one_rep_max,
        }
    }
}

/// `goals` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRow {
    pub id: String,
    pub account_id: String,
    pub goal_type: FitnessGoal,
    pub title: String,
    pub description: Option<String>,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    pub unit: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Goal> for GoalRow {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id.clone(),
            account_id: goal.account_id.clone(),
            goal_type: goal.goal_type,
            title: goal.title.clone(),
            description: goal.description.clone(),
            target_value: goal.target_value,
            current_value: goal.current_value,
            unit: goal.unit.clone(),
            deadline: goal.deadline,
            is_completed: goal.is_completed,
            created_at: goal.created_at,
        }
    }
}

impl From<GoalRow> for Goal {
    fn from(row: GoalRow) -> Self {
        Self {
            id: row.id,
            account_id: row.account_id,
            goal_type: row.goal_type,
            title: row.title,
            description: row.description,
            target_value: row.target_value,
            current_value: row.current_value,
            unit: row.unit,
            deadline: row.deadline,
            is_completed: row.is_completed,
            created_at: row.created_at,
        }
    }
}

/// `workout_templates` table; `exercises` is a JSON column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplateRow {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub exercises: Vec<TemplateExercise>,
    pub created_at: DateTime<Utc>,
    pub last_used: Option<DateTime<Utc>>,
    pub times_used: u32,
}

impl From<&WorkoutTemplate> for WorkoutTemplateRow {
    fn from(template: &WorkoutTemplate) -> Self {
        Self {
            id: template.id.clone(),
            account_id: template.account_id.clone(),
            name: template.name.clone(),
            exercises: template.exercises.clone(),
            created_at: template.created_at,
            last_used: template.last_used,
            times_used: template.times_used,
        }
    }
}

impl From<WorkoutTemplateRow> for WorkoutTemplate {
    fn from(row: WorkoutTemplateRow) -> Self {
        Self {
            id: row.id,
            account_id: row.account_id,
            name: row.name,
            exercises: row.exercises,
            created_at: row.created_at,
            last_used: row.last_used,
            times_used: row.times_used,
        }
    }
}

/// `custom_exercises` table. Rows are custom by definition; the flag is
/// restored on the way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomExerciseRow {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub category: EquipmentCategory,
    pub description: Option<String>,
    pub instructions: Option<Vec<String>>,
}

impl CustomExerciseRow {
    pub fn new(account_id: &str, entry: &ExerciseCatalogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            account_id: account_id.to_string(),
            name: entry.name.clone(),
            muscle_group: entry.muscle_group,
            category: entry.category,
            description: entry.description.clone(),
            instructions: entry.instructions.clone(),
        }
    }
}

impl From<CustomExerciseRow> for ExerciseCatalogEntry {
    fn from(row: CustomExerciseRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            muscle_group: row.muscle_group,
            category: row.category,
            is_custom: true,
            description: row.description,
            instructions: row.instructions,
        }
    }
}
