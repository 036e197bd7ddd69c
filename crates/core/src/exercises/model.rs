use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Legs,
    Glutes,
    Abs,
    Cardio,
    FullBody,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    Barbell,
    Dumbbell,
    Machine,
    Cable,
    Bodyweight,
    Cardio,
    Other,
}

/// A named exercise definition. Built-in entries ship with the app and are
/// immutable; custom entries are created by the user and synced per account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseCatalogEntry {
    pub id: String,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub category: EquipmentCategory,
    pub is_custom: bool,
    pub description: Option<String>,
    pub instructions: Option<Vec<String>>,
}

/// Input for a user-created catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomExercise {
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub category: EquipmentCategory,
    pub description: Option<String>,
    pub instructions: Option<Vec<String>>,
}

impl ExerciseCatalogEntry {
    pub fn custom(input: NewCustomExercise) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            muscle_group: input.muscle_group,
            category: input.category,
            is_custom: true,
            description: input.description,
            instructions: input.instructions,
        }
    }
}
