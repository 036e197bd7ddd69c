use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounts::FitnessGoal;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub account_id: String,
    #[serde(rename = "type")]
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

/// Goal input; id, owner, creation time, and completion flag are assigned by
/// the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub goal_type: FitnessGoal,
    pub title: String,
    pub description: Option<String>,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    pub unit: Option<String>,
    pub deadline: Option<NaiveDate>,
}

/// Partial goal edit; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    pub unit: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub is_completed: Option<bool>,
}

impl Goal {
    pub fn created(account_id: impl Into<String>, input: NewGoal, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.into(),
            goal_type: input.goal_type,
            title: input.title,
            description: input.description,
            target_value: input.target_value,
            current_value: input.current_value,
            unit: input.unit,
            deadline: input.deadline,
            is_completed: false,
            created_at: now,
        }
    }

    pub fn apply(&mut self, patch: &GoalPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(target) = patch.target_value {
            self.target_value = Some(target);
        }
        if let Some(current) = patch.current_value {
            self.current_value = Some(current);
        }
        if let Some(unit) = &patch.unit {
            self.unit = Some(unit.clone());
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = Some(deadline);
        }
        if let Some(completed) = patch.is_completed {
            self.is_completed = completed;
        }
    }
}
