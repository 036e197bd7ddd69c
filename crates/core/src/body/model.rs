use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point-in-time body weight observation, kilograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyWeightEntry {
    pub id: String,
    pub account_id: String,
    pub weight: f64,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
}

impl BodyWeightEntry {
    pub fn logged(account_id: impl Into<String>, weight: f64, notes: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.into(),
            weight,
            date: now,
            notes,
        }
    }
}

/// Tape measurements, centimeters. All sites optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurement {
    pub id: String,
    pub account_id: String,
    pub date: DateTime<Utc>,
    pub chest: Option<f64>,
    pub arms: Option<f64>,
    pub waist: Option<f64>,
    pub legs: Option<f64>,
    pub notes: Option<String>,
}

/// Measurement input; id, owner, and timestamp are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewMeasurement {
    pub chest: Option<f64>,
    pub arms: Option<f64>,
    pub waist: Option<f64>,
    pub legs: Option<f64>,
    pub notes: Option<String>,
}

impl BodyMeasurement {
    pub fn logged(account_id: impl Into<String>, input: NewMeasurement, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.into(),
            date: now,
            chest: input.chest,
            arms: input.arms,
            waist: input.waist,
            legs: input.legs,
            notes: input.notes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoCategory {
    Front,
    Side,
    Back,
}

/// A progress photo. `uri` points at the blob uploaded through the storage
/// adapter, not at inline image data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPhoto {
    pub id: String,
    pub account_id: String,
    pub uri: String,
    pub date: DateTime<Utc>,
    pub category: PhotoCategory,
    pub notes: Option<String>,
}
