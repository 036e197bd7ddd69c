use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fitness objective chosen during onboarding. Doubles as the type of a
/// [`crate::goals::Goal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Maintenance,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Free,
    PremiumMonthly,
    PremiumYearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    Metric,
    Imperial,
}

/// Editable profile embedded in an [`Account`].
///
/// `weight` is denormalized: logging a body-weight entry keeps it in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub age: Option<u32>,
    /// Centimeters.
    pub height: Option<f64>,
    /// Kilograms.
    pub weight: Option<f64>,
    pub goal: FitnessGoal,
    pub experience_level: ExperienceLevel,
    pub units: UnitSystem,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: None,
            height: None,
            weight: None,
            goal: FitnessGoal::MuscleGain,
            experience_level: ExperienceLevel::Beginner,
            units: UnitSystem::Metric,
        }
    }

    /// Merge an edit into the profile; `None` fields are left unchanged.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(height) = update.height {
            self.height = Some(height);
        }
        if let Some(weight) = update.weight {
            self.weight = Some(weight);
        }
        if let Some(goal) = update.goal {
            self.goal = goal;
        }
        if let Some(level) = update.experience_level {
            self.experience_level = level;
        }
        if let Some(units) = update.units {
            self.units = units;
        }
    }
}

/// Partial profile edit; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub goal: Option<FitnessGoal>,
    pub experience_level: Option<ExperienceLevel>,
    pub units: Option<UnitSystem>,
}

/// An authenticated end-user and their profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub profile: Profile,
    pub subscription: SubscriptionPlan,
}

impl Account {
    /// Fabricate a fresh account from an email address, as happens on first
    /// sign-in when no profile exists locally or remotely. The display name
    /// defaults to the mailbox part of the address.
    pub fn fabricated(id: impl Into<String>, email: &str, now: DateTime<Utc>) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            id: id.into(),
            email: email.to_string(),
            display_name: name.clone(),
            photo_url: None,
            created_at: now,
            updated_at: now,
            profile: Profile::new(name),
            subscription: SubscriptionPlan::Free,
        }
    }
}
