use crate::accounts::Account;
use crate::body::{BodyMeasurement, BodyWeightEntry, ProgressPhoto};
use crate::exercises::{builtin_catalog, ExerciseCatalogEntry};
use crate::goals::Goal;
use crate::records::PersonalRecord;
use crate::settings::{NotificationSettings, ThemePreference};
use crate::templates::WorkoutTemplate;
use crate::workouts::WorkoutSession;

/// Everything the presentation layer renders. Collections are newest-first.
///
/// The default value is the unauthenticated state; sign-out resets to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub account: Option<Account>,
    pub has_onboarded: bool,
    /// Finalized sessions. The active session lives in `active_workout`
    /// until finished, and is dropped without persistence on cancel.
    pub workouts: Vec<WorkoutSession>,
    pub active_workout: Option<WorkoutSession>,
    /// User-created catalog entries only; see [`AppState::exercises`].
    pub custom_exercises: Vec<ExerciseCatalogEntry>,
    pub body_weights: Vec<BodyWeightEntry>,
    pub measurements: Vec<BodyMeasurement>,
    pub progress_photos: Vec<ProgressPhoto>,
    pub personal_records: Vec<PersonalRecord>,
    pub goals: Vec<Goal>,
    pub templates: Vec<WorkoutTemplate>,
    pub notification_settings: NotificationSettings,
    pub theme: ThemePreference,
}

impl AppState {
    /// The full catalog: built-in seed entries followed by custom ones.
    pub fn exercises(&self) -> Vec<ExerciseCatalogEntry> {
        let mut catalog = builtin_catalog();
        catalog.extend(self.custom_exercises.iter().cloned());
        catalog
    }
}
