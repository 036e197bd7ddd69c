use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Reminder and alert preferences, one singleton per account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub workout_reminders: bool,
    pub reminder_time: NaiveTime,
    /// Weekdays the reminder fires on, 0 = Sunday .. 6 = Saturday.
    pub reminder_days: Vec<u8>,
    pub goal_progress_alerts: bool,
    pub personal_record_alerts: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            workout_reminders: true,
            reminder_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid literal time"),
            reminder_days: vec![1, 2, 3, 4, 5],
            goal_progress_alerts: true,
            personal_record_alerts: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}
