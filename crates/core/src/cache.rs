//! Local persistent cache contract: one opaque JSON blob per namespace.
//!
//! The cache is pure storage. Failure policy lives in the [`read_json`] and
//! [`write_json`] helpers: any I/O or decode failure is logged and treated as
//! "empty"/"no-op" so the store never surfaces cache trouble to the caller.

use std::fmt;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Canonical list of cached data categories, one JSON document each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    Account,
    Workouts,
    CustomExercises,
    BodyWeights,
    Measurements,
    ProgressPhotos,
    PersonalRecords,
    Goals,
    Templates,
    NotificationSettings,
    OnboardingComplete,
    Theme,
}

impl CacheNamespace {
    pub const ALL: [CacheNamespace; 12] = [
        CacheNamespace::Account,
        CacheNamespace::Workouts,
        CacheNamespace::CustomExercises,
        CacheNamespace::BodyWeights,
        CacheNamespace::Measurements,
        CacheNamespace::ProgressPhotos,
        CacheNamespace::PersonalRecords,
        CacheNamespace::Goals,
        CacheNamespace::Templates,
        CacheNamespace::NotificationSettings,
        CacheNamespace::OnboardingComplete,
        CacheNamespace::Theme,
    ];

    /// Stable storage key. Changing these orphans existing on-device data.
    pub fn key(self) -> &'static str {
        match self {
            CacheNamespace::Account => "account",
            CacheNamespace::Workouts => "workouts",
            CacheNamespace::CustomExercises => "custom_exercises",
            CacheNamespace::BodyWeights => "body_weights",
            CacheNamespace::Measurements => "measurements",
            CacheNamespace::ProgressPhotos => "progress_photos",
            CacheNamespace::PersonalRecords => "personal_records",
            CacheNamespace::Goals => "goals",
            CacheNamespace::Templates => "templates",
            CacheNamespace::NotificationSettings => "notification_settings",
            CacheNamespace::OnboardingComplete => "onboarding_complete",
            CacheNamespace::Theme => "theme",
        }
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache storage error: {0}")]
    Storage(String),
    #[error("cache encoding error: {0}")]
    Encoding(String),
}

impl CacheError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Durable on-device key-value storage, surviving process restarts. No
/// transactions, no expiry, no size limits.
pub trait CacheStoreTrait: Send + Sync {
    fn get(&self, namespace: CacheNamespace) -> CacheResult<Option<String>>;
    fn set(&self, namespace: CacheNamespace, payload: &str) -> CacheResult<()>;
    fn remove(&self, namespaces: &[CacheNamespace]) -> CacheResult<()>;
}

/// Read and decode one namespace; missing, unreadable, or undecodable data
/// all come back as `None`.
pub fn read_json<T: DeserializeOwned>(cache: &dyn CacheStoreTrait, namespace: CacheNamespace) -> Option<T> {
    let payload = match cache.get(namespace) {
        Ok(value) => value?,
        Err(err) => {
            warn!("cache read failed for {}: {}", namespace, err);
            return None;
        }
    };
    match serde_json::from_str(&payload) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("cache decode failed for {}: {}", namespace, err);
            None
        }
    }
}

/// Encode and write one namespace; failures are logged and dropped.
pub fn write_json<T: Serialize>(cache: &dyn CacheStoreTrait, namespace: CacheNamespace, value: &T) {
    let payload = match serde_json::to_string(value) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("cache encode failed for {}: {}", namespace, err);
            return;
        }
    };
    if let Err(err) = cache.set(namespace, &payload) {
        warn!("cache write failed for {}: {}", namespace, err);
    }
}
