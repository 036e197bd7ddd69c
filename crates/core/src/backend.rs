//! Remote backend adapter contracts. One concrete variant (local-only,
//! document-store, or relational) is selected by configuration at startup
//! and handed to the store as a [`Backend`] bundle.
//!
//! Failure semantics: every remote call may fail; callers catch, log, and
//! treat local state as authoritative. There is no retry, backoff, or queue.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::accounts::Account;
use crate::auth::{AuthSession, AuthSubscription, OAuthProvider, SignUpOutcome};
use crate::body::{BodyMeasurement, BodyWeightEntry};
use crate::exercises::ExerciseCatalogEntry;
use crate::goals::Goal;
use crate::records::PersonalRecord;
use crate::templates::WorkoutTemplate;
use crate::workouts::WorkoutSession;

/// Errors from a remote backend adapter.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Could not reach the service at all.
    #[error("transport error: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
    /// No usable session or token for the call.
    #[error("auth error: {0}")]
    Auth(String),
    /// A payload that could not be encoded or decoded.
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl BackendError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding(message.into())
    }

    /// HTTP status if this is an API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Authentication sub-contract.
#[async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<AuthSession>;

    /// Sign up with email and password. The outcome reports whether email
    /// confirmation is still pending (in which case there is no session yet).
    async fn sign_up_with_password(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> BackendResult<SignUpOutcome>;

    /// Begin an OAuth flow. Returns the authorization URL to open in a
    /// browser; completion happens via [`AuthServiceTrait::set_session`] once
    /// the redirect comes back.
    async fn sign_in_with_oauth(&self, provider: OAuthProvider) -> BackendResult<String>;

    /// Install tokens extracted from an OAuth callback as the active session.
    async fn set_session(&self, access_token: &str, refresh_token: &str) -> BackendResult<AuthSession>;

    async fn sign_out(&self) -> BackendResult<()>;

    async fn send_password_reset(&self, email: &str) -> BackendResult<()>;

    async fn resend_confirmation(&self, email: &str) -> BackendResult<()>;

    fn current_session(&self) -> Option<AuthSession>;

    fn subscribe(&self, listener: Box<dyn Fn(&crate::auth::AuthEvent) + Send + Sync>) -> AuthSubscription;
}

/// Per-category data sub-contract.
///
/// `list` calls return newest-first by creation time, except personal
/// records and custom exercises, which are unordered sets.
#[async_trait]
pub trait RemoteStoreTrait: Send + Sync {
    async fn fetch_profile(&self, account_id: &str) -> BackendResult<Option<Account>>;
    async fn upsert_profile(&self, account: &Account) -> BackendResult<()>;

    async fn list_workouts(&self, account_id: &str) -> BackendResult<Vec<WorkoutSession>>;
    async fn upsert_workout(&self, workout: &WorkoutSession) -> BackendResult<()>;
    async fn delete_workout(&self, workout_id: &str) -> BackendResult<()>;

    async fn list_body_weights(&self, account_id: &str) -> BackendResult<Vec<BodyWeightEntry>>;
    async fn upsert_body_weight(&self, entry: &BodyWeightEntry) -> BackendResult<()>;
    async fn delete_body_weight(&self, entry_id: &str) -> BackendResult<()>;

    async fn list_measurements(&self, account_id: &str) -> BackendResult<Vec<BodyMeasurement>>;
    async fn upsert_measurement(&self, entry: &BodyMeasurement) -> BackendResult<()>;
    async fn delete_measurement(&self, entry_id: &str) -> BackendResult<()>;

    async fn list_personal_records(&self, account_id: &str) -> BackendResult<Vec<PersonalRecord>>;
    async fn upsert_personal_record(&self, record: &PersonalRecord) -> BackendResult<()>;

    async fn list_goals(&self, account_id: &str) -> BackendResult<Vec<Goal>>;
    async fn upsert_goal(&self, goal: &Goal) -> BackendResult<()>;
    async fn delete_goal(&self, goal_id: &str) -> BackendResult<()>;

    async fn list_templates(&self, account_id: &str) -> BackendResult<Vec<WorkoutTemplate>>;
    async fn upsert_template(&self, template: &WorkoutTemplate) -> BackendResult<()>;
    async fn delete_template(&self, template_id: &str) -> BackendResult<()>;

    async fn list_custom_exercises(&self, account_id: &str) -> BackendResult<Vec<ExerciseCatalogEntry>>;
    async fn upsert_custom_exercise(
        &self,
        account_id: &str,
        entry: &ExerciseCatalogEntry,
    ) -> BackendResult<()>;
}

/// Blob storage sub-contract. Upload and delete address the same object via
/// the `{account_id}/{blob_id}.jpg` path convention.
#[async_trait]
pub trait BlobStoreTrait: Send + Sync {
    /// Upload an image, returning a stable public URI.
    async fn upload_photo(&self, account_id: &str, bytes: Vec<u8>, photo_id: &str) -> BackendResult<String>;

    async fn delete_photo(&self, account_id: &str, photo_id: &str) -> BackendResult<()>;
}

/// The three sub-contracts of one backend variant, bundled for injection.
#[derive(Clone)]
pub struct Backend {
    pub auth: Arc<dyn AuthServiceTrait>,
    pub store: Arc<dyn RemoteStoreTrait>,
    pub blobs: Arc<dyn BlobStoreTrait>,
}
