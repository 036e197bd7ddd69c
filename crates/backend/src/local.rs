//! Local-only (null) variant for offline builds: every remote verb is a
//! successful no-op and nothing leaves the device.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use uuid::Uuid;

use gymtrack_core::accounts::Account;
use gymtrack_core::auth::{AuthEvent, AuthSession, AuthSubscription, OAuthProvider, SignUpOutcome};
use gymtrack_core::backend::{
    AuthServiceTrait, Backend, BackendError, BackendResult, BlobStoreTrait, RemoteStoreTrait,
};
use gymtrack_core::body::{BodyMeasurement, BodyWeightEntry};
use gymtrack_core::exercises::ExerciseCatalogEntry;
use gymtrack_core::goals::Goal;
use gymtrack_core::records::PersonalRecord;
use gymtrack_core::templates::WorkoutTemplate;
use gymtrack_core::workouts::WorkoutSession;

use crate::session::SessionState;

pub struct LocalBackend {
    session: SessionState,
}

impl LocalBackend {
    pub fn new() -> Self {
        Self {
            session: SessionState::new(),
        }
    }

    pub fn create() -> Backend {
        let adapter = Arc::new(Self::new());
        Backend {
            auth: adapter.clone(),
            store: adapter.clone(),
            blobs: adapter,
        }
    }

    fn fabricated_session(email: &str) -> AuthSession {
        AuthSession {
            account_id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            access_token: "offline".to_string(),
            refresh_token: "offline".to_string(),
        }
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthServiceTrait for LocalBackend {
    async fn sign_in_with_password(&self, email: &str, _password: &str) -> BackendResult<AuthSession> {
        let session = Self::fabricated_session(email);
        self.session.install(session.clone());
        Ok(session)
    }

    async fn sign_up_with_password(
        &self,
        email: &str,
        _password: &str,
        _display_name: &str,
    ) -> BackendResult<SignUpOutcome> {
        let session = Self::fabricated_session(email);
        self.session.install(session.clone());
        Ok(SignUpOutcome {
            session: Some(session),
            needs_confirmation: false,
        })
    }

    async fn sign_in_with_oauth(&self, _provider: OAuthProvider) -> BackendResult<String> {
        Err(BackendError::auth("OAuth sign-in is unavailable offline"))
    }

    async fn set_session(&self, _access_token: &str, _refresh_token: &str) -> BackendResult<AuthSession> {
        Err(BackendError::auth("no OAuth session to restore offline"))
    }

    async fn sign_out(&self) -> BackendResult<()> {
        self.session.clear();
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> BackendResult<()> {
        debug!("offline build: dropping password reset for {email}");
        Ok(())
    }

    async fn resend_confirmation(&self, email: &str) -> BackendResult<()> {
        debug!("offline build: dropping confirmation resend for {email}");
        Ok(())
    }

    fn current_session(&self) -> Option<AuthSession> {
        self.session.current()
    }

    fn subscribe(&self, listener: Box<dyn Fn(&AuthEvent) + Send + Sync>) -> AuthSubscription {
        self.session.subscribe(listener)
    }
}

#[async_trait]
impl RemoteStoreTrait for LocalBackend {
    async fn fetch_profile(&self, _account_id: &str) -> BackendResult<Option<Account>> {
        Ok(None)
    }

    async fn upsert_profile(&self, _account: &Account) -> BackendResult<()> {
        Ok(())
    }

    async fn list_workouts(&self, _account_id: &str) -> BackendResult<Vec<WorkoutSession>> {
        Ok(Vec::new())
    }

    async fn upsert_workout(&self, _workout: &WorkoutSession) -> BackendResult<()> {
        Ok(())
    }

    async fn delete_workout(&self, _workout_id: &str) -> BackendResult<()> {
        Ok(())
    }

    async fn list_body_weights(&self, _account_id: &str) -> BackendResult<Vec<BodyWeightEntry>> {
        Ok(Vec::new())
    }

    async fn upsert_body_weight(&self, _entry: &BodyWeightEntry) -> BackendResult<()> {
        Ok(())
    }

    async fn delete_body_weight(&self, _entry_id: &str) -> BackendResult<()> {
        Ok(())
    }

    async fn list_measurements(&self, _account_id: &str) -> BackendResult<Vec<BodyMeasurement>> {
        Ok(Vec::new())
    }

    async fn upsert_measurement(&self, _entry: &BodyMeasurement) -> BackendResult<()> {
        Ok(())
    }

    async fn delete_measurement(&self, _entry_id: &str) -> BackendResult<()> {
        Ok(())
    }

    async fn list_personal_records(&self, _account_id: &str) -> BackendResult<Vec<PersonalRecord>> {
        Ok(Vec::new())
    }

    async fn upsert_personal_record(&self, _record: &PersonalRecord) -> BackendResult<()> {
        Ok(())
    }

    async fn list_goals(&self, _account_id: &str) -> BackendResult<Vec<Goal>> {
        Ok(Vec::new())
    }

    async fn upsert_goal(&self, _goal: &Goal) -> BackendResult<()> {
        Ok(())
    }

    async fn delete_goal(&self, _goal_id: &str) -> BackendResult<()> {
        Ok(())
    }

    async fn list_templates(&self, _account_id: &str) -> BackendResult<Vec<WorkoutTemplate>> {
        Ok(Vec::new())
    }

    async fn upsert_template(&self, _template: &WorkoutTemplate) -> BackendResult<()> {
        Ok(())
    }

    async fn delete_template(&self, _template_id: &str) -> BackendResult<()> {
        Ok(())
    }

    async fn list_custom_exercises(&self, _account_id: &str) -> BackendResult<Vec<ExerciseCatalogEntry>> {
        Ok(Vec::new())
    }

    async fn upsert_custom_exercise(
        &self,
        _account_id: &str,
        _entry: &ExerciseCatalogEntry,
    ) -> BackendResult<()> {
        Ok(())
    }
}

#[async_trait]
impl BlobStoreTrait for LocalBackend {
    async fn upload_photo(&self, account_id: &str, _bytes: Vec<u8>, photo_id: &str) -> BackendResult<String> {
        Ok(format!("local://{account_id}/{photo_id}.jpg"))
    }

    async fn delete_photo(&self, _account_id: &str, _photo_id: &str) -> BackendResult<()> {
        Ok(())
    }
}
