//! Document-store variant: one document per account plus per-category
//! sub-collections. Reads return arrays of loosely-typed documents; the
//! adapter decodes each one and skips (with a log line) anything malformed.

use std::sync::Arc;

use async_trait::async_trait;
use log::warn;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

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

use crate::config::DocumentConfig;
use crate::http::{build_client, expect_success, parse_json, transport};
use crate::session::SessionState;

#[derive(Debug, Deserialize)]
struct DocumentList {
    documents: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthUserResponse {
    account_id: String,
    email: String,
    access_token: Option<String>,
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthUriResponse {
    auth_uri: String,
}

#[derive(Debug, Deserialize)]
struct BlobResponse {
    url: String,
}

pub struct DocumentBackend {
    client: Client,
    config: DocumentConfig,
    session: SessionState,
}

impl DocumentBackend {
    pub fn new(config: DocumentConfig) -> Self {
        Self {
            client: build_client(),
            config,
            session: SessionState::new(),
        }
    }

    pub fn create(config: DocumentConfig) -> Backend {
        let adapter = Arc::new(Self::new(config));
        Backend {
            auth: adapter.clone(),
            store: adapter.clone(),
            blobs: adapter,
        }
    }

    fn project_url(&self) -> String {
        format!(
            "{}/v1/projects/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_id
        )
    }

    fn account_url(&self, account_id: &str) -> String {
        format!("{}/accounts/{}", self.project_url(), account_id)
    }

    fn auth_url(&self, op: &str) -> String {
        format!("{}/auth:{}?key={}", self.project_url(), op, self.config.api_key)
    }

    fn headers(&self) -> BackendResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&self.config.api_key)
            .map_err(|_| BackendError::auth("invalid API key format"))?;
        headers.insert("x-api-key", key);
        if let Some(token) = self.session.access_token() {
            let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| BackendError::auth("invalid access token format"))?;
            headers.insert(AUTHORIZATION, bearer);
        }
        Ok(headers)
    }

    fn session_from(&self, user: AuthUserResponse) -> BackendResult<AuthSession> {
        let (Some(access_token), Some(refresh_token)) = (user.access_token, user.refresh_token)
        else {
            return Err(BackendError::auth("response carried no tokens"));
        };
        let session = AuthSession {
            account_id: user.account_id,
            email: user.email,
            access_token,
            refresh_token,
        };
        self.session.install(session.clone());
        Ok(session)
    }

    async fn list_documents<T: DeserializeOwned>(
        &self,
        account_id: &str,
        collection: &str,
    ) -> BackendResult<Vec<T>> {
        let url = format!("{}/{}", self.account_url(account_id), collection);
        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(transport)?;
        let listing: DocumentList = parse_json(response).await?;

        let mut records = Vec::with_capacity(listing.documents.len());
        for document in listing.documents {
            match serde_json::from_value::<T>(document) {
                Ok(record) => records.push(record),
                Err(err) => warn!("skipping malformed {collection} document: {err}"),
            }
        }
        Ok(records)
    }

    async fn put_document<T: Serialize>(
        &self,
        account_id: &str,
        collection: &str,
        document_id: &str,
        record: &T,
    ) -> BackendResult<()> {
        let url = format!("{}/{}/{}", self.account_url(account_id), collection, document_id);
        let response = self
            .client
            .put(&url)
            .headers(self.headers()?)
            .json(record)
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }

    async fn delete_document(&self, account_id: &str, collection: &str, document_id: &str) -> BackendResult<()> {
        let url = format!("{}/{}/{}", self.account_url(account_id), collection, document_id);
        let response = self
            .client
            .delete(&url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }

    /// Deletes address documents by id alone; the owning account comes from
    /// the active session.
    fn session_account_id(&self) -> BackendResult<String> {
        self.session
            .current()
            .map(|s| s.account_id)
            .ok_or_else(|| BackendError::auth("not signed in"))
    }
}

#[async_trait]
impl AuthServiceTrait for DocumentBackend {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<AuthSession> {
        let response = self
            .client
            .post(self.auth_url("signIn"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport)?;
        let user: AuthUserResponse = parse_json(response).await?;
        self.session_from(user)
    }

    async fn sign_up_with_password(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> BackendResult<SignUpOutcome> {
        let response = self
            .client
            .post(self.auth_url("signUp"))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "displayName": display_name,
            }))
            .send()
            .await
            .map_err(transport)?;
        let user: AuthUserResponse = parse_json(response).await?;
        if user.access_token.is_none() || user.refresh_token.is_none() {
            return Ok(SignUpOutcome {
                session: None,
                needs_confirmation: true,
            });
        }
        Ok(SignUpOutcome {
            session: Some(self.session_from(user)?),
            needs_confirmation: false,
        })
    }

    async fn sign_in_with_oauth(&self, provider: OAuthProvider) -> BackendResult<String> {
        let response = self
            .client
            .post(self.auth_url("createAuthUri"))
            .json(&serde_json::json!({
                "providerId": provider.as_str(),
                "continueUri": self.config.oauth_redirect_url,
            }))
            .send()
            .await
            .map_err(transport)?;
        let parsed: AuthUriResponse = parse_json(response).await?;
        Ok(parsed.auth_uri)
    }

    async fn set_session(&self, access_token: &str, refresh_token: &str) -> BackendResult<AuthSession> {
        let response = self
            .client
            .post(self.auth_url("lookup"))
            .json(&serde_json::json!({ "accessToken": access_token }))
            .send()
            .await
            .map_err(transport)?;
        let user: AuthUserResponse = parse_json(response).await?;
        let session = AuthSession {
            account_id: user.account_id,
            email: user.email,
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
        };
        self.session.install(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        // Tokens are bearer-only; discarding them locally invalidates the
        // session for this device.
        self.session.clear();
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> BackendResult<()> {
        let response = self
            .client
            .post(self.auth_url("sendPasswordReset"))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }

    async fn resend_confirmation(&self, email: &str) -> BackendResult<()> {
        let response = self
            .client
            .post(self.auth_url("resendConfirmation"))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }

    fn current_session(&self) -> Option<AuthSession> {
        self.session.current()
    }

    fn subscribe(&self, listener: Box<dyn Fn(&AuthEvent) + Send + Sync>) -> AuthSubscription {
        self.session.subscribe(listener)
    }
}

#[async_trait]
impl RemoteStoreTrait for DocumentBackend {
    async fn fetch_profile(&self, account_id: &str) -> BackendResult<Option<Account>> {
        let response = self
            .client
            .get(self.account_url(account_id))
            .headers(self.headers()?)
            .send()
            .await
            .map_err(transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let account: Account = parse_json(response).await?;
        Ok(Some(account))
    }

    async fn upsert_profile(&self, account: &Account) -> BackendResult<()> {
        let response = self
            .client
            .put(self.account_url(&account.id))
            .headers(self.headers()?)
            .json(account)
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }

    async fn list_workouts(&self, account_id: &str) -> BackendResult<Vec<WorkoutSession>> {
        self.list_documents(account_id, "workouts").await
    }

    async fn upsert_workout(&self, workout: &WorkoutSession) -> BackendResult<()> {
        self.put_document(&workout.account_id, "workouts", &workout.id, workout)
            .await
    }

    async fn delete_workout(&self, workout_id: &str) -> BackendResult<()> {
        let account_id = self.session_account_id()?;
        self.delete_document(&account_id, "workouts", workout_id).await
    }

    async fn list_body_weights(&self, account_id: &str) -> BackendResult<Vec<BodyWeightEntry>> {
        self.list_documents(account_id, "bodyWeights").await
    }

    async fn upsert_body_weight(&self, entry: &BodyWeightEntry) -> BackendResult<()> {
        self.put_document(&entry.account_id, "bodyWeights", &entry.id, entry)
            .await
    }

    async fn delete_body_weight(&self, entry_id: &str) -> BackendResult<()> {
        let account_id = self.session_account_id()?;
        self.delete_document(&account_id, "bodyWeights", entry_id).await
    }

    async fn list_measurements(&self, account_id: &str) -> BackendResult<Vec<BodyMeasurement>> {
        self.list_documents(account_id, "measurements").await
    }

    async fn upsert_measurement(&self, entry: &BodyMeasurement) -> BackendResult<()> {
        self.put_document(&entry.account_id, "measurements", &entry.id, entry)
            .await
    }

    async fn delete_measurement(&self, entry_id: &str) -> BackendResult<()> {
        let account_id = self.session_account_id()?;
        self.delete_document(&account_id, "measurements", entry_id).await
    }

    async fn list_personal_records(&self, account_id: &str) -> BackendResult<Vec<PersonalRecord>> {
        self.list_documents(account_id, "personalRecords").await
    }

    async fn upsert_personal_record(&self, record: &PersonalRecord) -> BackendResult<()> {
        self.put_document(&record.account_id, "personalRecords", &record.id, record)
            .await
    }

    async fn list_goals(&self, account_id: &str) -> BackendResult<Vec<Goal>> {
        self.list_documents(account_id, "goals").await
    }

    async fn upsert_goal(&self, goal: &Goal) -> BackendResult<()> {
        self.put_document(&goal.account_id, "goals", &goal.id, goal).await
    }

    async fn delete_goal(&self, goal_id: &str) -> BackendResult<()> {
        let account_id = self.session_account_id()?;
        self.delete_document(&account_id, "goals", goal_id).await
    }

    async fn list_templates(&self, account_id: &str) -> BackendResult<Vec<WorkoutTemplate>> {
        self.list_documents(account_id, "templates").await
    }

    async fn upsert_template(&self, template: &WorkoutTemplate) -> BackendResult<()> {
        self.put_document(&template.account_id, "templates", &template.id, template)
            .await
    }

    async fn delete_template(&self, template_id: &str) -> BackendResult<()> {
        let account_id = self.session_account_id()?;
        self.delete_document(&account_id, "templates", template_id).await
    }

    async fn list_custom_exercises(&self, account_id: &str) -> BackendResult<Vec<ExerciseCatalogEntry>> {
        self.list_documents(account_id, "customExercises").await
    }

    async fn upsert_custom_exercise(
        &self,
        account_id: &str,
        entry: &ExerciseCatalogEntry,
    ) -> BackendResult<()> {
        self.put_document(account_id, "customExercises", &entry.id, entry)
            .await
    }
}

#[async_trait]
impl BlobStoreTrait for DocumentBackend {
    async fn upload_photo(&self, account_id: &str, bytes: Vec<u8>, photo_id: &str) -> BackendResult<String> {
        let url = format!("{}/media/{}/{}.jpg", self.project_url(), account_id, photo_id);
        let response = self
            .client
            .put(&url)
            .headers(self.headers()?)
            .header(reqwest::header::CONTENT_TYPE, "image/jpeg")
            .body(bytes)
            .send()
            .await
            .map_err(transport)?;
        let blob: BlobResponse = parse_json(response).await?;
        Ok(blob.url)
    }

    async fn delete_photo(&self, account_id: &str, photo_id: &str) -> BackendResult<()> {
        let url = format!("{}/media/{}/{}.jpg", self.project_url(), account_id, photo_id);
        let response = self
            .client
            .delete(&url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }
}
