use std::future::Future;
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;
use log::{debug, warn};
use serde::Serialize;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::accounts::{Account, ProfileUpdate, SubscriptionPlan};
use crate::analytics::estimate_session_calories;
use crate::auth::{
    extract_callback_tokens, validate_email, validate_sign_in, validate_sign_up, AuthError,
    AuthEvent, AuthSession, AuthSubscription, OAuthProvider,
};
use crate::backend::{Backend, BackendResult};
use crate::body::{BodyMeasurement, BodyWeightEntry, NewMeasurement, PhotoCategory, ProgressPhoto};
use crate::cache::{read_json, write_json, CacheNamespace, CacheStoreTrait};
use crate::exercises::{ExerciseCatalogEntry, NewCustomExercise};
use crate::goals::{Goal, GoalPatch, NewGoal};
use crate::records::{absorb_session, PersonalRecord};
use crate::settings::{NotificationSettings, ThemePreference};
use crate::templates::{NewWorkoutTemplate, WorkoutTemplate};
use crate::workouts::{ExerciseEntry, SetPatch, WorkoutSession};

use super::state::AppState;

/// Result of a password sign-up at the store level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpStatus {
    /// The account is active and hydrated.
    SignedIn,
    /// The backend sent a confirmation email; no session exists yet.
    ConfirmationRequired,
}

struct StoreInner {
    cache: Arc<dyn CacheStoreTrait>,
    backend: Backend,
    state: RwLock<AppState>,
    /// Bumped on every sign-in and sign-out. Remote completions carrying a
    /// stale epoch are ignored instead of cancelled.
    session_epoch: AtomicU64,
    sync_task: Mutex<Option<JoinHandle<()>>>,
    write_tasks: Mutex<Vec<JoinHandle<()>>>,
}

/// The application store. Cheap to clone; construct one at startup and hand
/// it to whatever consumes it.
///
/// Every mutation follows one pattern: compute the new value from current
/// in-memory state, publish it, persist the affected namespace to the local
/// cache synchronously, then fire an async remote write whose failure is
/// logged and dropped. Nothing blocks on the network except the explicit
/// auth entry points and the photo upload (which must return a blob URI).
#[derive(Clone)]
pub struct AppStore {
    inner: Arc<StoreInner>,
}

impl AppStore {
    pub fn new(cache: Arc<dyn CacheStoreTrait>, backend: Backend) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                cache,
                backend,
                state: RwLock::new(AppState::default()),
                session_epoch: AtomicU64::new(0),
                sync_task: Mutex::new(None),
                write_tasks: Mutex::new(Vec::new()),
            }),
        }
    }

    // ─── state access ────────────────────────────────────────────────────

    fn read_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.state.read().expect("state lock poisoned"))
    }

    fn mutate_state<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        f(&mut self.inner.state.write().expect("state lock poisoned"))
    }

    /// Full snapshot for rendering.
    pub fn state(&self) -> AppState {
        self.read_state(|s| s.clone())
    }

    pub fn account(&self) -> Option<Account> {
        self.read_state(|s| s.account.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state(|s| s.account.is_some())
    }

    pub fn has_onboarded(&self) -> bool {
        self.read_state(|s| s.has_onboarded)
    }

    pub fn workouts(&self) -> Vec<WorkoutSession> {
        self.read_state(|s| s.workouts.clone())
    }

    pub fn active_workout(&self) -> Option<WorkoutSession> {
        self.read_state(|s| s.active_workout.clone())
    }

    /// Built-in catalog plus custom entries.
    pub fn exercises(&self) -> Vec<ExerciseCatalogEntry> {
        self.read_state(|s| s.exercises())
    }

    pub fn body_weights(&self) -> Vec<BodyWeightEntry> {
        self.read_state(|s| s.body_weights.clone())
    }

    pub fn measurements(&self) -> Vec<BodyMeasurement> {
        self.read_state(|s| s.measurements.clone())
    }

    pub fn progress_photos(&self) -> Vec<ProgressPhoto> {
        self.read_state(|s| s.progress_photos.clone())
    }

    pub fn personal_records(&self) -> Vec<PersonalRecord> {
        self.read_state(|s| s.personal_records.clone())
    }

    pub fn goals(&self) -> Vec<Goal> {
        self.read_state(|s| s.goals.clone())
    }

    pub fn templates(&self) -> Vec<WorkoutTemplate> {
        self.read_state(|s| s.templates.clone())
    }

    pub fn notification_settings(&self) -> NotificationSettings {
        self.read_state(|s| s.notification_settings.clone())
    }

    pub fn theme(&self) -> ThemePreference {
        self.read_state(|s| s.theme)
    }

    // ─── plumbing ────────────────────────────────────────────────────────

    fn persist<T: Serialize>(&self, namespace: CacheNamespace, value: &T) {
        write_json(self.inner.cache.as_ref(), namespace, value);
    }

    fn account_id(&self) -> Option<String> {
        self.read_state(|s| s.account.as_ref().map(|a| a.id.clone()))
    }

    fn require_account(&self) -> Option<String> {
        let id = self.account_id();
        if id.is_none() {
            warn!("ignoring mutation: no authenticated account");
        }
        id
    }

    fn spawn_write<F>(&self, label: &'static str, fut: F)
    where
        F: Future<Output = BackendResult<()>> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            if let Err(err) = fut.await {
                warn!("remote write failed ({label}): {err}");
            }
        });
        self.inner
            .write_tasks
            .lock()
            .expect("write task lock poisoned")
            .push(handle);
    }

    /// Drain outstanding fire-and-forget remote writes. Intended as a
    /// shutdown hook; a write that fails is still only logged.
    pub async fn flush_pending_writes(&self) {
        let tasks: Vec<JoinHandle<()>> = mem::take(
            &mut *self
                .inner
                .write_tasks
                .lock()
                .expect("write task lock poisoned"),
        );
        for task in tasks {
            let _ = task.await;
        }
    }

    /// Await the in-flight background sync, if any.
    pub async fn wait_for_sync(&self) {
        let task = self
            .inner
            .sync_task
            .lock()
            .expect("sync task lock poisoned")
            .take();
        if let Some(task) = task {
            let _ = task.await;
        }
    }

    fn epoch_is_current(&self, epoch: u64) -> bool {
        self.inner.session_epoch.load(Ordering::SeqCst) == epoch
    }

    // ─── authentication ──────────────────────────────────────────────────

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        validate_sign_in(email, password)?;
        let session = self
            .inner
            .backend
            .auth
            .sign_in_with_password(email, password)
            .await?;
        self.establish_session(&session, None);
        Ok(())
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<SignUpStatus, AuthError> {
        validate_sign_up(email, password, display_name)?;
        let outcome = self
            .inner
            .backend
            .auth
            .sign_up_with_password(email, password, display_name)
            .await?;
        match outcome.session {
            Some(session) => {
                self.establish_session(&session, Some(display_name));
                Ok(SignUpStatus::SignedIn)
            }
            None if outcome.needs_confirmation => Ok(SignUpStatus::ConfirmationRequired),
            None => Err(AuthError::Unknown(
                "sign-up produced neither a session nor a confirmation request".to_string(),
            )),
        }
    }

    /// Begin an OAuth flow; returns the authorization URL to open.
    pub async fn sign_in_with_oauth(&self, provider: OAuthProvider) -> Result<String, AuthError> {
        Ok(self.inner.backend.auth.sign_in_with_oauth(provider).await?)
    }

    /// Finish an OAuth flow from the redirect URI. Absence of both tokens is
    /// a hard failure for the attempt.
    pub async fn complete_oauth(&self, callback_url: &str) -> Result<(), AuthError> {
        let Some(tokens) = extract_callback_tokens(callback_url) else {
            return Err(AuthError::Unknown(
                "no tokens found in redirect URL".to_string(),
            ));
        };
        let session = self
            .inner
            .backend
            .auth
            .set_session(&tokens.access_token, &tokens.refresh_token)
            .await?;
        self.establish_session(&session, None);
        Ok(())
    }

    pub async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        validate_email(email)?;
        Ok(self.inner.backend.auth.send_password_reset(email).await?)
    }

    pub async fn resend_confirmation(&self, email: &str) -> Result<(), AuthError> {
        validate_email(email)?;
        Ok(self.inner.backend.auth.resend_confirmation(email).await?)
    }

    pub fn subscribe_auth_changes(
        &self,
        listener: Box<dyn Fn(&AuthEvent) + Send + Sync>,
    ) -> AuthSubscription {
        self.inner.backend.auth.subscribe(listener)
    }

    /// Clears in-memory state, removes every cache namespace, and invalidates
    /// the remote session (failure logged only).
    pub async fn sign_out(&self) {
        self.inner.session_epoch.fetch_add(1, Ordering::SeqCst);
        self.mutate_state(|s| *s = AppState::default());
        if let Err(err) = self.inner.cache.remove(&CacheNamespace::ALL) {
            warn!("failed to clear cache on sign-out: {err}");
        }
        if let Err(err) = self.inner.backend.auth.sign_out().await {
            warn!("remote sign-out failed: {err}");
        }
    }

    fn establish_session(&self, session: &AuthSession, display_name: Option<&str>) {
        let epoch = self.inner.session_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.hydrate_from_cache(session, display_name);

        let store = self.clone();
        let handle = tokio::spawn(async move {
            store.sync_from_remote(epoch).await;
        });
        let _ = self
            .inner
            .sync_task
            .lock()
            .expect("sync task lock poisoned")
            .replace(handle);
    }

    // ─── hydration and sync ──────────────────────────────────────────────

    /// Publish cached state synchronously so the UI has something to render
    /// before any network round-trip. A cached account is reused only when
    /// its email matches the session; otherwise a fresh one is fabricated.
    fn hydrate_from_cache(&self, session: &AuthSession, display_name: Option<&str>) {
        let cache = self.inner.cache.as_ref();

        let cached: Option<Account> = read_json(cache, CacheNamespace::Account);
        let account = match cached {
            Some(account) if account.email == session.email => account,
            _ => {
                let mut fresh =
                    Account::fabricated(session.account_id.clone(), &session.email, Utc::now());
                if let Some(name) = display_name {
                    fresh.display_name = name.to_string();
                    fresh.profile.name = name.to_string();
                }
                fresh
            }
        };

        let state = AppState {
            account: Some(account.clone()),
            has_onboarded: read_json(cache, CacheNamespace::OnboardingComplete).unwrap_or(false),
            workouts: read_json(cache, CacheNamespace::Workouts).unwrap_or_default(),
            active_workout: None,
            custom_exercises: read_json(cache, CacheNamespace::CustomExercises).unwrap_or_default(),
            body_weights: read_json(cache, CacheNamespace::BodyWeights).unwrap_or_default(),
            measurements: read_json(cache, CacheNamespace::Measurements).unwrap_or_default(),
            progress_photos: read_json(cache, CacheNamespace::ProgressPhotos).unwrap_or_default(),
            personal_records: read_json(cache, CacheNamespace::PersonalRecords).unwrap_or_default(),
            goals: read_json(cache, CacheNamespace::Goals).unwrap_or_default(),
            templates: read_json(cache, CacheNamespace::Templates).unwrap_or_default(),
            notification_settings: read_json(cache, CacheNamespace::NotificationSettings)
                .unwrap_or_default(),
            theme: read_json(cache, CacheNamespace::Theme).unwrap_or_default(),
        };
        self.mutate_state(|s| *s = state);
        self.persist(CacheNamespace::Account, &account);
    }

    /// Pull every category concurrently and apply non-empty results. Failed
    /// or empty categories leave the cache-hydrated state untouched.
    async fn sync_from_remote(&self, epoch: u64) {
        let Some(account_id) = self.account_id() else {
            return;
        };
        debug!("syncing remote collections for account {account_id}");
        let remote = &self.inner.backend.store;
        let uid = account_id.as_str();

        let (profile, workouts, body_weights, measurements, records, goals, templates, customs) = tokio::join!(
            remote.fetch_profile(uid),
            remote.list_workouts(uid),
            remote.list_body_weights(uid),
            remote.list_measurements(uid),
            remote.list_personal_records(uid),
            remote.list_goals(uid),
            remote.list_templates(uid),
            remote.list_custom_exercises(uid),
        );

        if !self.epoch_is_current(epoch) {
            debug!("discarding sync completions from a torn-down session");
            return;
        }

        match profile {
            Ok(Some(account)) => {
                self.persist(CacheNamespace::Account, &account);
                self.mutate_state(|s| s.account = Some(account));
            }
            Ok(None) => {}
            Err(err) => warn!("profile sync failed, keeping local profile: {err}"),
        }

        self.apply_synced(epoch, CacheNamespace::Workouts, workouts, |s, v| s.workouts = v);
        self.apply_synced(epoch, CacheNamespace::BodyWeights, body_weights, |s, v| {
            s.body_weights = v
        });
        self.apply_synced(epoch, CacheNamespace::Measurements, measurements, |s, v| {
            s.measurements = v
        });
        self.apply_synced(epoch, CacheNamespace::PersonalRecords, records, |s, v| {
            s.personal_records = v
        });
        self.apply_synced(epoch, CacheNamespace::Goals, goals, |s, v| s.goals = v);
        self.apply_synced(epoch, CacheNamespace::Templates, templates, |s, v| s.templates = v);
        self.apply_synced(epoch, CacheNamespace::CustomExercises, customs, |s, v| {
            s.custom_exercises = v
        });
    }

    fn apply_synced<T: Serialize>(
        &self,
        epoch: u64,
        namespace: CacheNamespace,
        result: BackendResult<Vec<T>>,
        assign: impl FnOnce(&mut AppState, Vec<T>),
    ) {
        if !self.epoch_is_current(epoch) {
            return;
        }
        match result {
            // Non-empty wins: an empty remote read never clobbers local data.
            Ok(items) if items.is_empty() => {}
            Ok(items) => {
                self.persist(namespace, &items);
                self.mutate_state(|s| assign(s, items));
            }
            Err(err) => warn!("{namespace} sync failed, keeping local data: {err}"),
        }
    }

    // ─── profile ─────────────────────────────────────────────────────────

    pub fn complete_onboarding(&self, update: ProfileUpdate) {
        if self.require_account().is_none() {
            return;
        }
        let account = self.apply_account_update(update);
        self.mutate_state(|s| s.has_onboarded = true);
        self.persist(CacheNamespace::OnboardingComplete, &true);
        self.push_profile(account);
    }

    pub fn update_profile(&self, update: ProfileUpdate) {
        if self.require_account().is_none() {
            return;
        }
        let account = self.apply_account_update(update);
        self.push_profile(account);
    }

    pub fn update_subscription(&self, plan: SubscriptionPlan) {
        let account = self.mutate_state(|s| {
            let account = s.account.as_mut()?;
            account.subscription = plan;
            account.updated_at = Utc::now();
            Some(account.clone())
        });
        self.push_profile(account);
    }

    fn apply_account_update(&self, update: ProfileUpdate) -> Option<Account> {
        self.mutate_state(|s| {
            let account = s.account.as_mut()?;
            account.profile.apply(&update);
            if let Some(name) = &update.name {
                account.display_name = name.clone();
            }
            account.updated_at = Utc::now();
            Some(account.clone())
        })
    }

    fn push_profile(&self, account: Option<Account>) {
        let Some(account) = account else { return };
        self.persist(CacheNamespace::Account, &account);
        let remote = Arc::clone(&self.inner.backend.store);
        self.spawn_write("profile upsert", async move {
            remote.upsert_profile(&account).await
        });
    }

    // ─── workouts ────────────────────────────────────────────────────────

    /// Start a fresh session. At most one session is active at a time; an
    /// existing active session is replaced (and thereby discarded).
    pub fn start_workout(&self, name: &str) -> Option<WorkoutSession> {
        let account_id = self.require_account()?;
        let session = WorkoutSession::started(account_id, name, Utc::now());
        self.mutate_state(|s| {
            if s.active_workout.is_some() {
                debug!("replacing an already active session");
            }
            s.active_workout = Some(session.clone());
        });
        Some(session)
    }

    /// Start a session pre-filled from a template, bumping the template's
    /// usage counters.
    pub fn start_workout_from_template(&self, template_id: &str) -> Option<WorkoutSession> {
        let account_id = self.require_account()?;
        let now = Utc::now();
        let seeded = self.mutate_state(|s| {
            let template = s.templates.iter_mut().find(|t| t.id == template_id)?;
            template.times_used += 1;
            template.last_used = Some(now);
            let template = template.clone();
            let session = template.seed_session(account_id.clone(), now);
            s.active_workout = Some(session.clone());
            Some((session, template))
        });
        let Some((session, template)) = seeded else {
            warn!("cannot start workout: unknown template {template_id}");
            return None;
        };
        let templates = self.read_state(|s| s.templates.clone());
        self.persist(CacheNamespace::Templates, &templates);
        let remote = Arc::clone(&self.inner.backend.store);
        self.spawn_write("template upsert", async move {
            remote.upsert_template(&template).await
        });
        Some(session)
    }

    /// Finalize the active session: stamp duration and estimated calories,
    /// move it to the front of the historical collection, and fold its
    /// completed sets into the personal records.
    pub fn finish_workout(&self, workout_id: &str) -> Option<WorkoutSession> {
        let now = Utc::now();
        let finished = self.mutate_state(|s| {
            if s.active_workout.as_ref().map(|w| w.id.as_str()) != Some(workout_id) {
                return None;
            }
            let mut session = s.active_workout.take()?;
            let duration = (now - session.start_time).num_seconds().max(0);
            session.end_time = Some(now);
            session.duration = Some(duration);
            session.calories_estimate = Some(estimate_session_calories(
                duration,
                session.exercises.len(),
                session.total_sets(),
            ));
            session.is_completed = true;
            s.workouts.insert(0, session.clone());
            let improved = absorb_session(&mut s.personal_records, &session);
            Some((session, improved))
        });
        let (session, improved) = finished?;

        let workouts = self.read_state(|s| s.workouts.clone());
        self.persist(CacheNamespace::Workouts, &workouts);
        if !improved.is_empty() {
            let records = self.read_state(|s| s.personal_records.clone());
            self.persist(CacheNamespace::PersonalRecords, &records);
        }

        let remote = Arc::clone(&self.inner.backend.store);
        let finished_session = session.clone();
        self.spawn_write("workout upsert", async move {
            remote.upsert_workout(&finished_session).await
        });
        for record in improved {
            let remote = Arc::clone(&self.inner.backend.store);
            self.spawn_write("personal record upsert", async move {
                remote.upsert_personal_record(&record).await
            });
        }
        Some(session)
    }

    /// Drop the active session without persisting anything.
    pub fn cancel_workout(&self) {
        self.mutate_state(|s| s.active_workout = None);
    }

    fn with_active<R>(&self, workout_id: &str, f: impl FnOnce(&mut WorkoutSession) -> R) -> Option<R> {
        self.mutate_state(|s| {
            let active = s.active_workout.as_mut()?;
            if active.id != workout_id {
                return None;
            }
            Some(f(active))
        })
    }

    pub fn add_exercise_to_workout(&self, workout_id: &str, entry: &ExerciseCatalogEntry) -> bool {
        self.with_active(workout_id, |session| {
            let position = session.exercises.len() as u32;
            session.exercises.push(ExerciseEntry::from_catalog(entry, position));
        })
        .is_some()
    }

    pub fn remove_exercise_from_workout(&self, workout_id: &str, exercise_entry_id: &str) -> bool {
        self.with_active(workout_id, |session| session.remove_exercise(exercise_entry_id))
            .unwrap_or(false)
    }

    pub fn add_set_to_exercise(&self, workout_id: &str, exercise_entry_id: &str) -> bool {
        self.with_active(workout_id, |session| {
            session.exercise_mut(exercise_entry_id).map(|e| e.add_set()).is_some()
        })
        .unwrap_or(false)
    }

    pub fn remove_set_from_exercise(
        &self,
        workout_id: &str,
        exercise_entry_id: &str,
        set_id: &str,
    ) -> bool {
        self.with_active(workout_id, |session| {
            session
                .exercise_mut(exercise_entry_id)
                .map(|e| e.remove_set(set_id))
                .unwrap_or(false)
        })
        .unwrap_or(false)
    }

    pub fn update_set(
        &self,
        workout_id: &str,
        exercise_entry_id: &str,
        set_id: &str,
        patch: &SetPatch,
    ) -> bool {
        self.with_active(workout_id, |session| {
            let Some(exercise) = session.exercise_mut(exercise_entry_id) else {
                return false;
            };
            match exercise.sets.iter_mut().find(|s| s.id == set_id) {
                Some(set) => {
                    set.apply(patch);
                    true
                }
                None => false,
            }
        })
        .unwrap_or(false)
    }

    pub fn update_workout_notes(&self, workout_id: &str, notes: &str) -> bool {
        self.with_active(workout_id, |session| {
            session.notes = Some(notes.to_string());
        })
        .is_some()
    }

    /// Delete a finalized session by id.
    pub fn delete_workout(&self, workout_id: &str) {
        let removed = self.mutate_state(|s| {
            let before = s.workouts.len();
            s.workouts.retain(|w| w.id != workout_id);
            s.workouts.len() != before
        });
        if !removed {
            return;
        }
        let workouts = self.read_state(|s| s.workouts.clone());
        self.persist(CacheNamespace::Workouts, &workouts);
        let remote = Arc::clone(&self.inner.backend.store);
        let id = workout_id.to_string();
        self.spawn_write("workout delete", async move { remote.delete_workout(&id).await });
    }

    // ─── exercise catalog ────────────────────────────────────────────────

    pub fn add_custom_exercise(&self, input: NewCustomExercise) -> Option<ExerciseCatalogEntry> {
        let account_id = self.require_account()?;
        let entry = ExerciseCatalogEntry::custom(input);
        self.mutate_state(|s| s.custom_exercises.push(entry.clone()));
        let customs = self.read_state(|s| s.custom_exercises.clone());
        self.persist(CacheNamespace::CustomExercises, &customs);

        let remote = Arc::clone(&self.inner.backend.store);
        let entry_for_write = entry.clone();
        self.spawn_write("custom exercise upsert", async move {
            remote.upsert_custom_exercise(&account_id, &entry_for_write).await
        });
        Some(entry)
    }

    // ─── body data ───────────────────────────────────────────────────────

    /// Log a body weight. Also keeps the denormalized profile weight in sync.
    pub fn add_body_weight(&self, weight: f64, notes: Option<String>) -> Option<BodyWeightEntry> {
        let account_id = self.require_account()?;
        let now = Utc::now();
        let entry = BodyWeightEntry::logged(account_id, weight, notes, now);
        let account = self.mutate_state(|s| {
            s.body_weights.insert(0, entry.clone());
            let account = s.account.as_mut()?;
            account.profile.weight = Some(weight);
            account.updated_at = now;
            Some(account.clone())
        });
        let weights = self.read_state(|s| s.body_weights.clone());
        self.persist(CacheNamespace::BodyWeights, &weights);

        let remote = Arc::clone(&self.inner.backend.store);
        let entry_for_write = entry.clone();
        self.spawn_write("body weight upsert", async move {
            remote.upsert_body_weight(&entry_for_write).await
        });
        self.push_profile(account);
        Some(entry)
    }

    pub fn delete_body_weight(&self, entry_id: &str) {
        let removed = self.mutate_state(|s| {
            let before = s.body_weights.len();
            s.body_weights.retain(|e| e.id != entry_id);
            s.body_weights.len() != before
        });
        if !removed {
            return;
        }
        let weights = self.read_state(|s| s.body_weights.clone());
        self.persist(CacheNamespace::BodyWeights, &weights);
        let remote = Arc::clone(&self.inner.backend.store);
        let id = entry_id.to_string();
        self.spawn_write("body weight delete", async move {
            remote.delete_body_weight(&id).await
        });
    }

    pub fn add_measurement(&self, input: NewMeasurement) -> Option<BodyMeasurement> {
        let account_id = self.require_account()?;
        let entry = BodyMeasurement::logged(account_id, input, Utc::now());
        self.mutate_state(|s| s.measurements.insert(0, entry.clone()));
        let measurements = self.read_state(|s| s.measurements.clone());
        self.persist(CacheNamespace::Measurements, &measurements);

        let remote = Arc::clone(&self.inner.backend.store);
        let entry_for_write = entry.clone();
        self.spawn_write("measurement upsert", async move {
            remote.upsert_measurement(&entry_for_write).await
        });
        Some(entry)
    }

    pub fn delete_measurement(&self, entry_id: &str) {
        let removed = self.mutate_state(|s| {
            let before = s.measurements.len();
            s.measurements.retain(|e| e.id != entry_id);
            s.measurements.len() != before
        });
        if !removed {
            return;
        }
        let measurements = self.read_state(|s| s.measurements.clone());
        self.persist(CacheNamespace::Measurements, &measurements);
        let remote = Arc::clone(&self.inner.backend.store);
        let id = entry_id.to_string();
        self.spawn_write("measurement delete", async move {
            remote.delete_measurement(&id).await
        });
    }

    /// Upload a photo blob and record the resulting URI. This is the one
    /// mutation that waits on the network: the record cannot exist without
    /// the URI the storage adapter returns.
    pub async fn add_progress_photo(
        &self,
        image: Vec<u8>,
        category: PhotoCategory,
        notes: Option<String>,
    ) -> Option<ProgressPhoto> {
        let account_id = self.require_account()?;
        let photo_id = Uuid::new_v4().to_string();
        let uri = match self
            .inner
            .backend
            .blobs
            .upload_photo(&account_id, image, &photo_id)
            .await
        {
            Ok(uri) => uri,
            Err(err) => {
                warn!("progress photo upload failed: {err}");
                return None;
            }
        };
        let photo = ProgressPhoto {
            id: photo_id,
            account_id,
            uri,
            date: Utc::now(),
            category,
            notes,
        };
        self.mutate_state(|s| s.progress_photos.insert(0, photo.clone()));
        let photos = self.read_state(|s| s.progress_photos.clone());
        self.persist(CacheNamespace::ProgressPhotos, &photos);
        Some(photo)
    }

    pub fn delete_progress_photo(&self, photo_id: &str) {
        let removed = self.mutate_state(|s| {
            let index = s.progress_photos.iter().position(|p| p.id == photo_id)?;
            Some(s.progress_photos.remove(index))
        });
        let Some(photo) = removed else { return };
        let photos = self.read_state(|s| s.progress_photos.clone());
        self.persist(CacheNamespace::ProgressPhotos, &photos);

        // Blob deletion is best-effort; a dangling object is acceptable.
        let blobs = Arc::clone(&self.inner.backend.blobs);
        self.spawn_write("progress photo delete", async move {
            blobs.delete_photo(&photo.account_id, &photo.id).await
        });
    }

    // ─── goals ───────────────────────────────────────────────────────────

    pub fn add_goal(&self, input: NewGoal) -> Option<Goal> {
        let account_id = self.require_account()?;
        let goal = Goal::created(account_id, input, Utc::now());
        self.mutate_state(|s| s.goals.insert(0, goal.clone()));
        let goals = self.read_state(|s| s.goals.clone());
        self.persist(CacheNamespace::Goals, &goals);

        let remote = Arc::clone(&self.inner.backend.store);
        let goal_for_write = goal.clone();
        self.spawn_write("goal upsert", async move {
            remote.upsert_goal(&goal_for_write).await
        });
        Some(goal)
    }

    pub fn update_goal(&self, goal_id: &str, patch: &GoalPatch) -> Option<Goal> {
        let updated = self.mutate_state(|s| {
            let goal = s.goals.iter_mut().find(|g| g.id == goal_id)?;
            goal.apply(patch);
            Some(goal.clone())
        })?;
        let goals = self.read_state(|s| s.goals.clone());
        self.persist(CacheNamespace::Goals, &goals);

        let remote = Arc::clone(&self.inner.backend.store);
        let goal_for_write = updated.clone();
        self.spawn_write("goal upsert", async move {
            remote.upsert_goal(&goal_for_write).await
        });
        Some(updated)
    }

    pub fn delete_goal(&self, goal_id: &str) {
        let removed = self.mutate_state(|s| {
            let before = s.goals.len();
            s.goals.retain(|g| g.id != goal_id);
            s.goals.len() != before
        });
        if !removed {
            return;
        }
        let goals = self.read_state(|s| s.goals.clone());
        self.persist(CacheNamespace::Goals, &goals);
        let remote = Arc::clone(&self.inner.backend.store);
        let id = goal_id.to_string();
        self.spawn_write("goal delete", async move { remote.delete_goal(&id).await });
    }

    // ─── templates ───────────────────────────────────────────────────────

    pub fn save_template(&self, input: NewWorkoutTemplate) -> Option<WorkoutTemplate> {
        let account_id = self.require_account()?;
        let template = WorkoutTemplate::created(account_id, input, Utc::now());
        self.mutate_state(|s| s.templates.insert(0, template.clone()));
        let templates = self.read_state(|s| s.templates.clone());
        self.persist(CacheNamespace::Templates, &templates);

        let remote = Arc::clone(&self.inner.backend.store);
        let template_for_write = template.clone();
        self.spawn_write("template upsert", async move {
            remote.upsert_template(&template_for_write).await
        });
        Some(template)
    }

    pub fn delete_template(&self, template_id: &str) {
        let removed = self.mutate_state(|s| {
            let before = s.templates.len();
            s.templates.retain(|t| t.id != template_id);
            s.templates.len() != before
        });
        if !removed {
            return;
        }
        let templates = self.read_state(|s| s.templates.clone());
        self.persist(CacheNamespace::Templates, &templates);
        let remote = Arc::clone(&self.inner.backend.store);
        let id = template_id.to_string();
        self.spawn_write("template delete", async move { remote.delete_template(&id).await });
    }

    // ─── preferences ─────────────────────────────────────────────────────

    /// Notification settings are kept locally only; reminders are scheduled
    /// on-device.
    pub fn update_notification_settings(&self, settings: NotificationSettings) {
        self.mutate_state(|s| s.notification_settings = settings.clone());
        self.persist(CacheNamespace::NotificationSettings, &settings);
    }

    pub fn set_theme(&self, theme: ThemePreference) {
        self.mutate_state(|s| s.theme = theme);
        self.persist(CacheNamespace::Theme, &theme);
    }
}
