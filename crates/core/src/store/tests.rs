use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Semaphore;

use crate::accounts::Account;
use crate::auth::{
    AuthEvent, AuthError, AuthEventBus, AuthSession, AuthSubscription, OAuthProvider, SignUpOutcome,
};
use crate::backend::{
    AuthServiceTrait, Backend, BackendError, BackendResult, BlobStoreTrait, RemoteStoreTrait,
};
use crate::body::{BodyMeasurement, BodyWeightEntry, PhotoCategory};
use crate::cache::{CacheNamespace, CacheResult, CacheStoreTrait};
use crate::exercises::{builtin_catalog, ExerciseCatalogEntry};
use crate::goals::{Goal, NewGoal};
use crate::records::PersonalRecord;
use crate::store::{AppState, AppStore, SignUpStatus};
use crate::templates::WorkoutTemplate;
use crate::workouts::{SetPatch, WorkoutSession};

// ─── test doubles ────────────────────────────────────────────────────────

#[derive(Default)]
struct MemoryCache {
    entries: Mutex<HashMap<&'static str, String>>,
}

impl CacheStoreTrait for MemoryCache {
    fn get(&self, namespace: CacheNamespace) -> CacheResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(namespace.key()).cloned())
    }

    fn set(&self, namespace: CacheNamespace, payload: &str) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(namespace.key(), payload.to_string());
        Ok(())
    }

    fn remove(&self, namespaces: &[CacheNamespace]) -> CacheResult<()> {
        let mut entries = self.entries.lock().unwrap();
        for namespace in namespaces {
            entries.remove(namespace.key());
        }
        Ok(())
    }
}

impl MemoryCache {
    fn seed<T: serde::Serialize>(&self, namespace: CacheNamespace, value: &T) {
        self.set(namespace, &serde_json::to_string(value).unwrap())
            .unwrap();
    }

    fn read<T: serde::de::DeserializeOwned>(&self, namespace: CacheNamespace) -> Option<T> {
        self.get(namespace)
            .unwrap()
            .map(|payload| serde_json::from_str(&payload).unwrap())
    }
}

struct MockAuth {
    bus: Arc<AuthEventBus>,
    session: Mutex<Option<AuthSession>>,
    confirmation_required: bool,
}

impl MockAuth {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            bus: AuthEventBus::new(),
            session: Mutex::new(None),
            confirmation_required: false,
        })
    }

    fn with_confirmation_required() -> Arc<Self> {
        Arc::new(Self {
            bus: AuthEventBus::new(),
            session: Mutex::new(None),
            confirmation_required: true,
        })
    }

    fn session_for(email: &str) -> AuthSession {
        AuthSession {
            account_id: "acct-1".to_string(),
            email: email.to_string(),
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
        }
    }

    fn install(&self, session: &AuthSession) {
        *self.session.lock().unwrap() = Some(session.clone());
        self.bus.emit(&AuthEvent::SignedIn(session.clone()));
    }
}

#[async_trait]
impl AuthServiceTrait for MockAuth {
    async fn sign_in_with_password(&self, email: &str, _password: &str) -> BackendResult<AuthSession> {
        let session = Self::session_for(email);
        self.install(&session);
        Ok(session)
    }

    async fn sign_up_with_password(
        &self,
        email: &str,
        _password: &str,
        _display_name: &str,
    ) -> BackendResult<SignUpOutcome> {
        if self.confirmation_required {
            return Ok(SignUpOutcome {
                session: None,
                needs_confirmation: true,
            });
        }
        let session = Self::session_for(email);
        self.install(&session);
        Ok(SignUpOutcome {
            session: Some(session),
            needs_confirmation: false,
        })
    }

    async fn sign_in_with_oauth(&self, _provider: OAuthProvider) -> BackendResult<String> {
        Ok("https://auth.example/authorize?provider=google".to_string())
    }

    async fn set_session(&self, access_token: &str, refresh_token: &str) -> BackendResult<AuthSession> {
        let session = AuthSession {
            account_id: "acct-1".to_string(),
            email: "lee@example.com".to_string(),
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
        };
        self.install(&session);
        Ok(session)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        *self.session.lock().unwrap() = None;
        self.bus.emit(&AuthEvent::SignedOut);
        Ok(())
    }

    async fn send_password_reset(&self, _email: &str) -> BackendResult<()> {
        Ok(())
    }

    async fn resend_confirmation(&self, _email: &str) -> BackendResult<()> {
        Ok(())
    }

    fn current_session(&self) -> Option<AuthSession> {
        self.session.lock().unwrap().clone()
    }

    fn subscribe(&self, listener: Box<dyn Fn(&AuthEvent) + Send + Sync>) -> AuthSubscription {
        self.bus.subscribe(listener)
    }
}

#[derive(Default)]
struct RemoteData {
    profile: Option<Account>,
    workouts: Vec<WorkoutSession>,
    body_weights: Vec<BodyWeightEntry>,
    measurements: Vec<BodyMeasurement>,
    records: Vec<PersonalRecord>,
    goals: Vec<Goal>,
    templates: Vec<WorkoutTemplate>,
    custom_exercises: Vec<ExerciseCatalogEntry>,
}

struct MockRemote {
    data: Mutex<RemoteData>,
    failing: Mutex<HashSet<&'static str>>,
    gate: Semaphore,
    calls: Mutex<Vec<String>>,
}

impl MockRemote {
    fn open(data: RemoteData) -> Arc<Self> {
        Arc::new(Self {
            data: Mutex::new(data),
            failing: Mutex::new(HashSet::new()),
            gate: Semaphore::new(1024),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Remote whose calls block until [`MockRemote::release`].
    fn gated(data: RemoteData) -> Arc<Self> {
        Arc::new(Self {
            data: Mutex::new(data),
            failing: Mutex::new(HashSet::new()),
            gate: Semaphore::new(0),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn release(&self) {
        self.gate.add_permits(1024);
    }

    fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, name: &'static str) -> BackendResult<()> {
        self.calls.lock().unwrap().push(name.to_string());
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| BackendError::transport("gate closed"))?;
        permit.forget();
        if self.failing.lock().unwrap().contains(name) {
            return Err(BackendError::transport("scripted failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStoreTrait for MockRemote {
    async fn fetch_profile(&self, _account_id: &str) -> BackendResult<Option<Account>> {
        self.enter("fetch_profile").await?;
        Ok(self.data.lock().unwrap().profile.clone())
    }

    async fn upsert_profile(&self, _account: &Account) -> BackendResult<()> {
        self.enter("upsert_profile").await
    }

    async fn list_workouts(&self, _account_id: &str) -> BackendResult<Vec<WorkoutSession>> {
        self.enter("list_workouts").await?;
        Ok(self.data.lock().unwrap().workouts.clone())
    }

    async fn upsert_workout(&self, _workout: &WorkoutSession) -> BackendResult<()> {
        self.enter("upsert_workout").await
    }

    async fn delete_workout(&self, _workout_id: &str) -> BackendResult<()> {
        self.enter("delete_workout").await
    }

    async fn list_body_weights(&self, _account_id: &str) -> BackendResult<Vec<BodyWeightEntry>> {
        self.enter("list_body_weights").await?;
        Ok(self.data.lock().unwrap().body_weights.clone())
    }

    async fn upsert_body_weight(&self, _entry: &BodyWeightEntry) -> BackendResult<()> {
        self.enter("upsert_body_weight").await
    }

    async fn delete_body_weight(&self, _entry_id: &str) -> BackendResult<()> {
        self.enter("delete_body_weight").await
    }

    async fn list_measurements(&self, _account_id: &str) -> BackendResult<Vec<BodyMeasurement>> {
        self.enter("list_measurements").await?;
        Ok(self.data.lock().unwrap().measurements.clone())
    }

    async fn upsert_measurement(&self, _entry: &BodyMeasurement) -> BackendResult<()> {
        self.enter("upsert_measurement").await
    }

    async fn delete_measurement(&self, _entry_id: &str) -> BackendResult<()> {
        self.enter("delete_measurement").await
    }

    async fn list_personal_records(&self, _account_id: &str) -> BackendResult<Vec<PersonalRecord>> {
        self.enter("list_personal_records").await?;
        Ok(self.data.lock().unwrap().records.clone())
    }

    async fn upsert_personal_record(&self, _record: &PersonalRecord) -> BackendResult<()> {
        self.enter("upsert_personal_record").await
    }

    async fn list_goals(&self, _account_id: &str) -> BackendResult<Vec<Goal>> {
        self.enter("list_goals").await?;
        Ok(self.data.lock().unwrap().goals.clone())
    }

    async fn upsert_goal(&self, _goal: &Goal) -> BackendResult<()> {
        self.enter("upsert_goal").await
    }

    async fn delete_goal(&self, _goal_id: &str) -> BackendResult<()> {
        self.enter("delete_goal").await
    }

    async fn list_templates(&self, _account_id: &str) -> BackendResult<Vec<WorkoutTemplate>> {
        self.enter("list_templates").await?;
        Ok(self.data.lock().unwrap().templates.clone())
    }

    async fn upsert_template(&self, _template: &WorkoutTemplate) -> BackendResult<()> {
        self.enter("upsert_template").await
    }

    async fn delete_template(&self, _template_id: &str) -> BackendResult<()> {
        self.enter("delete_template").await
    }

    async fn list_custom_exercises(&self, _account_id: &str) -> BackendResult<Vec<ExerciseCatalogEntry>> {
        self.enter("list_custom_exercises").await?;
        Ok(self.data.lock().unwrap().custom_exercises.clone())
    }

    async fn upsert_custom_exercise(
        &self,
        _account_id: &str,
        _entry: &ExerciseCatalogEntry,
    ) -> BackendResult<()> {
        self.enter("upsert_custom_exercise").await
    }
}

#[derive(Default)]
struct MockBlobs {
    uploads: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
    fail_uploads: AtomicBool,
}

#[async_trait]
impl BlobStoreTrait for MockBlobs {
    async fn upload_photo(&self, account_id: &str, _bytes: Vec<u8>, photo_id: &str) -> BackendResult<String> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(BackendError::api(503, "storage unavailable"));
        }
        let uri = format!("blob://{account_id}/{photo_id}.jpg");
        self.uploads.lock().unwrap().push(uri.clone());
        Ok(uri)
    }

    async fn delete_photo(&self, account_id: &str, photo_id: &str) -> BackendResult<()> {
        self.deletes
            .lock()
            .unwrap()
            .push(format!("{account_id}/{photo_id}.jpg"));
        Ok(())
    }
}

struct Harness {
    cache: Arc<MemoryCache>,
    remote: Arc<MockRemote>,
    blobs: Arc<MockBlobs>,
    store: AppStore,
}

fn harness_with(remote: Arc<MockRemote>) -> Harness {
    let cache = Arc::new(MemoryCache::default());
    harness_from(cache, remote, MockAuth::new())
}

fn harness_from(cache: Arc<MemoryCache>, remote: Arc<MockRemote>, auth: Arc<MockAuth>) -> Harness {
    let blobs = Arc::new(MockBlobs::default());
    let backend = Backend {
        auth,
        store: remote.clone(),
        blobs: blobs.clone(),
    };
    let store = AppStore::new(cache.clone(), backend);
    Harness {
        cache,
        remote,
        blobs,
        store,
    }
}

fn cached_session(name: &str) -> WorkoutSession {
    let mut session = WorkoutSession::started("acct-1", name, Utc::now());
    session.is_completed = true;
    session.duration = Some(1800);
    session
}

fn cached_goal(title: &str) -> Goal {
    Goal::created(
        "acct-1",
        NewGoal {
            goal_type: crate::accounts::FitnessGoal::MuscleGain,
            title: title.to_string(),
            description: None,
            target_value: None,
            current_value: None,
            unit: None,
            deadline: None,
        },
        Utc::now(),
    )
}

fn catalog_bench_press() -> ExerciseCatalogEntry {
    builtin_catalog()
        .into_iter()
        .find(|e| e.name == "Bench Press")
        .unwrap()
}

// ─── hydration and sync ──────────────────────────────────────────────────

#[tokio::test]
async fn cached_state_is_published_before_remote_results() {
    let cache = Arc::new(MemoryCache::default());
    cache.seed(
        CacheNamespace::Account,
        &Account::fabricated("acct-1", "lee@example.com", Utc::now()),
    );
    cache.seed(CacheNamespace::Workouts, &vec![cached_session("Cached Session")]);

    let mut remote_profile = Account::fabricated("acct-1", "lee@example.com", Utc::now());
    remote_profile.display_name = "Remote Lee".to_string();
    let remote = MockRemote::gated(RemoteData {
        profile: Some(remote_profile),
        workouts: vec![cached_session("Remote Session")],
        ..Default::default()
    });
    let h = harness_from(cache, remote, MockAuth::new());

    h.store.sign_in("lee@example.com", "password1").await.unwrap();

    // Remote calls are still blocked: the cached value must be visible now.
    assert_eq!(h.store.workouts()[0].name, "Cached Session");
    assert_eq!(h.store.account().unwrap().display_name, "lee");

    h.remote.release();
    h.store.wait_for_sync().await;

    assert_eq!(h.store.workouts()[0].name, "Remote Session");
    assert_eq!(h.store.account().unwrap().display_name, "Remote Lee");
    let cached: Vec<WorkoutSession> = h.cache.read(CacheNamespace::Workouts).unwrap();
    assert_eq!(cached[0].name, "Remote Session");
}

#[tokio::test]
async fn empty_remote_collections_leave_hydrated_state_untouched() {
    let cache = Arc::new(MemoryCache::default());
    cache.seed(
        CacheNamespace::Account,
        &Account::fabricated("acct-1", "lee@example.com", Utc::now()),
    );
    cache.seed(CacheNamespace::Workouts, &vec![cached_session("Cached Session")]);
    cache.seed(CacheNamespace::Goals, &vec![cached_goal("Cached Goal")]);

    let h = harness_from(cache, MockRemote::open(RemoteData::default()), MockAuth::new());
    h.store.sign_in("lee@example.com", "password1").await.unwrap();
    h.store.wait_for_sync().await;

    assert_eq!(h.store.workouts()[0].name, "Cached Session");
    assert_eq!(h.store.goals()[0].title, "Cached Goal");
    let cached: Vec<WorkoutSession> = h.cache.read(CacheNamespace::Workouts).unwrap();
    assert_eq!(cached[0].name, "Cached Session");
}

#[tokio::test]
async fn each_category_fails_independently() {
    let cache = Arc::new(MemoryCache::default());
    cache.seed(
        CacheNamespace::Account,
        &Account::fabricated("acct-1", "lee@example.com", Utc::now()),
    );
    cache.seed(CacheNamespace::Goals, &vec![cached_goal("Cached Goal")]);

    let remote = MockRemote::open(RemoteData {
        workouts: vec![cached_session("Remote Session")],
        goals: vec![cached_goal("Remote Goal")],
        ..Default::default()
    });
    remote.fail("list_goals");

    let h = harness_from(cache, remote, MockAuth::new());
    h.store.sign_in("lee@example.com", "password1").await.unwrap();
    h.store.wait_for_sync().await;

    // Workouts synced; the failed goals category kept its last-known-good value.
    assert_eq!(h.store.workouts()[0].name, "Remote Session");
    assert_eq!(h.store.goals()[0].title, "Cached Goal");
}

#[tokio::test]
async fn stale_sync_completions_are_ignored_after_sign_out() {
    let remote = MockRemote::gated(RemoteData {
        workouts: vec![cached_session("Remote Session")],
        ..Default::default()
    });
    let h = harness_with(remote);

    h.store.sign_in("lee@example.com", "password1").await.unwrap();
    h.store.sign_out().await;
    h.remote.release();
    h.store.wait_for_sync().await;

    assert_eq!(h.store.state(), AppState::default());
    assert!(h.cache.get(CacheNamespace::Workouts).unwrap().is_none());
}

#[tokio::test]
async fn sign_out_clears_every_namespace_and_resets_state() {
    let h = harness_with(MockRemote::open(RemoteData::default()));
    h.store.sign_in("lee@example.com", "password1").await.unwrap();
    h.store.wait_for_sync().await;

    let _ = h.store.add_goal(NewGoal {
        goal_type: crate::accounts::FitnessGoal::MuscleGain,
        title: "Goal".to_string(),
        description: None,
        target_value: None,
        current_value: None,
        unit: None,
        deadline: None,
    });
    let _ = h.store.add_body_weight(82.0, None);
    h.store.update_notification_settings(Default::default());
    h.store.set_theme(crate::settings::ThemePreference::Dark);
    h.store.flush_pending_writes().await;

    h.store.sign_out().await;

    for namespace in CacheNamespace::ALL {
        assert!(
            h.cache.get(namespace).unwrap().is_none(),
            "namespace {namespace} should be cleared"
        );
    }
    assert_eq!(h.store.state(), AppState::default());
    assert!(!h.store.is_authenticated());
}

// ─── mutations ───────────────────────────────────────────────────────────

#[tokio::test]
async fn finish_workout_stamps_completion_fields_and_records() {
    let h = harness_with(MockRemote::open(RemoteData::default()));
    h.store.sign_in("lee@example.com", "password1").await.unwrap();
    h.store.wait_for_sync().await;

    let session = h.store.start_workout("Push Day").unwrap();
    assert!(h.store.workouts().is_empty());

    let bench = catalog_bench_press();
    assert!(h.store.add_exercise_to_workout(&session.id, &bench));
    let active = h.store.active_workout().unwrap();
    let exercise_id = active.exercises[0].id.clone();
    let set_id = active.exercises[0].sets[0].id.clone();
    assert!(h.store.update_set(
        &session.id,
        &exercise_id,
        &set_id,
        &SetPatch {
            weight: Some(100.0),
            reps: Some(5),
            is_completed: Some(true),
            ..Default::default()
        },
    ));

    let finished = h.store.finish_workout(&session.id).unwrap();
    assert!(finished.is_completed);
    assert!(finished.duration.is_some());
    assert!(finished.calories_estimate.is_some());
    assert!(finished.end_time.is_some());
    assert!(h.store.active_workout().is_none());
    assert_eq!(h.store.workouts()[0].id, finished.id);

    let records = h.store.personal_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].exercise_id, bench.id);

    h.store.flush_pending_writes().await;
    let calls = h.remote.calls();
    assert!(calls.iter().any(|c| c == "upsert_workout"));
    assert!(calls.iter().any(|c| c == "upsert_personal_record"));

    let cached: Vec<WorkoutSession> = h.cache.read(CacheNamespace::Workouts).unwrap();
    assert_eq!(cached[0].id, finished.id);
}

#[tokio::test]
async fn cancel_workout_discards_without_persisting() {
    let h = harness_with(MockRemote::open(RemoteData::default()));
    h.store.sign_in("lee@example.com", "password1").await.unwrap();
    h.store.wait_for_sync().await;

    h.store.start_workout("Abandoned").unwrap();
    h.store.cancel_workout();
    assert!(h.store.active_workout().is_none());
    assert!(h.store.workouts().is_empty());
    assert!(h.cache.get(CacheNamespace::Workouts).unwrap().is_none());
}

#[tokio::test]
async fn set_removal_renumbers_through_the_store() {
    let h = harness_with(MockRemote::open(RemoteData::default()));
    h.store.sign_in("lee@example.com", "password1").await.unwrap();
    h.store.wait_for_sync().await;

    let session = h.store.start_workout("Legs").unwrap();
    let squat = builtin_catalog().into_iter().find(|e| e.name == "Squat").unwrap();
    h.store.add_exercise_to_workout(&session.id, &squat);
    let exercise_id = h.store.active_workout().unwrap().exercises[0].id.clone();
    for _ in 0..3 {
        h.store.add_set_to_exercise(&session.id, &exercise_id);
    }

    let sets = h.store.active_workout().unwrap().exercises[0].sets.clone();
    assert_eq!(sets.len(), 4);
    assert!(h.store.remove_set_from_exercise(&session.id, &exercise_id, &sets[1].id));

    let after = h.store.active_workout().unwrap().exercises[0].sets.clone();
    let numbers: Vec<u32> = after.iter().map(|s| s.set_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    let ids: Vec<&str> = after.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![sets[0].id.as_str(), sets[2].id.as_str(), sets[3].id.as_str()]);
}

#[tokio::test]
async fn mutations_persist_to_the_cache_synchronously() {
    let h = harness_with(MockRemote::open(RemoteData::default()));
    h.store.sign_in("lee@example.com", "password1").await.unwrap();
    h.store.wait_for_sync().await;

    let goal = h
        .store
        .add_goal(NewGoal {
            goal_type: crate::accounts::FitnessGoal::WeightLoss,
            title: "Cut to 80kg".to_string(),
            description: None,
            target_value: Some(80.0),
            current_value: Some(86.0),
            unit: Some("kg".to_string()),
            deadline: None,
        })
        .unwrap();

    let cached: Vec<Goal> = h.cache.read(CacheNamespace::Goals).unwrap();
    assert_eq!(cached[0].id, goal.id);

    h.store.delete_goal(&goal.id);
    let cached: Vec<Goal> = h.cache.read(CacheNamespace::Goals).unwrap();
    assert!(cached.is_empty());

    h.store.flush_pending_writes().await;
    let calls = h.remote.calls();
    assert!(calls.iter().any(|c| c == "upsert_goal"));
    assert!(calls.iter().any(|c| c == "delete_goal"));
}

#[tokio::test]
async fn body_weight_denormalizes_into_the_profile() {
    let h = harness_with(MockRemote::open(RemoteData::default()));
    h.store.sign_in("lee@example.com", "password1").await.unwrap();
    h.store.wait_for_sync().await;

    h.store.add_body_weight(82.5, Some("morning".to_string())).unwrap();
    assert_eq!(h.store.account().unwrap().profile.weight, Some(82.5));

    let cached: Account = h.cache.read(CacheNamespace::Account).unwrap();
    assert_eq!(cached.profile.weight, Some(82.5));

    h.store.flush_pending_writes().await;
    let calls = h.remote.calls();
    assert!(calls.iter().any(|c| c == "upsert_body_weight"));
    assert!(calls.iter().any(|c| c == "upsert_profile"));
}

#[tokio::test]
async fn progress_photo_uploads_before_the_record_exists() {
    let h = harness_with(MockRemote::open(RemoteData::default()));
    h.store.sign_in("lee@example.com", "password1").await.unwrap();
    h.store.wait_for_sync().await;

    let photo = h
        .store
        .add_progress_photo(vec![0xFF, 0xD8], PhotoCategory::Front, None)
        .await
        .unwrap();
    assert!(photo.uri.starts_with("blob://acct-1/"));
    assert_eq!(h.store.progress_photos().len(), 1);

    h.store.delete_progress_photo(&photo.id);
    assert!(h.store.progress_photos().is_empty());
    h.store.flush_pending_writes().await;
    assert_eq!(h.blobs.deletes.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn failed_photo_upload_creates_no_record() {
    let h = harness_with(MockRemote::open(RemoteData::default()));
    h.store.sign_in("lee@example.com", "password1").await.unwrap();
    h.store.wait_for_sync().await;

    h.blobs.fail_uploads.store(true, Ordering::SeqCst);
    let photo = h
        .store
        .add_progress_photo(vec![0xFF], PhotoCategory::Side, None)
        .await;
    assert!(photo.is_none());
    assert!(h.store.progress_photos().is_empty());
}

#[tokio::test]
async fn template_start_bumps_usage_and_seeds_the_session() {
    let h = harness_with(MockRemote::open(RemoteData::default()));
    h.store.sign_in("lee@example.com", "password1").await.unwrap();
    h.store.wait_for_sync().await;

    let bench = catalog_bench_press();
    let template = h
        .store
        .save_template(crate::templates::NewWorkoutTemplate {
            name: "Push Day".to_string(),
            exercises: vec![crate::templates::TemplateExercise {
                exercise_id: bench.id.clone(),
                exercise_name: bench.name.clone(),
                muscle_group: bench.muscle_group,
                target_sets: 3,
                target_reps: 8,
                rest_timer_seconds: 120,
                position: 0,
            }],
        })
        .unwrap();

    let session = h.store.start_workout_from_template(&template.id).unwrap();
    assert_eq!(session.exercises.len(), 1);
    assert_eq!(session.exercises[0].sets.len(), 3);

    let stored = h.store.templates().into_iter().find(|t| t.id == template.id).unwrap();
    assert_eq!(stored.times_used, 1);
    assert!(stored.last_used.is_some());
}

#[tokio::test]
async fn mutations_without_a_session_are_rejected() {
    let h = harness_with(MockRemote::open(RemoteData::default()));
    assert!(h.store.start_workout("Push").is_none());
    assert!(h.store.add_body_weight(80.0, None).is_none());
    assert!(h
        .store
        .add_goal(NewGoal {
            goal_type: crate::accounts::FitnessGoal::Custom,
            title: "Nope".to_string(),
            description: None,
            target_value: None,
            current_value: None,
            unit: None,
            deadline: None,
        })
        .is_none());
}

// ─── auth flows ──────────────────────────────────────────────────────────

#[tokio::test]
async fn sign_in_validates_before_any_io() {
    let h = harness_with(MockRemote::open(RemoteData::default()));
    let err = h.store.sign_in("not-an-email", "password1").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
    let err = h.store.sign_in("lee@example.com", "short").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
    assert!(h.remote.calls().is_empty());
}

#[tokio::test]
async fn sign_up_reports_pending_confirmation_without_a_session() {
    let cache = Arc::new(MemoryCache::default());
    let h = harness_from(
        cache,
        MockRemote::open(RemoteData::default()),
        MockAuth::with_confirmation_required(),
    );
    let status = h
        .store
        .sign_up("lee@example.com", "password1", "Lee")
        .await
        .unwrap();
    assert_eq!(status, SignUpStatus::ConfirmationRequired);
    assert!(!h.store.is_authenticated());
}

#[tokio::test]
async fn sign_up_with_immediate_session_uses_the_chosen_name() {
    let h = harness_with(MockRemote::open(RemoteData::default()));
    let status = h
        .store
        .sign_up("lee@example.com", "password1", "Lee Carter")
        .await
        .unwrap();
    assert_eq!(status, SignUpStatus::SignedIn);
    assert_eq!(h.store.account().unwrap().display_name, "Lee Carter");
    h.store.wait_for_sync().await;
}

#[tokio::test]
async fn oauth_completion_requires_both_tokens() {
    let h = harness_with(MockRemote::open(RemoteData::default()));
    let err = h
        .store
        .complete_oauth("gymtrack://auth/callback#error=access_denied")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Unknown(_)));
    assert!(!h.store.is_authenticated());

    h.store
        .complete_oauth("gymtrack://auth/callback#access_token=abc&refresh_token=def")
        .await
        .unwrap();
    assert!(h.store.is_authenticated());
    h.store.wait_for_sync().await;
}

#[tokio::test]
async fn auth_subscription_sees_sign_in_and_sign_out() {
    let h = harness_with(MockRemote::open(RemoteData::default()));
    let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let subscription = h.store.subscribe_auth_changes(Box::new(move |event| {
        let label = match event {
            AuthEvent::SignedIn(_) => "in",
            AuthEvent::TokenRefreshed(_) => "refresh",
            AuthEvent::SignedOut => "out",
        };
        sink.lock().unwrap().push(label.to_string());
    }));

    h.store.sign_in("lee@example.com", "password1").await.unwrap();
    h.store.wait_for_sync().await;
    h.store.sign_out().await;

    assert_eq!(events.lock().unwrap().clone(), vec!["in", "out"]);
    subscription.unsubscribe();
}
