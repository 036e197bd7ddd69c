//! Per-category table access for the relational variant.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use gymtrack_core::accounts::Account;
use gymtrack_core::backend::{BackendResult, RemoteStoreTrait};
use gymtrack_core::body::{BodyMeasurement, BodyWeightEntry};
use gymtrack_core::exercises::ExerciseCatalogEntry;
use gymtrack_core::goals::Goal;
use gymtrack_core::records::PersonalRecord;
use gymtrack_core::templates::WorkoutTemplate;
use gymtrack_core::workouts::WorkoutSession;

use crate::http::{expect_success, parse_json, transport};

use super::rows::{
    AccountRow, BodyMeasurementRow, BodyWeightRow, CustomExerciseRow, GoalRow, PersonalRecordRow,
    WorkoutSessionRow, WorkoutTemplateRow,
};
use super::RelationalBackend;

impl RelationalBackend {
    /// `GET {table}?select=*&account_id=eq.{id}` with an optional
    /// newest-first ordering column.
    async fn list_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        account_id: &str,
        order: Option<&str>,
    ) -> BackendResult<Vec<T>> {
        let mut url = format!("{}?select=*&account_id=eq.{}", self.rest_url(table), account_id);
        if let Some(column) = order {
            url.push_str(&format!("&order={column}.desc"));
        }
        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(transport)?;
        parse_json(response).await
    }

    /// Upsert one row, merging on the primary key.
    async fn upsert_row<T: Serialize>(&self, table: &str, row: &T) -> BackendResult<()> {
        let response = self
            .client
            .post(self.rest_url(table))
            .headers(self.headers()?)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[row])
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }

    async fn delete_row(&self, table: &str, id: &str) -> BackendResult<()> {
        let url = format!("{}?id=eq.{}", self.rest_url(table), id);
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

#[async_trait]
impl RemoteStoreTrait for RelationalBackend {
    async fn fetch_profile(&self, account_id: &str) -> BackendResult<Option<Account>> {
        let url = format!("{}?select=*&id=eq.{}", self.rest_url("accounts"), account_id);
        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(transport)?;
        let rows: Vec<AccountRow> = parse_json(response).await?;
        Ok(rows.into_iter().next().map(Account::from))
    }

    async fn upsert_profile(&self, account: &Account) -> BackendResult<()> {
        self.upsert_row("accounts", &AccountRow::from(account)).await
    }

    async fn list_workouts(&self, account_id: &str) -> BackendResult<Vec<WorkoutSession>> {
        let rows: Vec<WorkoutSessionRow> = self
            .list_rows("workout_sessions", account_id, Some("created_at"))
            .await?;
        Ok(rows.into_iter().map(WorkoutSession::from).collect())
    }

    async fn upsert_workout(&self, workout: &WorkoutSession) -> BackendResult<()> {
        self.upsert_row("workout_sessions", &WorkoutSessionRow::from(workout))
            .await
    }

    async fn delete_workout(&self, workout_id: &str) -> BackendResult<()> {
        self.delete_row("workout_sessions", workout_id).await
    }

    async fn list_body_weights(&self, account_id: &str) -> BackendResult<Vec<BodyWeightEntry>> {
        let rows: Vec<BodyWeightRow> = self
            .list_rows("body_weight_entries", account_id, Some("date"))
            .await?;
        Ok(rows.into_iter().map(BodyWeightEntry::from).collect())
    }

    async fn upsert_body_weight(&self, entry: &BodyWeightEntry) -> BackendResult<()> {
        self.upsert_row("body_weight_entries", &BodyWeightRow::from(entry))
            .await
    }

    async fn delete_body_weight(&self, entry_id: &str) -> BackendResult<()> {
        self.delete_row("body_weight_entries", entry_id).await
    }

    async fn list_measurements(&self, account_id: &str) -> BackendResult<Vec<BodyMeasurement>> {
        let rows: Vec<BodyMeasurementRow> = self
            .list_rows("body_measurements", account_id, Some("date"))
            .await?;
        Ok(rows.into_iter().map(BodyMeasurement::from).collect())
    }

    async fn upsert_measurement(&self, entry: &BodyMeasurement) -> BackendResult<()> {
        self.upsert_row("body_measurements", &BodyMeasurementRow::from(entry))
            .await
    }

    async fn delete_measurement(&self, entry_id: &str) -> BackendResult<()> {
        self.delete_row("body_measurements", entry_id).await
    }

    async fn list_personal_records(&self, account_id: &str) -> BackendResult<Vec<PersonalRecord>> {
        let rows: Vec<PersonalRecordRow> =
            self.list_rows("personal_records", account_id, None).await?;
        Ok(rows.into_iter().map(PersonalRecord::from).collect())
    }

    async fn upsert_personal_record(&self, record: &PersonalRecord) -> BackendResult<()> {
        self.upsert_row("personal_records", &PersonalRecordRow::from(record))
            .await
    }

    async fn list_goals(&self, account_id: &str) -> BackendResult<Vec<Goal>> {
        let rows: Vec<GoalRow> = self.list_rows("goals", account_id, Some("created_at")).await?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    async fn upsert_goal(&self, goal: &Goal) -> BackendResult<()> {
        self.upsert_row("goals", &GoalRow::from(goal)).await
    }

    async fn delete_goal(&self, goal_id: &str) -> BackendResult<()> {
        self.delete_row("goals", goal_id).await
    }

    async fn list_templates(&self, account_id: &str) -> BackendResult<Vec<WorkoutTemplate>> {
        let rows: Vec<WorkoutTemplateRow> = self
            .list_rows("workout_templates", account_id, Some("created_at"))
            .await?;
        Ok(rows.into_iter().map(WorkoutTemplate::from).collect())
    }

    async fn upsert_template(&self, template: &WorkoutTemplate) -> BackendResult<()> {
        self.upsert_row("workout_templates", &WorkoutTemplateRow::from(template))
            .await
    }

    async fn delete_template(&self, template_id: &str) -> BackendResult<()> {
        self.delete_row("workout_templates", template_id).await
    }

    async fn list_custom_exercises(&self, account_id: &str) -> BackendResult<Vec<ExerciseCatalogEntry>> {
        let rows: Vec<CustomExerciseRow> =
            self.list_rows("custom_exercises", account_id, None).await?;
        Ok(rows.into_iter().map(ExerciseCatalogEntry::from).collect())
    }

    async fn upsert_custom_exercise(
        &self,
        account_id: &str,
        entry: &ExerciseCatalogEntry,
    ) -> BackendResult<()> {
        self.upsert_row("custom_exercises", &CustomExerciseRow::new(account_id, entry))
            .await
    }
}
