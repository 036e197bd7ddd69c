use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analytics::one_rep_max;
use crate::workouts::WorkoutSession;

/// Best known lift for one exercise: at most one record per exercise per
/// account at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    pub id: String,
    pub account_id: String,
    pub exercise_id: String,
    pub exercise_name: String,
    pub weight: f64,
    pub reps: u32,
    pub date: NaiveDate,
    pub one_rep_max: f64,
}

/// Fold a finalized session into the record set. For every completed set
/// with positive weight and reps, the Epley estimate replaces the stored
/// record when it exceeds it (or none exists yet). Returns clones of the
/// records that were created or improved, for the remote write-behind.
pub fn absorb_session(records: &mut Vec<PersonalRecord>, session: &WorkoutSession) -> Vec<PersonalRecord> {
    let mut touched: Vec<String> = Vec::new();

    for exercise in &session.exercises {
        for set in &exercise.sets {
            if !set.is_completed {
                continue;
            }
            let (Some(weight), Some(reps)) = (set.weight, set.reps) else {
                continue;
            };
            if weight <= 0.0 || reps == 0 {
                continue;
            }
            let estimate = one_rep_max(weight, reps);

            match records.iter_mut().find(|r| r.exercise_id == exercise.exercise_id) {
                Some(existing) => {
                    if estimate > existing.one_rep_max {
                        existing.weight = weight;
                        existing.reps = reps;
                        existing.date = session.date;
                        existing.one_rep_max = estimate;
                        existing.exercise_name = exercise.exercise_name.clone();
                        if !touched.contains(&existing.exercise_id) {
                            touched.push(existing.exercise_id.clone());
                        }
                    }
                }
                None => {
                    records.push(PersonalRecord {
                        id: Uuid::new_v4().to_string(),
                        account_id: session.account_id.clone(),
                        exercise_id: exercise.exercise_id.clone(),
                        exercise_name: exercise.exercise_name.clone(),
                        weight,
                        reps,
                        date: session.date,
                        one_rep_max: estimate,
                    });
                    touched.push(exercise.exercise_id.clone());
                }
            }
        }
    }

    records
        .iter()
        .filter(|r| touched.contains(&r.exercise_id))
        .cloned()
        .collect()
}
