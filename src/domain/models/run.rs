//! Scheduling-run models: request, persisted row, and response summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::candidate::SchedulingContext;
use super::exam::Exam;

/// Parameters of one `schedule` invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(flatten)]
    pub context: SchedulingContext,
    pub exam_type_id: i64,
    /// Weight applied to every created exam, 1..=100.
    pub percentage: i64,
    pub date_start: DateTime<Utc>,
    /// Must be >= `date_start`.
    pub date_end: DateTime<Utc>,
    /// Profile id of the scheduling actor, for audit attribution.
    pub actor_profile_id: Option<i64>,
}

/// A run row about to be persisted. Counts are final at insert time;
/// run rows are never mutated afterwards.
#[derive(Debug, Clone)]
pub struct NewSchedulingRun {
    pub institution_id: i64,
    pub academic_year_id: i64,
    pub exam_type_id: i64,
    pub percentage: i64,
    pub date_start: DateTime<Utc>,
    pub date_end: DateTime<Utc>,
    pub semester_id: Option<i64>,
    /// Every class id considered by this run.
    pub class_ids: Vec<i64>,
    pub class_count: i64,
    pub class_course_count: i64,
    pub created_count: i64,
    pub skipped_count: i64,
    pub duplicate_count: i64,
    pub conflict_count: i64,
    pub scheduled_by: Option<i64>,
}

/// A persisted scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingRun {
    pub id: i64,
    pub institution_id: i64,
    pub academic_year_id: i64,
    pub exam_type_id: i64,
    pub percentage: i64,
    pub date_start: DateTime<Utc>,
    pub date_end: DateTime<Utc>,
    pub semester_id: Option<i64>,
    pub class_ids: Vec<i64>,
    pub class_count: i64,
    pub class_course_count: i64,
    pub created_count: i64,
    pub skipped_count: i64,
    pub duplicate_count: i64,
    pub conflict_count: i64,
    pub scheduled_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Outcome of one `schedule` invocation, returned to the caller.
///
/// Invariants: `created + skipped == class_course_count` and
/// `skipped >= duplicates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub created: i64,
    pub skipped: i64,
    pub duplicates: i64,
    pub conflicts: i64,
    pub class_count: i64,
    pub class_course_count: i64,
    pub exam_ids: Vec<i64>,
    pub exam_type: String,
    pub academic_year: String,
    /// Absent when run recording failed (best-effort persistence).
    pub run_id: Option<i64>,
    /// Set when the run row or the exam back-links could not be
    /// persisted; the exams themselves remain created.
    pub persistence_error: Option<String>,
}

/// Filter for listing run history.
#[derive(Debug, Clone, Default)]
pub struct RunFilter {
    pub academic_year_id: Option<i64>,
    pub exam_type_id: Option<i64>,
    /// Return runs with id strictly greater than this.
    pub cursor: Option<i64>,
    pub limit: Option<i64>,
}

/// One page of run history, ascending by run id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunPage {
    pub items: Vec<SchedulingRun>,
    pub next_cursor: Option<i64>,
}

/// A run row plus every exam it created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDetails {
    pub run: SchedulingRun,
    pub exams: Vec<Exam>,
}
