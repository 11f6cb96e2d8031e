//! Exam models at the creation-gateway boundary.
//!
//! The exam module proper (grading, locking workflow, notifications)
//! lives outside this crate; the engine consumes its creation contract
//! and reads back created rows for run audit display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input to one `ExamCreationGateway::create` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSpec {
    /// Display name, conventionally `"<course> - <exam type>"`.
    pub name: String,
    /// Exam type name (the duplicate-detection key).
    pub exam_type: String,
    pub scheduled_at: DateTime<Utc>,
    /// Weight of this exam, 1..=100.
    pub percentage: i64,
    pub class_course_id: i64,
}

/// Why the gateway declined to create an exam.
///
/// Rejections are structured outcomes, not errors: the orchestrator
/// counts them as conflicts and moves on to the next target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The class-course has no enrolled students.
    EmptyRoster,
    /// Existing percentages plus this exam's would exceed 100.
    PercentageOverflow,
    /// The store's uniqueness invariant already holds an exam of this
    /// type for the class-course (e.g. a concurrent run won the race).
    DuplicateSlot,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyRoster => "empty_roster",
            Self::PercentageOverflow => "percentage_overflow",
            Self::DuplicateSlot => "duplicate_slot",
        }
    }
}

/// Discriminated result of one creation call.
///
/// Fatal failures are `DomainError`s instead and abort the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(i64),
    Rejected(RejectReason),
}

/// A created exam row, joined with display names for audit output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub name: String,
    pub exam_type: String,
    pub scheduled_at: DateTime<Utc>,
    pub percentage: i64,
    pub status: String,
    pub locked: bool,
    pub class_name: String,
    pub course_name: String,
    pub schedule_run_id: Option<i64>,
}
