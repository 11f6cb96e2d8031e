//! Domain errors for the exam scheduling engine.

use thiserror::Error;

/// Domain-level errors that can occur while scheduling exams.
///
/// Per-target creation rejections (empty roster, percentage overflow,
/// duplicate slot) are NOT errors: they are the `Rejected` arm of
/// [`crate::domain::models::exam::CreateOutcome`] and are aggregated
/// into the run's conflict count.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Academic year not found: {0}")]
    AcademicYearNotFound(i64),

    #[error("Exam type not found: {0}")]
    ExamTypeNotFound(i64),

    #[error("Scheduling run not found: {0}")]
    RunNotFound(i64),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Exam creation failed for class-course {class_course_id}: {reason}")]
    ExamCreationFailed { class_course_id: i64, reason: String },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
