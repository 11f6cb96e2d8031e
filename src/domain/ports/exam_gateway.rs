//! Port for the exam-management collaborator's creation contract.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::exam::{CreateOutcome, ExamSpec};

#[async_trait]
pub trait ExamCreationGateway: Send + Sync {
    /// Create one exam record for a class-course.
    ///
    /// Returns `CreateOutcome::Rejected` (no side effect) when the
    /// class-course's roster is empty, when percentages would exceed
    /// 100, or when the store's per-type uniqueness slot is already
    /// taken. Any other failure is a fatal `DomainError` that aborts
    /// the caller's remaining batch.
    async fn create(&self, spec: &ExamSpec, actor: Option<i64>) -> DomainResult<CreateOutcome>;

    /// Retro-link created exams to the scheduling run that produced them.
    async fn assign_run(&self, exam_ids: &[i64], run_id: i64) -> DomainResult<()>;
}
