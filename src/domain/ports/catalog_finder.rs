//! Read-only finder port for catalog entities.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::catalog::{AcademicYear, ExamType, Profile};

#[async_trait]
pub trait CatalogFinder: Send + Sync {
    /// Academic year by id, scoped to the institution.
    async fn academic_year(
        &self,
        id: i64,
        institution_id: i64,
    ) -> DomainResult<Option<AcademicYear>>;

    /// Exam type by id, scoped to the institution.
    async fn exam_type(&self, id: i64, institution_id: i64) -> DomainResult<Option<ExamType>>;

    /// Actor profile by id, for audit attribution. Missing profiles are
    /// not an error; the run is recorded with a null scheduler.
    async fn profile(&self, id: i64) -> DomainResult<Option<Profile>>;
}
