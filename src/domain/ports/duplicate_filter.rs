//! Port for detecting class-courses already covered by an exam of a type.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

#[async_trait]
pub trait DuplicateFilter: Send + Sync {
    /// The subset of `class_course_ids` that already carry an exam whose
    /// `type` equals `exam_type_name`, scoped to the institution.
    ///
    /// Comparison is by exam-type NAME, not id: two exam types with the
    /// same name occupy the same slot for duplicate purposes. This
    /// in-process check is an optimization only; the store's uniqueness
    /// constraint is the source of truth under concurrent runs.
    async fn existing_exam_class_course_ids(
        &self,
        class_course_ids: &[i64],
        exam_type_name: &str,
        institution_id: i64,
    ) -> DomainResult<HashSet<i64>>;
}
