//! Repository port for candidate class / class-course queries.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::candidate::{SchedulerClass, SchedulerClassCourse, SchedulingContext};

#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Classes under the institution's programs, scoped to the academic
    /// year and (if given) semester and explicit class-id subset, each
    /// annotated with its class-course count. Ordered by class name.
    ///
    /// An empty input scope yields an empty result, not an error.
    async fn classes_for_scheduling(
        &self,
        context: &SchedulingContext,
    ) -> DomainResult<Vec<SchedulerClass>>;

    /// Flat list of class-course pairs for the given classes, ordered by
    /// (class name, course name) so positional date assignment is
    /// reproducible across preview and schedule calls.
    ///
    /// Empty `class_ids` yields an empty result without a query round-trip.
    async fn class_courses_for(
        &self,
        class_ids: &[i64],
    ) -> DomainResult<Vec<SchedulerClassCourse>>;
}
