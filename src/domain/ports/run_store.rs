//! Repository port for scheduling-run persistence.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::run::{NewSchedulingRun, RunDetails, RunFilter, RunPage};

#[async_trait]
pub trait RunStore: Send + Sync {
    /// Persist one run row and return its id. Run rows are insert-only.
    async fn record(&self, run: &NewSchedulingRun) -> DomainResult<i64>;

    /// Paginated run history for an institution, ascending by run id.
    async fn list(&self, institution_id: i64, filter: &RunFilter) -> DomainResult<RunPage>;

    /// One run plus every exam linked to it, joined with class/course
    /// display names. `None` when the run does not exist or belongs to
    /// another institution.
    async fn details(&self, run_id: i64, institution_id: i64) -> DomainResult<Option<RunDetails>>;
}
