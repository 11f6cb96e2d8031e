//! The scheduling orchestrator: one invocation resolves context, loads
//! candidates, filters duplicates, distributes dates, drives the
//! creation gateway per target, and records the run.
//!
//! Creations are issued sequentially so `dates[i]` is bound to
//! `targets[i]` in a stable order and a misbehaving creation cannot
//! race its siblings for the same class-course. There is no cross-run
//! locking; the store's uniqueness constraint is the ultimate guard.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::candidate::{SchedulerClass, SchedulerClassCourse, SchedulingContext};
use crate::domain::models::catalog::AcademicYear;
use crate::domain::models::exam::{CreateOutcome, ExamSpec};
use crate::domain::models::run::{
    NewSchedulingRun, RunDetails, RunFilter, RunPage, RunSummary, ScheduleRequest,
};
use crate::domain::ports::{
    CandidateRepository, CatalogFinder, DuplicateFilter, ExamCreationGateway, RunStore,
};
use crate::services::date_distributor::distribute;

/// Read-only answer to "what would a run touch".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preview {
    pub academic_year: AcademicYear,
    pub classes: Vec<SchedulerClass>,
}

/// Accumulated result of the sequential creation pass.
struct CreationBatch {
    created_ids: Vec<i64>,
    conflicts: i64,
}

pub struct ScheduleOrchestrator {
    candidates: Arc<dyn CandidateRepository>,
    duplicates: Arc<dyn DuplicateFilter>,
    gateway: Arc<dyn ExamCreationGateway>,
    catalog: Arc<dyn CatalogFinder>,
    runs: Arc<dyn RunStore>,
}

impl ScheduleOrchestrator {
    pub fn new(
        candidates: Arc<dyn CandidateRepository>,
        duplicates: Arc<dyn DuplicateFilter>,
        gateway: Arc<dyn ExamCreationGateway>,
        catalog: Arc<dyn CatalogFinder>,
        runs: Arc<dyn RunStore>,
    ) -> Self {
        Self {
            candidates,
            duplicates,
            gateway,
            catalog,
            runs,
        }
    }

    /// Resolve the academic year and list candidate classes, without
    /// creating anything. An empty class list is a valid preview.
    pub async fn preview(&self, context: &SchedulingContext) -> DomainResult<Preview> {
        let academic_year = self
            .catalog
            .academic_year(context.academic_year_id, context.institution_id)
            .await?
            .ok_or(DomainError::AcademicYearNotFound(context.academic_year_id))?;

        let classes = self.candidates.classes_for_scheduling(context).await?;

        Ok(Preview {
            academic_year,
            classes,
        })
    }

    /// Run one scheduling pass and return its summary.
    ///
    /// Duplicate class-courses are excluded up front; per-target gateway
    /// rejections are counted as conflicts and the pass continues; any
    /// other gateway failure aborts the remaining batch. Run recording
    /// is best-effort: a persistence failure is reported in
    /// `RunSummary::persistence_error` rather than failing the call.
    pub async fn schedule(&self, request: &ScheduleRequest) -> DomainResult<RunSummary> {
        validate_request(request)?;
        let context = &request.context;

        let academic_year = self
            .catalog
            .academic_year(context.academic_year_id, context.institution_id)
            .await?
            .ok_or(DomainError::AcademicYearNotFound(context.academic_year_id))?;

        let exam_type = self
            .catalog
            .exam_type(request.exam_type_id, context.institution_id)
            .await?
            .ok_or(DomainError::ExamTypeNotFound(request.exam_type_id))?;

        let classes = self.candidates.classes_for_scheduling(context).await?;
        if classes.is_empty() {
            return Err(DomainError::InvalidSelection(
                "No classes match the provided selection".to_string(),
            ));
        }
        let class_ids: Vec<i64> = classes.iter().map(|c| c.id).collect();

        let class_courses = self.candidates.class_courses_for(&class_ids).await?;
        if class_courses.is_empty() {
            return Err(DomainError::InvalidSelection(
                "Selected classes do not have assigned courses".to_string(),
            ));
        }

        let candidate_ids: Vec<i64> = class_courses.iter().map(|cc| cc.id).collect();
        let existing = self
            .duplicates
            .existing_exam_class_course_ids(&candidate_ids, &exam_type.name, context.institution_id)
            .await?;

        let targets: Vec<&SchedulerClassCourse> = class_courses
            .iter()
            .filter(|cc| !existing.contains(&cc.id))
            .collect();
        let duplicates = (class_courses.len() - targets.len()) as i64;

        let dates = distribute(targets.len(), request.date_start, request.date_end);

        // Resolve the actor up front: creations and the run row must
        // carry the resolved profile id (or null), never a raw caller
        // value the store might not know.
        let scheduled_by = match request.actor_profile_id {
            Some(id) => self.catalog.profile(id).await?.map(|p| p.id),
            None => None,
        };

        let batch = run_creation_batch(
            self.gateway.as_ref(),
            &targets,
            &dates,
            &exam_type.name,
            request.percentage,
            scheduled_by,
        )
        .await?;

        let created = batch.created_ids.len() as i64;
        let class_course_count = class_courses.len() as i64;
        let skipped = class_course_count - created;

        info!(
            institution_id = context.institution_id,
            exam_type = %exam_type.name,
            created,
            duplicates,
            conflicts = batch.conflicts,
            "scheduling pass finished"
        );

        let new_run = NewSchedulingRun {
            institution_id: context.institution_id,
            academic_year_id: academic_year.id,
            exam_type_id: exam_type.id,
            percentage: request.percentage,
            date_start: request.date_start,
            date_end: request.date_end,
            semester_id: context.semester_id,
            class_ids,
            class_count: classes.len() as i64,
            class_course_count,
            created_count: created,
            skipped_count: skipped,
            duplicate_count: duplicates,
            conflict_count: batch.conflicts,
            scheduled_by,
        };

        let (run_id, persistence_error) =
            self.record_run(&new_run, &batch.created_ids).await;

        Ok(RunSummary {
            created,
            skipped,
            duplicates,
            conflicts: batch.conflicts,
            class_count: classes.len() as i64,
            class_course_count,
            exam_ids: batch.created_ids,
            exam_type: exam_type.name,
            academic_year: academic_year.name,
            run_id,
            persistence_error,
        })
    }

    /// Paginated run history for the caller's institution.
    pub async fn history(
        &self,
        institution_id: i64,
        filter: &RunFilter,
    ) -> DomainResult<RunPage> {
        self.runs.list(institution_id, filter).await
    }

    /// One run plus the exams it created. Runs belonging to another
    /// institution resolve to `RunNotFound`.
    pub async fn details(&self, institution_id: i64, run_id: i64) -> DomainResult<RunDetails> {
        self.runs
            .details(run_id, institution_id)
            .await?
            .ok_or(DomainError::RunNotFound(run_id))
    }

    /// Persist the run row and back-link the created exams. Failures
    /// are reported, not raised: the exams already exist and the caller
    /// still deserves its summary.
    async fn record_run(
        &self,
        run: &NewSchedulingRun,
        exam_ids: &[i64],
    ) -> (Option<i64>, Option<String>) {
        let run_id = match self.runs.record(run).await {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, "failed to record scheduling run");
                return (None, Some(err.to_string()));
            }
        };

        if let Err(err) = self.gateway.assign_run(exam_ids, run_id).await {
            warn!(run_id, error = %err, "failed to link exams to scheduling run");
            return (Some(run_id), Some(err.to_string()));
        }

        (Some(run_id), None)
    }
}

fn validate_request(request: &ScheduleRequest) -> DomainResult<()> {
    if !(1..=100).contains(&request.percentage) {
        return Err(DomainError::ValidationFailed(format!(
            "percentage must be between 1 and 100, got {}",
            request.percentage
        )));
    }
    if request.date_end < request.date_start {
        return Err(DomainError::ValidationFailed(
            "date_end must not precede date_start".to_string(),
        ));
    }
    Ok(())
}

/// Sequentially create one exam per target, folding outcomes into
/// `{created_ids, conflicts}`. Rejections continue the pass; fatal
/// errors abort it, leaving already-created exams in place.
async fn run_creation_batch(
    gateway: &dyn ExamCreationGateway,
    targets: &[&SchedulerClassCourse],
    dates: &[DateTime<Utc>],
    exam_type_name: &str,
    percentage: i64,
    actor: Option<i64>,
) -> DomainResult<CreationBatch> {
    let mut batch = CreationBatch {
        created_ids: Vec::with_capacity(targets.len()),
        conflicts: 0,
    };

    for (target, date) in targets.iter().zip(dates) {
        let spec = ExamSpec {
            name: format!("{} - {}", target.course_name, exam_type_name),
            exam_type: exam_type_name.to_string(),
            scheduled_at: *date,
            percentage,
            class_course_id: target.id,
        };

        match gateway.create(&spec, actor).await? {
            CreateOutcome::Created(exam_id) => batch.created_ids.push(exam_id),
            CreateOutcome::Rejected(reason) => {
                info!(
                    class_course_id = target.id,
                    reason = reason.as_str(),
                    "exam creation rejected"
                );
                batch.conflicts += 1;
            }
        }
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::catalog::{ExamType, Profile};
    use crate::domain::models::exam::RejectReason;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Scripted gateway: pops one outcome per call, records specs.
    struct ScriptedGateway {
        script: Mutex<Vec<DomainResult<CreateOutcome>>>,
        seen: Mutex<Vec<ExamSpec>>,
        fail_assign: bool,
    }

    impl ScriptedGateway {
        fn new(script: Vec<DomainResult<CreateOutcome>>) -> Self {
            Self {
                script: Mutex::new(script),
                seen: Mutex::new(vec![]),
                fail_assign: false,
            }
        }

        fn with_failing_assign(script: Vec<DomainResult<CreateOutcome>>) -> Self {
            Self {
                fail_assign: true,
                ..Self::new(script)
            }
        }
    }

    #[async_trait]
    impl ExamCreationGateway for ScriptedGateway {
        async fn create(
            &self,
            spec: &ExamSpec,
            _actor: Option<i64>,
        ) -> DomainResult<CreateOutcome> {
            self.seen.lock().unwrap().push(spec.clone());
            self.script.lock().unwrap().remove(0)
        }

        async fn assign_run(&self, _exam_ids: &[i64], _run_id: i64) -> DomainResult<()> {
            if self.fail_assign {
                return Err(DomainError::DatabaseError("run link lost".to_string()));
            }
            Ok(())
        }
    }

    fn target(id: i64, course: &str) -> SchedulerClassCourse {
        SchedulerClassCourse {
            id,
            class_id: 1,
            course_id: id,
            course_name: course.to_string(),
        }
    }

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn rejection_increments_conflicts_and_continues() {
        let gateway = ScriptedGateway::new(vec![
            Ok(CreateOutcome::Created(10)),
            Ok(CreateOutcome::Rejected(RejectReason::EmptyRoster)),
            Ok(CreateOutcome::Created(11)),
        ]);
        let targets_owned = [target(1, "Algebra"), target(2, "Physics"), target(3, "Chemistry")];
        let targets: Vec<_> = targets_owned.iter().collect();
        let (start, end) = window();
        let dates = distribute(targets.len(), start, end);

        let batch = run_creation_batch(&gateway, &targets, &dates, "Midterm", 40, None)
            .await
            .expect("batch should not abort on rejection");

        assert_eq!(batch.created_ids, vec![10, 11]);
        assert_eq!(batch.conflicts, 1);
    }

    #[tokio::test]
    async fn fatal_error_aborts_batch_keeping_prior_creations() {
        let gateway = ScriptedGateway::new(vec![
            Ok(CreateOutcome::Created(10)),
            Err(DomainError::ExamCreationFailed {
                class_course_id: 2,
                reason: "disk on fire".to_string(),
            }),
            Ok(CreateOutcome::Created(12)),
        ]);
        let targets_owned = [target(1, "Algebra"), target(2, "Physics"), target(3, "Chemistry")];
        let targets: Vec<_> = targets_owned.iter().collect();
        let (start, end) = window();
        let dates = distribute(targets.len(), start, end);

        let result = run_creation_batch(&gateway, &targets, &dates, "Midterm", 40, None).await;

        assert!(matches!(
            result,
            Err(DomainError::ExamCreationFailed { class_course_id: 2, .. })
        ));
        // The third target was never attempted.
        assert_eq!(gateway.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn specs_carry_course_and_type_in_name_and_positional_dates() {
        let gateway = ScriptedGateway::new(vec![
            Ok(CreateOutcome::Created(1)),
            Ok(CreateOutcome::Created(2)),
        ]);
        let targets_owned = [target(7, "Algebra"), target(8, "Physics")];
        let targets: Vec<_> = targets_owned.iter().collect();
        let (start, end) = window();
        let dates = distribute(targets.len(), start, end);

        run_creation_batch(&gateway, &targets, &dates, "Final", 60, Some(3))
            .await
            .unwrap();

        let seen = gateway.seen.lock().unwrap();
        assert_eq!(seen[0].name, "Algebra - Final");
        assert_eq!(seen[0].scheduled_at, start);
        assert_eq!(seen[1].name, "Physics - Final");
        assert_eq!(seen[1].scheduled_at, end);
        assert_eq!(seen[0].percentage, 60);
    }

    #[test]
    fn percentage_bounds_are_enforced() {
        let (start, end) = window();
        let request = ScheduleRequest {
            context: SchedulingContext {
                institution_id: 1,
                academic_year_id: 1,
                semester_id: None,
                class_ids: None,
            },
            exam_type_id: 1,
            percentage: 0,
            date_start: start,
            date_end: end,
            actor_profile_id: None,
        };
        assert!(matches!(
            validate_request(&request),
            Err(DomainError::ValidationFailed(_))
        ));

        let request = ScheduleRequest { percentage: 101, ..request };
        assert!(matches!(
            validate_request(&request),
            Err(DomainError::ValidationFailed(_))
        ));
    }

    /// Fixed catalog/candidate world: one class with two class-courses,
    /// nothing scheduled yet. Lets the full orchestrator run end to end
    /// against a scripted gateway and run store.
    struct StubWorld;

    #[async_trait]
    impl CandidateRepository for StubWorld {
        async fn classes_for_scheduling(
            &self,
            _context: &SchedulingContext,
        ) -> DomainResult<Vec<SchedulerClass>> {
            Ok(vec![SchedulerClass {
                id: 10,
                name: "CS-A".to_string(),
                program_id: 1,
                program_name: "Computer Science".to_string(),
                class_course_count: 2,
            }])
        }

        async fn class_courses_for(
            &self,
            _class_ids: &[i64],
        ) -> DomainResult<Vec<SchedulerClassCourse>> {
            Ok(vec![target(100, "Algebra"), target(101, "Physics")])
        }
    }

    #[async_trait]
    impl DuplicateFilter for StubWorld {
        async fn existing_exam_class_course_ids(
            &self,
            _class_course_ids: &[i64],
            _exam_type_name: &str,
            _institution_id: i64,
        ) -> DomainResult<HashSet<i64>> {
            Ok(HashSet::new())
        }
    }

    #[async_trait]
    impl CatalogFinder for StubWorld {
        async fn academic_year(
            &self,
            id: i64,
            institution_id: i64,
        ) -> DomainResult<Option<AcademicYear>> {
            let (starts_on, ends_on) = window();
            Ok(Some(AcademicYear {
                id,
                institution_id,
                name: "2024/2025".to_string(),
                starts_on,
                ends_on,
            }))
        }

        async fn exam_type(
            &self,
            id: i64,
            institution_id: i64,
        ) -> DomainResult<Option<ExamType>> {
            Ok(Some(ExamType {
                id,
                institution_id,
                name: "Midterm".to_string(),
            }))
        }

        async fn profile(&self, _id: i64) -> DomainResult<Option<Profile>> {
            Ok(None)
        }
    }

    /// Run store whose `record` either fails outright or hands back a
    /// fixed run id, so recording failures can be staged deliberately.
    struct ScriptedRunStore {
        record_result: DomainResult<i64>,
    }

    #[async_trait]
    impl RunStore for ScriptedRunStore {
        async fn record(&self, _run: &NewSchedulingRun) -> DomainResult<i64> {
            self.record_result
                .as_ref()
                .copied()
                .map_err(|err| DomainError::DatabaseError(err.to_string()))
        }

        async fn list(&self, _institution_id: i64, _filter: &RunFilter) -> DomainResult<RunPage> {
            Ok(RunPage {
                items: vec![],
                next_cursor: None,
            })
        }

        async fn details(
            &self,
            _run_id: i64,
            _institution_id: i64,
        ) -> DomainResult<Option<RunDetails>> {
            Ok(None)
        }
    }

    fn orchestrator_over(
        gateway: Arc<ScriptedGateway>,
        runs: Arc<ScriptedRunStore>,
    ) -> ScheduleOrchestrator {
        ScheduleOrchestrator::new(
            Arc::new(StubWorld),
            Arc::new(StubWorld),
            gateway,
            Arc::new(StubWorld),
            runs,
        )
    }

    fn stub_request() -> ScheduleRequest {
        let (start, end) = window();
        ScheduleRequest {
            context: SchedulingContext {
                institution_id: 1,
                academic_year_id: 1,
                semester_id: None,
                class_ids: None,
            },
            exam_type_id: 1,
            percentage: 40,
            date_start: start,
            date_end: end,
            actor_profile_id: None,
        }
    }

    #[tokio::test]
    async fn run_record_failure_degrades_to_summary() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Ok(CreateOutcome::Created(10)),
            Ok(CreateOutcome::Created(11)),
        ]));
        let runs = Arc::new(ScriptedRunStore {
            record_result: Err(DomainError::DatabaseError("runs table unavailable".to_string())),
        });
        let orchestrator = orchestrator_over(gateway, runs);

        let summary = orchestrator
            .schedule(&stub_request())
            .await
            .expect("recording failure must not fail the pass");

        assert_eq!(summary.created, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.class_course_count, 2);
        assert_eq!(summary.exam_ids, vec![10, 11]);
        assert!(summary.run_id.is_none());
        assert!(summary.persistence_error.is_some());
    }

    #[tokio::test]
    async fn run_link_failure_still_reports_run_id() {
        let gateway = Arc::new(ScriptedGateway::with_failing_assign(vec![
            Ok(CreateOutcome::Created(10)),
            Ok(CreateOutcome::Created(11)),
        ]));
        let runs = Arc::new(ScriptedRunStore {
            record_result: Ok(77),
        });
        let orchestrator = orchestrator_over(gateway, runs);

        let summary = orchestrator
            .schedule(&stub_request())
            .await
            .expect("link failure must not fail the pass");

        assert_eq!(summary.created, 2);
        assert_eq!(summary.run_id, Some(77));
        assert!(summary.persistence_error.is_some());
    }

    #[test]
    fn inverted_window_is_rejected() {
        let (start, end) = window();
        let request = ScheduleRequest {
            context: SchedulingContext {
                institution_id: 1,
                academic_year_id: 1,
                semester_id: None,
                class_ids: None,
            },
            exam_type_id: 1,
            percentage: 40,
            date_start: end,
            date_end: start,
            actor_profile_id: None,
        };
        assert!(matches!(
            validate_request(&request),
            Err(DomainError::ValidationFailed(_))
        ));
    }
}
