//! SQLite adapter for `ExamCreationGateway` and `DuplicateFilter`.
//!
//! Stands in for the exam module's creation routine: roster and
//! percentage invariants are enforced here, and the store's unique
//! (class_course_id, exam_type) slot index is the last line of defense
//! against concurrent runs racing past the in-process duplicate check.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::exam::{CreateOutcome, ExamSpec, RejectReason};
use crate::domain::ports::duplicate_filter::DuplicateFilter;
use crate::domain::ports::exam_gateway::ExamCreationGateway;

/// Maximum total percentage weight across a class-course's exams.
const MAX_TOTAL_PERCENTAGE: i64 = 100;

#[derive(Clone)]
pub struct SqliteExamGateway {
    pool: SqlitePool,
}

impl SqliteExamGateway {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl ExamCreationGateway for SqliteExamGateway {
    async fn create(&self, spec: &ExamSpec, actor: Option<i64>) -> DomainResult<CreateOutcome> {
        let (roster_size,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM enrollments WHERE class_course_id = ?")
                .bind(spec.class_course_id)
                .fetch_one(&self.pool)
                .await?;
        if roster_size == 0 {
            debug!(class_course_id = spec.class_course_id, "rejected: empty roster");
            return Ok(CreateOutcome::Rejected(RejectReason::EmptyRoster));
        }

        let (existing_pct,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(percentage), 0) FROM exams WHERE class_course_id = ?",
        )
        .bind(spec.class_course_id)
        .fetch_one(&self.pool)
        .await?;
        if existing_pct + spec.percentage > MAX_TOTAL_PERCENTAGE {
            debug!(
                class_course_id = spec.class_course_id,
                existing_pct, "rejected: percentage overflow"
            );
            return Ok(CreateOutcome::Rejected(RejectReason::PercentageOverflow));
        }

        let result = sqlx::query(
            "INSERT INTO exams
             (class_course_id, name, exam_type, scheduled_at, percentage, status, locked,
              created_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 'scheduled', 0, ?6, ?7)",
        )
        .bind(spec.class_course_id)
        .bind(&spec.name)
        .bind(&spec.exam_type)
        .bind(spec.scheduled_at.to_rfc3339())
        .bind(spec.percentage)
        .bind(actor)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(CreateOutcome::Created(done.last_insert_rowid())),
            Err(err) if is_unique_violation(&err) => {
                debug!(class_course_id = spec.class_course_id, "rejected: slot taken");
                Ok(CreateOutcome::Rejected(RejectReason::DuplicateSlot))
            }
            Err(err) => Err(DomainError::ExamCreationFailed {
                class_course_id: spec.class_course_id,
                reason: err.to_string(),
            }),
        }
    }

    async fn assign_run(&self, exam_ids: &[i64], run_id: i64) -> DomainResult<()> {
        if exam_ids.is_empty() {
            return Ok(());
        }

        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new("UPDATE exams SET schedule_run_id = ");
        qb.push_bind(run_id);
        qb.push(" WHERE id IN (");
        let mut separated = qb.separated(", ");
        for id in exam_ids {
            separated.push_bind(*id);
        }
        qb.push(")");

        qb.build().execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DuplicateFilter for SqliteExamGateway {
    async fn existing_exam_class_course_ids(
        &self,
        class_course_ids: &[i64],
        exam_type_name: &str,
        institution_id: i64,
    ) -> DomainResult<HashSet<i64>> {
        if class_course_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT DISTINCT e.class_course_id \
             FROM exams e \
             JOIN class_courses cc ON cc.id = e.class_course_id \
             JOIN classes c ON c.id = cc.class_id \
             JOIN programs p ON p.id = c.program_id \
             WHERE e.exam_type = ",
        );
        qb.push_bind(exam_type_name);
        qb.push(" AND p.institution_id = ");
        qb.push_bind(institution_id);
        qb.push(" AND e.class_course_id IN (");
        let mut separated = qb.separated(", ");
        for id in class_course_ids {
            separated.push_bind(*id);
        }
        qb.push(")");

        let rows: Vec<(i64,)> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
