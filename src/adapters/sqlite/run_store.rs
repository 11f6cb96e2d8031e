//! SQLite adapter for `RunStore`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::adapters::sqlite::{parse_datetime, parse_id_list};
use crate::domain::errors::DomainResult;
use crate::domain::models::exam::Exam;
use crate::domain::models::run::{
    NewSchedulingRun, RunDetails, RunFilter, RunPage, SchedulingRun,
};
use crate::domain::ports::run_store::RunStore;

const DEFAULT_PAGE_SIZE: i64 = 50;

#[derive(Clone)]
pub struct SqliteRunStore {
    pool: SqlitePool,
}

impl SqliteRunStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RunRow {
    id: i64,
    institution_id: i64,
    academic_year_id: i64,
    exam_type_id: i64,
    percentage: i64,
    date_start: String,
    date_end: String,
    semester_id: Option<i64>,
    class_ids: String,
    class_count: i64,
    class_course_count: i64,
    created_count: i64,
    skipped_count: i64,
    duplicate_count: i64,
    conflict_count: i64,
    scheduled_by: Option<i64>,
    created_at: String,
}

fn row_to_run(row: RunRow) -> DomainResult<SchedulingRun> {
    Ok(SchedulingRun {
        id: row.id,
        institution_id: row.institution_id,
        academic_year_id: row.academic_year_id,
        exam_type_id: row.exam_type_id,
        percentage: row.percentage,
        date_start: parse_datetime(&row.date_start)?,
        date_end: parse_datetime(&row.date_end)?,
        semester_id: row.semester_id,
        class_ids: parse_id_list(&row.class_ids)?,
        class_count: row.class_count,
        class_course_count: row.class_course_count,
        created_count: row.created_count,
        skipped_count: row.skipped_count,
        duplicate_count: row.duplicate_count,
        conflict_count: row.conflict_count,
        scheduled_by: row.scheduled_by,
        created_at: parse_datetime(&row.created_at)?,
    })
}

#[derive(sqlx::FromRow)]
struct ExamRow {
    id: i64,
    name: String,
    exam_type: String,
    scheduled_at: String,
    percentage: i64,
    status: String,
    locked: i64,
    class_name: String,
    course_name: String,
    schedule_run_id: Option<i64>,
}

fn row_to_exam(row: ExamRow) -> DomainResult<Exam> {
    Ok(Exam {
        id: row.id,
        name: row.name,
        exam_type: row.exam_type,
        scheduled_at: parse_datetime(&row.scheduled_at)?,
        percentage: row.percentage,
        status: row.status,
        locked: row.locked != 0,
        class_name: row.class_name,
        course_name: row.course_name,
        schedule_run_id: row.schedule_run_id,
    })
}

#[async_trait]
impl RunStore for SqliteRunStore {
    async fn record(&self, run: &NewSchedulingRun) -> DomainResult<i64> {
        let class_ids = serde_json::to_string(&run.class_ids)?;

        let result = sqlx::query(
            "INSERT INTO scheduling_runs
             (institution_id, academic_year_id, exam_type_id, percentage,
              date_start, date_end, semester_id, class_ids,
              class_count, class_course_count, created_count, skipped_count,
              duplicate_count, conflict_count, scheduled_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        )
        .bind(run.institution_id)
        .bind(run.academic_year_id)
        .bind(run.exam_type_id)
        .bind(run.percentage)
        .bind(run.date_start.to_rfc3339())
        .bind(run.date_end.to_rfc3339())
        .bind(run.semester_id)
        .bind(&class_ids)
        .bind(run.class_count)
        .bind(run.class_course_count)
        .bind(run.created_count)
        .bind(run.skipped_count)
        .bind(run.duplicate_count)
        .bind(run.conflict_count)
        .bind(run.scheduled_by)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn list(&self, institution_id: i64, filter: &RunFilter) -> DomainResult<RunPage> {
        let limit = filter.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 500);

        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM scheduling_runs WHERE institution_id = ");
        qb.push_bind(institution_id);

        if let Some(year_id) = filter.academic_year_id {
            qb.push(" AND academic_year_id = ");
            qb.push_bind(year_id);
        }
        if let Some(type_id) = filter.exam_type_id {
            qb.push(" AND exam_type_id = ");
            qb.push_bind(type_id);
        }
        if let Some(cursor) = filter.cursor {
            qb.push(" AND id > ");
            qb.push_bind(cursor);
        }

        qb.push(" ORDER BY id ASC LIMIT ");
        // Fetch one extra row to decide whether another page exists.
        qb.push_bind(limit + 1);

        let rows: Vec<RunRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        let has_more = rows.len() as i64 > limit;

        let items = rows
            .into_iter()
            .take(limit as usize)
            .map(row_to_run)
            .collect::<DomainResult<Vec<_>>>()?;

        let next_cursor = if has_more {
            items.last().map(|run| run.id)
        } else {
            None
        };

        Ok(RunPage { items, next_cursor })
    }

    async fn details(&self, run_id: i64, institution_id: i64) -> DomainResult<Option<RunDetails>> {
        let row: Option<RunRow> =
            sqlx::query_as("SELECT * FROM scheduling_runs WHERE id = ? AND institution_id = ?")
                .bind(run_id)
                .bind(institution_id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let run = row_to_run(row)?;

        let exam_rows: Vec<ExamRow> = sqlx::query_as(
            "SELECT e.id, e.name, e.exam_type, e.scheduled_at, e.percentage,
                    e.status, e.locked, c.name AS class_name, co.name AS course_name,
                    e.schedule_run_id
             FROM exams e
             JOIN class_courses cc ON cc.id = e.class_course_id
             JOIN classes c ON c.id = cc.class_id
             JOIN courses co ON co.id = cc.course_id
             WHERE e.schedule_run_id = ?
             ORDER BY e.scheduled_at, e.id",
        )
        .bind(run_id)
        .fetch_all(&self.pool)
        .await?;

        let exams = exam_rows
            .into_iter()
            .map(row_to_exam)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Some(RunDetails { run, exams }))
    }
}
