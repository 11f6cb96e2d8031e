//! SQLite adapter for `CandidateRepository`.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::domain::errors::DomainResult;
use crate::domain::models::candidate::{SchedulerClass, SchedulerClassCourse, SchedulingContext};
use crate::domain::ports::candidate_repository::CandidateRepository;

#[derive(Clone)]
pub struct SqliteCandidateRepository {
    pool: SqlitePool,
}

impl SqliteCandidateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ClassRow {
    id: i64,
    name: String,
    program_id: i64,
    program_name: String,
    class_course_count: i64,
}

#[derive(sqlx::FromRow)]
struct ClassCourseRow {
    id: i64,
    class_id: i64,
    course_id: i64,
    course_name: String,
}

#[async_trait]
impl CandidateRepository for SqliteCandidateRepository {
    async fn classes_for_scheduling(
        &self,
        context: &SchedulingContext,
    ) -> DomainResult<Vec<SchedulerClass>> {
        if matches!(context.class_ids.as_deref(), Some([])) {
            return Ok(vec![]);
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT c.id, c.name, p.id AS program_id, p.name AS program_name, \
                    COUNT(cc.id) AS class_course_count \
             FROM classes c \
             JOIN programs p ON p.id = c.program_id \
             LEFT JOIN class_courses cc ON cc.class_id = c.id \
             WHERE p.institution_id = ",
        );
        qb.push_bind(context.institution_id);
        qb.push(" AND c.academic_year_id = ");
        qb.push_bind(context.academic_year_id);

        if let Some(semester_id) = context.semester_id {
            qb.push(" AND c.semester_id = ");
            qb.push_bind(semester_id);
        }

        if let Some(ids) = &context.class_ids {
            qb.push(" AND c.id IN (");
            let mut separated = qb.separated(", ");
            for id in ids {
                separated.push_bind(*id);
            }
            qb.push(")");
        }

        qb.push(" GROUP BY c.id, c.name, p.id, p.name ORDER BY c.name");

        let rows: Vec<ClassRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|row| SchedulerClass {
                id: row.id,
                name: row.name,
                program_id: row.program_id,
                program_name: row.program_name,
                class_course_count: row.class_course_count,
            })
            .collect())
    }

    async fn class_courses_for(
        &self,
        class_ids: &[i64],
    ) -> DomainResult<Vec<SchedulerClassCourse>> {
        if class_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT cc.id, cc.class_id, cc.course_id, co.name AS course_name \
             FROM class_courses cc \
             JOIN classes c ON c.id = cc.class_id \
             JOIN courses co ON co.id = cc.course_id \
             WHERE cc.class_id IN (",
        );
        let mut separated = qb.separated(", ");
        for id in class_ids {
            separated.push_bind(*id);
        }
        qb.push(") ORDER BY c.name, co.name");

        let rows: Vec<ClassCourseRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|row| SchedulerClassCourse {
                id: row.id,
                class_id: row.class_id,
                course_id: row.course_id,
                course_name: row.course_name,
            })
            .collect())
    }
}
