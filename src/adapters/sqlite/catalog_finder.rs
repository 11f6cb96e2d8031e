//! SQLite adapter for `CatalogFinder`.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::adapters::sqlite::parse_datetime;
use crate::domain::errors::DomainResult;
use crate::domain::models::catalog::{AcademicYear, ExamType, Profile};
use crate::domain::ports::catalog_finder::CatalogFinder;

#[derive(Clone)]
pub struct SqliteCatalogFinder {
    pool: SqlitePool,
}

impl SqliteCatalogFinder {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AcademicYearRow {
    id: i64,
    institution_id: i64,
    name: String,
    starts_on: String,
    ends_on: String,
}

#[async_trait]
impl CatalogFinder for SqliteCatalogFinder {
    async fn academic_year(
        &self,
        id: i64,
        institution_id: i64,
    ) -> DomainResult<Option<AcademicYear>> {
        let row: Option<AcademicYearRow> =
            sqlx::query_as("SELECT * FROM academic_years WHERE id = ? AND institution_id = ?")
                .bind(id)
                .bind(institution_id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|row| {
            Ok(AcademicYear {
                id: row.id,
                institution_id: row.institution_id,
                name: row.name,
                starts_on: parse_datetime(&row.starts_on)?,
                ends_on: parse_datetime(&row.ends_on)?,
            })
        })
        .transpose()
    }

    async fn exam_type(&self, id: i64, institution_id: i64) -> DomainResult<Option<ExamType>> {
        let row: Option<(i64, i64, String)> = sqlx::query_as(
            "SELECT id, institution_id, name FROM exam_types WHERE id = ? AND institution_id = ?",
        )
        .bind(id)
        .bind(institution_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, institution_id, name)| ExamType {
            id,
            institution_id,
            name,
        }))
    }

    async fn profile(&self, id: i64) -> DomainResult<Option<Profile>> {
        let row: Option<(i64, i64, String)> =
            sqlx::query_as("SELECT id, institution_id, display_name FROM profiles WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(id, institution_id, display_name)| Profile {
            id,
            institution_id,
            display_name,
        }))
    }
}
