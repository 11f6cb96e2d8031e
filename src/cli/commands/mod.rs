//! CLI command implementations.

pub mod init;
pub mod preview;
pub mod runs;
pub mod schedule;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

use crate::adapters::sqlite::{
    initialize_database, PoolConfig, SqliteCandidateRepository, SqliteCatalogFinder,
    SqliteExamGateway, SqliteRunStore,
};
use crate::domain::models::config::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::services::ScheduleOrchestrator;

/// Load config and wire the orchestrator over the project database.
pub(crate) async fn build_orchestrator() -> Result<(ScheduleOrchestrator, Config)> {
    let config = ConfigLoader::load()?;
    let pool = initialize_database(
        &format!("sqlite:{}", config.database.path),
        PoolConfig::from(&config.database),
    )
    .await
        .with_context(|| format!("failed to open database at {}", config.database.path))?;

    let gateway = Arc::new(SqliteExamGateway::new(pool.clone()));
    let orchestrator = ScheduleOrchestrator::new(
        Arc::new(SqliteCandidateRepository::new(pool.clone())),
        gateway.clone(),
        gateway,
        Arc::new(SqliteCatalogFinder::new(pool.clone())),
        Arc::new(SqliteRunStore::new(pool)),
    );
    Ok((orchestrator, config))
}

/// Accept either a bare date (midnight UTC) or a full RFC3339 instant.
pub(crate) fn parse_date_arg(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid date '{s}': expected YYYY-MM-DD or RFC3339"))
}
