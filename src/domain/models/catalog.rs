//! Read models for catalog entities owned by the surrounding system.
//!
//! The engine only ever reads these; institution/program/faculty CRUD
//! lives outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An academic year under an institution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicYear {
    pub id: i64,
    pub institution_id: i64,
    pub name: String,
    pub starts_on: DateTime<Utc>,
    pub ends_on: DateTime<Utc>,
}

/// A named category of assessment ("Midterm", "Final", ...).
///
/// The name doubles as the exam's `type` label and as the
/// duplicate-detection key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamType {
    pub id: i64,
    pub institution_id: i64,
    pub name: String,
}

/// The profile of the actor who triggered a run, for audit attribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub institution_id: i64,
    pub display_name: String,
}
