//! Candidate domain models for a scheduling pass.
//!
//! A scheduling pass operates on classes and their class-course pairs.
//! The class-course is the unit of scheduling: one exam is created per
//! class-course per run, unless an exam of the requested type already
//! covers it.

use serde::{Deserialize, Serialize};

/// The resolved scope of one preview or schedule invocation.
///
/// Not persisted; every resolved class must belong to both the
/// institution and the requested academic year (and semester, when
/// given).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingContext {
    pub institution_id: i64,
    pub academic_year_id: i64,
    /// Narrow candidates to a single semester.
    pub semester_id: Option<i64>,
    /// Narrow candidates to an explicit subset of class ids.
    /// Ids outside the institution/year scope are silently ignored.
    pub class_ids: Option<Vec<i64>>,
}

/// A class eligible for scheduling, annotated with its class-course count.
///
/// Used for preview display and for deriving candidate class-courses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerClass {
    pub id: i64,
    pub name: String,
    pub program_id: i64,
    pub program_name: String,
    pub class_course_count: i64,
}

/// One class-course pair, the unit against which an exam is scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerClassCourse {
    pub id: i64,
    pub class_id: i64,
    pub course_id: i64,
    pub course_name: String,
}
