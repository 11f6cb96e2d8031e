pub mod candidate;
pub mod catalog;
pub mod config;
pub mod exam;
pub mod run;

pub use candidate::{SchedulerClass, SchedulerClassCourse, SchedulingContext};
pub use catalog::{AcademicYear, ExamType, Profile};
pub use config::{Config, DatabaseConfig, LoggingConfig, SchedulingConfig};
pub use exam::{CreateOutcome, Exam, ExamSpec, RejectReason};
pub use run::{
    NewSchedulingRun, RunDetails, RunFilter, RunPage, RunSummary, ScheduleRequest, SchedulingRun,
};
