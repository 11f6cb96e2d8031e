//! Examsched - Automated Exam Scheduling Engine
//!
//! Examsched discovers every eligible class/class-course pair for an
//! institution's academic year, filters out pairs already covered by an
//! exam of the requested type, distributes new exam dates evenly across
//! a window, delegates creation to the exam-management gateway, and
//! durably records each run for audit and idempotent re-runs.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, error taxonomy, and port traits
//! - **Service Layer** (`services`): Date distribution and the orchestrator
//! - **Adapters** (`adapters`): SQLite implementations of the ports
//! - **Infrastructure** (`infrastructure`): Configuration loading
//! - **CLI Layer** (`cli`): Command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Config, CreateOutcome, Exam, ExamSpec, NewSchedulingRun, RejectReason, RunDetails, RunFilter,
    RunPage, RunSummary, ScheduleRequest, SchedulerClass, SchedulerClassCourse, SchedulingContext,
    SchedulingRun,
};
pub use domain::ports::{
    CandidateRepository, CatalogFinder, DuplicateFilter, ExamCreationGateway, RunStore,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{distribute, Preview, ScheduleOrchestrator};
