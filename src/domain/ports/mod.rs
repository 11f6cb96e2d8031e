//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces that infrastructure adapters must implement:
//! - `CandidateRepository`: eligible class / class-course queries
//! - `DuplicateFilter`: exam-type-name duplicate detection
//! - `ExamCreationGateway`: exam creation contract (external collaborator)
//! - `CatalogFinder`: read-only catalog lookups
//! - `RunStore`: scheduling-run persistence and history
//!
//! These traits define the contracts that allow the domain to be
//! independent of specific infrastructure implementations.

pub mod candidate_repository;
pub mod catalog_finder;
pub mod duplicate_filter;
pub mod exam_gateway;
pub mod run_store;

pub use candidate_repository::CandidateRepository;
pub use catalog_finder::CatalogFinder;
pub use duplicate_filter::DuplicateFilter;
pub use exam_gateway::ExamCreationGateway;
pub use run_store::RunStore;
