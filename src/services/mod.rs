pub mod date_distributor;
pub mod schedule_orchestrator;

pub use date_distributor::distribute;
pub use schedule_orchestrator::{Preview, ScheduleOrchestrator};
