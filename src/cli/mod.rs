//! Command-line interface for the exam scheduling engine.

pub mod commands;
pub mod display;
pub mod output;

use clap::{Parser, Subcommand};

pub use output::{output, CommandOutput};

#[derive(Parser, Debug)]
#[command(name = "examsched", version, about = "Automated exam scheduling engine")]
pub struct Cli {
    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize project config and database
    Init(commands::init::InitArgs),
    /// Preview which classes a scheduling run would touch
    Preview(commands::preview::PreviewArgs),
    /// Schedule exams across a date window
    Schedule(commands::schedule::ScheduleArgs),
    /// Inspect past scheduling runs
    Runs(commands::runs::RunsArgs),
}

/// Print an error in the selected output mode and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("error: {err:#}");
    }
    std::process::exit(1);
}
