//! `examsched runs` — list and inspect past scheduling runs.

use anyhow::Result;
use clap::{Args, Subcommand};
use comfy_table::Cell;

use crate::cli::commands::build_orchestrator;
use crate::cli::display::{list_table, render_list};
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::run::{RunDetails, RunFilter, RunPage};

#[derive(Args, Debug)]
pub struct RunsArgs {
    #[command(subcommand)]
    pub command: RunsCommands,
}

#[derive(Subcommand, Debug)]
pub enum RunsCommands {
    /// List scheduling runs, oldest first
    List {
        /// Institution id
        #[arg(long)]
        institution: i64,

        /// Filter by academic year id
        #[arg(long)]
        year: Option<i64>,

        /// Filter by exam type id
        #[arg(long)]
        exam_type: Option<i64>,

        /// Return runs with id greater than this
        #[arg(long)]
        cursor: Option<i64>,

        /// Page size
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Show one run and the exams it created
    Show {
        /// Institution id
        #[arg(long)]
        institution: i64,

        /// Run id
        run_id: i64,
    },
}

#[derive(Debug, serde::Serialize)]
struct RunListOutput {
    page: RunPage,
}

impl CommandOutput for RunListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&[
            "id", "year", "type", "window", "created", "skipped", "dup", "conflict",
        ]);
        for run in &self.page.items {
            table.add_row(vec![
                Cell::new(run.id),
                Cell::new(run.academic_year_id),
                Cell::new(run.exam_type_id),
                Cell::new(format!(
                    "{} .. {}",
                    run.date_start.format("%Y-%m-%d"),
                    run.date_end.format("%Y-%m-%d")
                )),
                Cell::new(run.created_count),
                Cell::new(run.skipped_count),
                Cell::new(run.duplicate_count),
                Cell::new(run.conflict_count),
            ]);
        }
        let mut out = render_list("run", &table, self.page.items.len());
        if let Some(cursor) = self.page.next_cursor {
            out.push_str(&format!("\nmore available: --cursor {cursor}"));
        }
        out
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.page).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
struct RunDetailsOutput {
    details: RunDetails,
}

impl CommandOutput for RunDetailsOutput {
    fn to_human(&self) -> String {
        let run = &self.details.run;
        let mut table = list_table(&["id", "exam", "class", "date", "pct", "status"]);
        for exam in &self.details.exams {
            table.add_row(vec![
                Cell::new(exam.id),
                Cell::new(truncate(&exam.name, 40)),
                Cell::new(&exam.class_name),
                Cell::new(exam.scheduled_at.format("%Y-%m-%d %H:%M")),
                Cell::new(exam.percentage),
                Cell::new(&exam.status),
            ]);
        }
        format!(
            "Run {} ({}): created {}, skipped {}, duplicates {}, conflicts {}\n{}",
            run.id,
            run.created_at.format("%Y-%m-%d %H:%M"),
            run.created_count,
            run.skipped_count,
            run.duplicate_count,
            run.conflict_count,
            render_list("exam", &table, self.details.exams.len())
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.details).unwrap_or_default()
    }
}

pub async fn execute(args: RunsArgs, json_mode: bool) -> Result<()> {
    let (orchestrator, config) = build_orchestrator().await?;

    match args.command {
        RunsCommands::List {
            institution,
            year,
            exam_type,
            cursor,
            limit,
        } => {
            let filter = RunFilter {
                academic_year_id: year,
                exam_type_id: exam_type,
                cursor,
                limit: limit.or(Some(config.scheduling.history_page_size)),
            };
            let page = orchestrator.history(institution, &filter).await?;
            output(&RunListOutput { page }, json_mode);
        }
        RunsCommands::Show { institution, run_id } => {
            let details = orchestrator.details(institution, run_id).await?;
            output(&RunDetailsOutput { details }, json_mode);
        }
    }
    Ok(())
}
