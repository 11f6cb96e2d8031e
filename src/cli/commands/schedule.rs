//! `examsched schedule` — run one scheduling pass.

use anyhow::Result;
use clap::Args;
use console::style;

use crate::cli::commands::{build_orchestrator, parse_date_arg};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::candidate::SchedulingContext;
use crate::domain::models::run::{RunSummary, ScheduleRequest};

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Institution id
    #[arg(long)]
    pub institution: i64,

    /// Academic year id
    #[arg(long)]
    pub year: i64,

    /// Exam type id
    #[arg(long)]
    pub exam_type: i64,

    /// Percentage weight for each created exam (1-100)
    #[arg(long)]
    pub percentage: i64,

    /// Window start (YYYY-MM-DD or RFC3339)
    #[arg(long)]
    pub from: String,

    /// Window end (YYYY-MM-DD or RFC3339), inclusive
    #[arg(long)]
    pub to: String,

    /// Semester id
    #[arg(long)]
    pub semester: Option<i64>,

    /// Restrict to specific class ids (repeatable)
    #[arg(long = "class")]
    pub classes: Vec<i64>,

    /// Profile id of the scheduling actor, for audit attribution
    #[arg(long)]
    pub actor: Option<i64>,
}

#[derive(Debug, serde::Serialize)]
struct ScheduleOutput {
    summary: RunSummary,
}

impl CommandOutput for ScheduleOutput {
    fn to_human(&self) -> String {
        let s = &self.summary;
        let mut lines = vec![
            format!(
                "Scheduled {} for {} ({} classes, {} class-courses)",
                style(&s.exam_type).bold(),
                s.academic_year,
                s.class_count,
                s.class_course_count
            ),
            format!(
                "  created: {}  skipped: {}  duplicates: {}  conflicts: {}",
                style(s.created).green(),
                s.skipped,
                s.duplicates,
                s.conflicts
            ),
        ];
        match s.run_id {
            Some(run_id) => lines.push(format!("  run id: {run_id}")),
            None => lines.push("  run id: (not recorded)".to_string()),
        }
        if let Some(err) = &s.persistence_error {
            lines.push(format!(
                "  {} run recording failed: {err}",
                style("warning:").yellow()
            ));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.summary).unwrap_or_default()
    }
}

pub async fn execute(args: ScheduleArgs, json_mode: bool) -> Result<()> {
    let (orchestrator, _config) = build_orchestrator().await?;

    let request = ScheduleRequest {
        context: SchedulingContext {
            institution_id: args.institution,
            academic_year_id: args.year,
            semester_id: args.semester,
            class_ids: if args.classes.is_empty() {
                None
            } else {
                Some(args.classes)
            },
        },
        exam_type_id: args.exam_type,
        percentage: args.percentage,
        date_start: parse_date_arg(&args.from)?,
        date_end: parse_date_arg(&args.to)?,
        actor_profile_id: args.actor,
    };

    let summary = orchestrator.schedule(&request).await?;
    output(&ScheduleOutput { summary }, json_mode);
    Ok(())
}
