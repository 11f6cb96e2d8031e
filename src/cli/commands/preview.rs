//! `examsched preview` — show which classes a run would touch.

use anyhow::Result;
use clap::Args;
use comfy_table::Cell;

use crate::cli::commands::build_orchestrator;
use crate::cli::display::{list_table, render_list};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::candidate::SchedulingContext;
use crate::services::Preview;

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Institution id
    #[arg(long)]
    pub institution: i64,

    /// Academic year id
    #[arg(long)]
    pub year: i64,

    /// Semester id
    #[arg(long)]
    pub semester: Option<i64>,

    /// Restrict to specific class ids (repeatable)
    #[arg(long = "class")]
    pub classes: Vec<i64>,
}

#[derive(Debug, serde::Serialize)]
struct PreviewOutput {
    preview: Preview,
}

impl CommandOutput for PreviewOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "class", "program", "class-courses"]);
        for class in &self.preview.classes {
            table.add_row(vec![
                Cell::new(class.id),
                Cell::new(&class.name),
                Cell::new(&class.program_name),
                Cell::new(class.class_course_count),
            ]);
        }
        format!(
            "Academic year: {}\n{}",
            self.preview.academic_year.name,
            render_list("class", &table, self.preview.classes.len())
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.preview).unwrap_or_default()
    }
}

pub async fn execute(args: PreviewArgs, json_mode: bool) -> Result<()> {
    let (orchestrator, _config) = build_orchestrator().await?;

    let context = SchedulingContext {
        institution_id: args.institution,
        academic_year_id: args.year,
        semester_id: args.semester,
        class_ids: if args.classes.is_empty() {
            None
        } else {
            Some(args.classes)
        },
    };

    let preview = orchestrator.preview(&context).await?;
    output(&PreviewOutput { preview }, json_mode);
    Ok(())
}
