use std::path::PathBuf;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use crate::calendar::AccessToken;
use crate::completion::ChapterTransition;
use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::plan::Plan;
use crate::planner::Planner;
use crate::state::{PlanningState, SubjectField, SubjectId};

#[derive(Parser)]
#[command(name = "study-planner", about = "Plan study time across subjects, progress and deadlines")]
pub struct Cli {
    /// Config file (defaults to config.toml in the app data directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// State file (overrides storage.state_path)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List subjects, progress and daily hours
    Show,
    /// Append a subject
    Add {
        #[arg(long)]
        name: Option<String>,
        /// Total chapter count
        #[arg(long)]
        chapters: Option<String>,
    },
    /// Edit the subject at a position, as listed by `show`
    Edit {
        index: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        chapters: Option<String>,
    },
    /// Set the completed-chapter count of a subject
    Progress { subject: String, completed: u32 },
    /// Set a subject's deadline (YYYY-MM-DD); omit the date to clear it
    Deadline {
        subject: String,
        #[arg(value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Set per-chapter difficulty weights, e.g. "1,1.5,2"
    Difficulty { subject: String, weights: String },
    /// Set daily study capacity in hours (1-24)
    Hours { hours: u8 },
    /// Request a study plan and print it
    Plan,
    /// Mark one chapter of a subject as done
    Done { subject: String },
    /// Generate a plan and push its schedule to the calendar
    Export {
        /// Calendar access token from an external sign-in
        #[arg(long, env = "STUDY_PLANNER_CALENDAR_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// Forget all subjects and settings
    Clear,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn resolve_subject(planner: &Planner, name: &str) -> Result<SubjectId, PlannerError> {
    planner
        .state
        .snapshot()
        .find_by_name(name)
        .map(|s| s.id)
        .ok_or_else(|| PlannerError::validation(format!("No subject named '{}'", name)))
}

fn apply_fields(
    planning: &mut PlanningState,
    index: usize,
    name: Option<String>,
    chapters: Option<String>,
) -> Result<(), PlannerError> {
    if let Some(name) = name {
        planning.update_subject_field(index, SubjectField::Name(name))?;
    }
    if let Some(chapters) = chapters {
        planning.update_subject_field(index, SubjectField::TotalChapters(chapters))?;
    }
    Ok(())
}

/// Run one command against the planner built from `config`.
pub async fn execute(command: Command, config: &PlannerConfig) -> Result<(), PlannerError> {
    let planner = Planner::from_config(config).await?;
    let result = dispatch(&planner, command).await;

    if let Some(status) = planner.state.status().filter(|s| !s.is_error()) {
        println!("{}", status.text());
    }
    if let Err(e) = planner.state.teardown().await {
        tracing::warn!(error = %e, "Final save failed");
    }
    result
}

async fn dispatch(planner: &Planner, command: Command) -> Result<(), PlannerError> {
    let state = &planner.state;
    match command {
        Command::Show => {
            print_state(&state.snapshot());
        }
        Command::Add { name, chapters } => {
            state
                .commit(|planning| {
                    planning.add_subject();
                    let index = planning.subjects.len() - 1;
                    apply_fields(planning, index, name, chapters)
                })
                .await?;
            print_state(&state.snapshot());
        }
        Command::Edit { index, name, chapters } => {
            state
                .commit(|planning| apply_fields(planning, index, name, chapters))
                .await?;
            print_state(&state.snapshot());
        }
        Command::Progress { subject, completed } => {
            let id = resolve_subject(planner, &subject)?;
            state.commit(|planning| planning.set_progress(id, completed)).await?;
        }
        Command::Deadline { subject, date } => {
            let id = resolve_subject(planner, &subject)?;
            state.commit(|planning| planning.set_deadline(id, date)).await?;
        }
        Command::Difficulty { subject, weights } => {
            let id = resolve_subject(planner, &subject)?;
            state
                .commit(|planning| planning.set_difficulties(id, &weights))
                .await?;
        }
        Command::Hours { hours } => {
            state.commit(|planning| planning.set_daily_hours(hours)).await?;
        }
        Command::Plan => {
            let outcome = planner.orchestrator.request_plan().await?;
            print_plan(&outcome.plan);
        }
        Command::Done { subject } => {
            let outcome = planner.completion.mark_chapter_done_by_name(&subject).await?;
            match outcome.transition {
                ChapterTransition::Advanced { completed } => {
                    println!("{}: {} chapters done", outcome.subject, completed)
                }
                ChapterTransition::Finished => println!("{}: all chapters done", outcome.subject),
            }
            match outcome.refresh {
                Ok(refreshed) => print_plan(&refreshed.plan),
                Err(e) => eprintln!("{}", e.message),
            }
        }
        Command::Export { token } => {
            let token = token.as_deref().and_then(AccessToken::parse);
            // Plans are session-local, so export needs a fresh one
            if token.is_some() {
                planner.orchestrator.request_plan().await?;
            }
            let report = planner.exporter.export(state, token.as_ref()).await?;
            for failure in report.failures() {
                eprintln!(
                    "failed: {} on {}: {}",
                    failure.summary,
                    failure.date,
                    failure.error.as_deref().unwrap_or_default()
                );
            }
        }
        Command::Clear => {
            state.reset().await?;
            println!("Cleared all subjects and settings");
        }
    }
    Ok(())
}

fn print_state(planning: &PlanningState) {
    println!("Daily study hours: {}", planning.daily_hours);
    for (index, subject) in planning.subjects.iter().enumerate() {
        let name = if subject.name.is_empty() { "(unnamed)" } else { subject.name.as_str() };
        let chapters = subject
            .total_chapters
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        let deadline = subject
            .deadline
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let weights = subject
            .difficulties
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let color = planning.color_for(&subject.name).unwrap_or("-");
        println!(
            "[{}] {:<20} chapters {:>3}  done {:>3}  deadline {}  weights [{}]  color {}",
            index, name, chapters, subject.completed, deadline, weights, color
        );
    }
}

fn print_plan(plan: &Plan) {
    println!("Prioritized tasks:");
    for task in &plan.tasks {
        println!(
            "  {:<20} done {:>3}  remaining {:>3}  deadline {}  days left {:>4}  priority {:>6.2}  {:>3.0}%",
            task.subject,
            task.done_chapters,
            task.remaining_chapters,
            task.deadline,
            task.days_left,
            task.priority,
            task.completion_ratio() * 100.0
        );
    }

    println!("Schedule:");
    for (date, items) in &plan.daily_schedule {
        if items.is_empty() {
            continue;
        }
        println!("  {}", date);
        for item in items {
            println!("    {} - Chapter {} ({}hr)", item.subject, item.chapter, item.hours);
        }
    }

    println!("Progress:");
    for entry in plan.progress_breakdown() {
        println!(
            "  {:<20} {} completed / {} remaining",
            entry.subject, entry.completed, entry.remaining
        );
    }
}
