//! Plan request/response types and the orchestration around them.

pub mod client;
pub mod orchestrator;

use std::collections::BTreeMap;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::error::PlannerError;
use crate::state::PlanningState;

pub use client::{HttpPlanService, PlanService};
pub use orchestrator::{PlanOrchestrator, PlanOutcome};

pub const EMPTY_SYLLABUS_MESSAGE: &str = "Please add at least one subject.";

/// One ranked entry of the prioritized task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub subject: String,
    #[serde(alias = "doneChapters")]
    pub done_chapters: i64,
    #[serde(alias = "remainingChapters")]
    pub remaining_chapters: i64,
    #[serde(alias = "totalChapters")]
    pub total_chapters: i64,
    pub deadline: String,
    #[serde(alias = "daysLeft")]
    pub days_left: i64,
    pub priority: f64,
}

impl Task {
    /// Fraction of chapters done, for progress bars.
    pub fn completion_ratio(&self) -> f64 {
        if self.total_chapters <= 0 {
            return 0.0;
        }
        self.done_chapters as f64 / self.total_chapters as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub subject: String,
    pub chapter: u32,
    pub hours: f64,
}

/// Output of the prioritization service. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Date string (YYYY-MM-DD) to that day's items; ISO dates sort chronologically
    #[serde(default, alias = "dailySchedule")]
    pub daily_schedule: BTreeMap<String, Vec<ScheduledItem>>,
}

/// A day whose scheduled hours exceed the daily capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct OverloadedDay {
    pub date: String,
    pub hours: f64,
}

/// Completed vs remaining chapters for one subject of a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectProgress {
    pub subject: String,
    pub completed: i64,
    pub remaining: i64,
}

impl Plan {
    /// Days whose summed hours exceed `daily_hours`, in date order.
    pub fn overloaded_days(&self, daily_hours: u8) -> Vec<OverloadedDay> {
        let capacity = f64::from(daily_hours);
        self.daily_schedule
            .iter()
            .filter_map(|(date, items)| {
                let hours: f64 = items.iter().map(|item| item.hours).sum();
                (hours > capacity).then(|| OverloadedDay {
                    date: date.clone(),
                    hours,
                })
            })
            .collect()
    }

    /// Every scheduled item in schedule order: by date, then item order.
    pub fn scheduled_items(&self) -> impl Iterator<Item = (&str, &ScheduledItem)> {
        self.daily_schedule
            .iter()
            .flat_map(|(date, items)| items.iter().map(move |item| (date.as_str(), item)))
    }

    pub fn progress_breakdown(&self) -> Vec<SubjectProgress> {
        self.tasks
            .iter()
            .map(|task| SubjectProgress {
                subject: task.subject.clone(),
                completed: task.done_chapters,
                remaining: task.remaining_chapters,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyllabusEntry {
    pub chapters: u32,
}

/// Body of the request sent to the prioritization service.
/// Everything is keyed by subject display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub syllabus: BTreeMap<String, SyllabusEntry>,
    pub progress: BTreeMap<String, u32>,
    pub deadlines: BTreeMap<String, NaiveDate>,
    pub difficulties: BTreeMap<String, Vec<f64>>,
    pub daily_hours: u8,
}

impl PlanRequest {
    /// Build the request from plannable subjects (named, with a chapter count).
    /// Fails with a validation error when there are none.
    pub fn from_state(state: &PlanningState) -> Result<Self, PlannerError> {
        let mut request = PlanRequest {
            syllabus: BTreeMap::new(),
            progress: BTreeMap::new(),
            deadlines: BTreeMap::new(),
            difficulties: BTreeMap::new(),
            daily_hours: state.daily_hours,
        };

        for subject in state.subjects.iter().filter(|s| s.is_plannable()) {
            let Some(chapters) = subject.total_chapters else {
                continue;
            };
            let name = subject.name.clone();

            if request.syllabus.contains_key(&name) {
                tracing::warn!(name = %name, subject = %subject.id, "Duplicate subject name, later entry wins");
                request.deadlines.remove(&name);
                request.difficulties.remove(&name);
            }

            request.syllabus.insert(name.clone(), SyllabusEntry { chapters });
            request.progress.insert(name.clone(), subject.completed);
            if let Some(deadline) = subject.deadline {
                request.deadlines.insert(name.clone(), deadline);
            }
            if !subject.difficulties.is_empty() {
                request.difficulties.insert(name, subject.difficulties.clone());
            }
        }

        if request.syllabus.is_empty() {
            return Err(PlannerError::validation(EMPTY_SYLLABUS_MESSAGE));
        }
        Ok(request)
    }
}
