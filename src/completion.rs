use crate::error::PlannerError;
use crate::notifications::NotificationGateway;
use crate::plan::{PlanOrchestrator, PlanOutcome};
use crate::state::{AppState, StatusMessage, SubjectId};

pub const COMPLETION_TITLE: &str = "Chapter Completed";

/// What a completed chapter did to its subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterTransition {
    /// Progress moved to `completed`
    Advanced { completed: u32 },
    /// The last chapter was done; the subject is gone from the state
    Finished,
}

#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub subject: String,
    pub transition: ChapterTransition,
    /// Plan refresh issued after the change was committed
    pub refresh: Result<PlanOutcome, PlannerError>,
}

/// Applies "chapter completed" events and refreshes the plan afterwards.
#[derive(Clone)]
pub struct CompletionWorkflow {
    state: AppState,
    orchestrator: PlanOrchestrator,
    notifications: NotificationGateway,
    icon: Option<String>,
}

impl CompletionWorkflow {
    pub fn new(orchestrator: PlanOrchestrator, notifications: NotificationGateway, icon: Option<String>) -> Self {
        CompletionWorkflow {
            state: orchestrator.state().clone(),
            orchestrator,
            notifications,
            icon,
        }
    }

    /// Record one finished chapter for `id`.
    ///
    /// When `completed + 1` reaches the chapter total the subject is removed
    /// with all its data. The plan refresh runs only after the change is
    /// committed and saved; its failure is reported, not propagated.
    pub async fn mark_chapter_done(&self, id: SubjectId) -> Result<CompletionOutcome, PlannerError> {
        let (subject, transition) = self
            .state
            .commit(|planning| {
                let record = planning
                    .subject(id)
                    .ok_or_else(|| PlannerError::validation(format!("Unknown subject {}", id)))?;
                let name = record.name.clone();
                let completed = record.completed;
                let total = record.total_chapters.unwrap_or(0);

                if completed.saturating_add(1) >= total {
                    planning.remove_subject(id);
                    Ok((name, ChapterTransition::Finished))
                } else {
                    let completed = completed + 1;
                    planning.set_progress(id, completed)?;
                    Ok((name, ChapterTransition::Advanced { completed }))
                }
            })
            .await?;

        tracing::info!(subject = %id, name = %subject, transition = ?transition, "Chapter completed");

        self.notifications
            .emit(
                COMPLETION_TITLE,
                &format!("You completed a chapter of {}", subject),
                self.icon.as_deref(),
            )
            .await;

        let refresh = self.orchestrator.request_plan().await;
        if let Err(e) = &refresh {
            tracing::debug!(error = %e, "Plan refresh after completion failed");
        }

        Ok(CompletionOutcome {
            subject,
            transition,
            refresh,
        })
    }

    /// Same as [`mark_chapter_done`](Self::mark_chapter_done), addressing the
    /// first subject with this display name (plan tasks carry names only).
    pub async fn mark_chapter_done_by_name(&self, name: &str) -> Result<CompletionOutcome, PlannerError> {
        let id = self
            .state
            .snapshot()
            .find_by_name(name)
            .map(|s| s.id)
            .ok_or_else(|| {
                let e = PlannerError::validation(format!("No subject named '{}'", name));
                self.state.set_status(StatusMessage::Error(e.message.clone()));
                e
            })?;
        self.mark_chapter_done(id).await
    }
}
