//! Per-subject progress, deadlines and difficulty weights.

use chrono::NaiveDate;
use crate::error::PlannerError;
use crate::state::model::{PlanningState, SubjectId, SubjectRecord, MAX_DAILY_HOURS, MIN_DAILY_HOURS};

/// Weight used for any token that is not a usable positive number.
pub const NEUTRAL_WEIGHT: f64 = 1.0;

/// Parse a comma-separated weight list. Never fails: bad tokens become 1.
///
/// `"1, x, 2.5,"` parses to `[1.0, 1.0, 2.5, 1.0]`.
pub fn parse_difficulties(raw: &str) -> Vec<f64> {
    raw.split(',')
        .map(|token| {
            token
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|w| w.is_finite() && *w > 0.0)
                .unwrap_or(NEUTRAL_WEIGHT)
        })
        .collect()
}

impl PlanningState {
    /// Overwrite the completed-chapter count. Not clamped to the total.
    pub fn set_progress(&mut self, id: SubjectId, completed: u32) -> Result<(), PlannerError> {
        let subject = self.subject_mut(id)?;
        if let Some(total) = subject.total_chapters {
            if completed > total {
                tracing::debug!(subject = %id, completed, total, "Progress exceeds chapter total");
            }
        }
        subject.completed = completed;
        Ok(())
    }

    pub fn set_deadline(&mut self, id: SubjectId, deadline: Option<NaiveDate>) -> Result<(), PlannerError> {
        self.subject_mut(id)?.deadline = deadline;
        Ok(())
    }

    pub fn set_difficulties(&mut self, id: SubjectId, raw: &str) -> Result<(), PlannerError> {
        self.subject_mut(id)?.difficulties = parse_difficulties(raw);
        Ok(())
    }

    /// Drop a subject together with its progress, deadline and weights.
    pub fn remove_subject(&mut self, id: SubjectId) -> Option<SubjectRecord> {
        let index = self.index_of(id)?;
        let removed = self.subjects.remove(index);
        tracing::debug!(subject = %id, name = %removed.name, "Subject removed");
        Some(removed)
    }

    pub fn set_daily_hours(&mut self, hours: u8) -> Result<(), PlannerError> {
        if !Self::is_valid_daily_hours(hours) {
            return Err(PlannerError::validation(format!(
                "Daily study hours must be between {} and {}",
                MIN_DAILY_HOURS, MAX_DAILY_HOURS
            ))
            .with_context(format!("got {}", hours)));
        }
        self.daily_hours = hours;
        Ok(())
    }
}
