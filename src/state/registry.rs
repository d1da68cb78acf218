//! Structural edits on the ordered subject list.

use crate::error::PlannerError;
use crate::state::model::{PlanningState, SubjectField, SubjectId, SubjectRecord};

/// Row colors for subject-tinted views, indexed by registry position.
pub const PALETTE: [&str; 12] = [
    "#ffd6d6", "#d6e5ff", "#d6ffd6", "#fff4d6", "#e5d6ff", "#ffd6f2",
    "#f9d6ff", "#d6fff8", "#ffe6cc", "#d6fff4", "#f7ffd6", "#ffd6cc",
];

impl PlanningState {
    /// Append a blank subject. Names are not deduplicated.
    pub fn add_subject(&mut self) -> SubjectId {
        let record = SubjectRecord::empty();
        let id = record.id;
        self.subjects.push(record);
        tracing::debug!(subject = %id, position = self.subjects.len() - 1, "Subject added");
        id
    }

    /// Edit the subject at a registry position, named or not.
    pub fn update_subject_field(
        &mut self,
        index: usize,
        field: SubjectField,
    ) -> Result<SubjectId, PlannerError> {
        let count = self.subjects.len();
        let subject = self.subjects.get_mut(index).ok_or_else(|| {
            PlannerError::validation(format!("No subject at position {}", index))
                .with_context(format!("registry has {} subjects", count))
        })?;

        match field {
            SubjectField::Name(name) => subject.name = name,
            SubjectField::TotalChapters(raw) => {
                subject.total_chapters = parse_chapter_count(&raw);
                if subject.total_chapters.is_none() && !raw.trim().is_empty() {
                    tracing::debug!(subject = %subject.id, raw = %raw, "Unparseable chapter count cleared");
                }
            }
        }
        Ok(subject.id)
    }

    /// Registry position of the first subject with this name.
    pub fn find_color_slot(&self, name: &str) -> Option<usize> {
        self.subjects.iter().position(|s| s.name == name)
    }

    /// Palette color for a subject name; None selects the fallback (untinted) style.
    pub fn color_for(&self, name: &str) -> Option<&'static str> {
        self.find_color_slot(name)
            .map(|slot| PALETTE[slot % PALETTE.len()])
    }

    pub fn subject(&self, id: SubjectId) -> Option<&SubjectRecord> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub(crate) fn subject_mut(&mut self, id: SubjectId) -> Result<&mut SubjectRecord, PlannerError> {
        self.subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| PlannerError::validation(format!("Unknown subject {}", id)))
    }

    /// First subject carrying this display name.
    pub fn find_by_name(&self, name: &str) -> Option<&SubjectRecord> {
        self.subjects.iter().find(|s| s.name == name)
    }

    pub fn index_of(&self, id: SubjectId) -> Option<usize> {
        self.subjects.iter().position(|s| s.id == id)
    }
}

fn parse_chapter_count(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}
