#[cfg(test)]
mod tests {
    use crate::state::registry::PALETTE;
    use crate::state::{PlanningState, SubjectField, SubjectRecord};

    #[test]
    fn test_add_subject_appends_blank_entry() {
        let mut state = PlanningState::default();
        let first = state.add_subject();
        let second = state.add_subject();

        assert_eq!(state.subjects.len(), 2);
        assert_ne!(first, second);
        assert_eq!(state.subjects[1].name, "");
        assert_eq!(state.subjects[1].total_chapters, None);
    }

    #[test]
    fn test_update_by_position_before_naming() {
        let mut state = PlanningState::initial();
        let id = state.subjects[0].id;

        let updated = state
            .update_subject_field(0, SubjectField::TotalChapters("12".into()))
            .unwrap();
        assert_eq!(updated, id);
        assert_eq!(state.subjects[0].total_chapters, Some(12));
        assert!(!state.subjects[0].is_plannable());

        state.update_subject_field(0, SubjectField::Name("Physics".into())).unwrap();
        assert!(state.subjects[0].is_plannable());
    }

    #[test]
    fn test_unparseable_chapter_count_clears_it() {
        let mut state = PlanningState::initial();
        state.update_subject_field(0, SubjectField::TotalChapters("8".into())).unwrap();
        state.update_subject_field(0, SubjectField::TotalChapters("eight".into())).unwrap();
        assert_eq!(state.subjects[0].total_chapters, None);

        state.update_subject_field(0, SubjectField::TotalChapters(" 0 ".into())).unwrap();
        assert_eq!(state.subjects[0].total_chapters, Some(0));
    }

    #[test]
    fn test_update_out_of_range_is_validation_error() {
        let mut state = PlanningState::initial();
        let err = state
            .update_subject_field(3, SubjectField::Name("Chemistry".into()))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_rename_keeps_progress() {
        let mut state = PlanningState::default();
        state.subjects.push(SubjectRecord::named("Math", 10));
        let id = state.subjects[0].id;
        state.set_progress(id, 4).unwrap();

        state.update_subject_field(0, SubjectField::Name("Mathematics".into())).unwrap();

        let subject = state.subject(id).unwrap();
        assert_eq!(subject.name, "Mathematics");
        assert_eq!(subject.completed, 4);
    }

    #[test]
    fn test_duplicate_names_are_distinct_subjects() {
        let mut state = PlanningState::default();
        state.subjects.push(SubjectRecord::named("Math", 10));
        state.subjects.push(SubjectRecord::named("Math", 5));

        assert_ne!(state.subjects[0].id, state.subjects[1].id);
        assert_eq!(state.find_by_name("Math").unwrap().total_chapters, Some(10));
    }

    #[test]
    fn test_find_color_slot() {
        let mut state = PlanningState::default();
        for i in 0..14 {
            state.subjects.push(SubjectRecord::named(format!("S{}", i), 1));
        }

        assert_eq!(state.find_color_slot("S0"), Some(0));
        assert_eq!(state.find_color_slot("S13"), Some(13));
        assert_eq!(state.find_color_slot("missing"), None);

        assert_eq!(state.color_for("S1"), Some(PALETTE[1]));
        // wraps around the palette
        assert_eq!(state.color_for("S13"), Some(PALETTE[1]));
        assert_eq!(state.color_for("missing"), None);
    }
}
