#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::state::{parse_difficulties, PlanningState, SubjectId, SubjectRecord};

    fn state_with(name: &str, chapters: u32) -> (PlanningState, SubjectId) {
        let mut state = PlanningState::default();
        let record = SubjectRecord::named(name, chapters);
        let id = record.id;
        state.subjects.push(record);
        (state, id)
    }

    #[test]
    fn test_parse_difficulties_degrades_to_neutral_weight() {
        assert_eq!(parse_difficulties("1, x, 2.5,"), vec![1.0, 1.0, 2.5, 1.0]);
    }

    #[test]
    fn test_parse_difficulties_edge_tokens() {
        assert_eq!(parse_difficulties(""), vec![1.0]);
        assert_eq!(parse_difficulties("0, -2, NaN, inf"), vec![1.0, 1.0, 1.0, 1.0]);
        assert_eq!(parse_difficulties(" 1.5 ,3"), vec![1.5, 3.0]);
    }

    #[test]
    fn test_set_progress_is_not_clamped() {
        let (mut state, id) = state_with("History", 3);
        state.set_progress(id, 7).unwrap();
        assert_eq!(state.subject(id).unwrap().completed, 7);
        assert_eq!(state.subject(id).unwrap().remaining_chapters(), None);
    }

    #[test]
    fn test_set_deadline_and_weights() {
        let (mut state, id) = state_with("Biology", 4);
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        state.set_deadline(id, Some(date)).unwrap();
        state.set_difficulties(id, "1,2").unwrap();

        let subject = state.subject(id).unwrap();
        assert_eq!(subject.deadline, Some(date));
        assert_eq!(subject.difficulties, vec![1.0, 2.0]);

        state.set_deadline(id, None).unwrap();
        assert_eq!(state.subject(id).unwrap().deadline, None);
    }

    #[test]
    fn test_edits_on_unknown_subject_fail() {
        let (mut state, _) = state_with("Art", 2);
        let stranger = SubjectId::new();
        assert!(state.set_progress(stranger, 1).unwrap_err().is_validation());
        assert!(state.set_difficulties(stranger, "2").unwrap_err().is_validation());
        assert!(state.remove_subject(stranger).is_none());
    }

    #[test]
    fn test_remove_subject_drops_all_its_data() {
        let (mut state, id) = state_with("Chemistry", 6);
        state.subjects.push(SubjectRecord::named("Physics", 2));
        state.set_progress(id, 2).unwrap();
        state.set_difficulties(id, "1,1.5").unwrap();

        let removed = state.remove_subject(id).unwrap();
        assert_eq!(removed.completed, 2);
        assert!(state.subject(id).is_none());
        assert_eq!(state.subjects.len(), 1);
        assert_eq!(state.subjects[0].name, "Physics");
    }

    #[test]
    fn test_daily_hours_range() {
        let mut state = PlanningState::default();
        assert_eq!(state.daily_hours, 4);
        state.set_daily_hours(24).unwrap();
        assert_eq!(state.daily_hours, 24);
        assert!(state.set_daily_hours(0).unwrap_err().is_validation());
        assert!(state.set_daily_hours(25).is_err());
        assert_eq!(state.daily_hours, 24);
    }
}
