#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use chrono::NaiveDate;
    use crate::plan::{Plan, PlanRequest, ScheduledItem, EMPTY_SYLLABUS_MESSAGE};
    use crate::state::{PlanningState, SubjectRecord};

    fn item(subject: &str, chapter: u32, hours: f64) -> ScheduledItem {
        ScheduledItem {
            subject: subject.to_string(),
            chapter,
            hours,
        }
    }

    #[test]
    fn test_request_includes_only_plannable_subjects() {
        let mut state = PlanningState::initial();
        let mut math = SubjectRecord::named("Math", 10);
        math.completed = 3;
        math.deadline = NaiveDate::from_ymd_opt(2024, 6, 1);
        math.difficulties = vec![1.0, 2.0];
        state.subjects.push(math);
        let mut unnamed = SubjectRecord::named("   ", 4);
        unnamed.completed = 1;
        state.subjects.push(unnamed);
        let mut no_count = SubjectRecord::named("Art", 0);
        no_count.total_chapters = None;
        state.subjects.push(no_count);

        let request = PlanRequest::from_state(&state).unwrap();
        assert_eq!(request.syllabus.len(), 1);
        assert_eq!(request.syllabus["Math"].chapters, 10);
        assert_eq!(request.progress["Math"], 3);
        assert_eq!(request.deadlines["Math"], NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(request.difficulties["Math"], vec![1.0, 2.0]);
        assert_eq!(request.daily_hours, 4);
    }

    #[test]
    fn test_request_wire_format() {
        let mut state = PlanningState::default();
        let mut physics = SubjectRecord::named("Physics", 5);
        physics.deadline = NaiveDate::from_ymd_opt(2024, 1, 15);
        state.subjects.push(physics);

        let request = PlanRequest::from_state(&state).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["syllabus"]["Physics"]["chapters"], 5);
        assert_eq!(json["deadlines"]["Physics"], "2024-01-15");
        assert_eq!(json["daily_hours"], 4);
        assert!(json["difficulties"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_zero_chapter_subject_is_plannable() {
        let mut state = PlanningState::default();
        state.subjects.push(SubjectRecord::named("Music", 0));
        assert!(PlanRequest::from_state(&state).is_ok());
    }

    #[test]
    fn test_empty_syllabus_is_rejected() {
        let err = PlanRequest::from_state(&PlanningState::initial()).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.message, EMPTY_SYLLABUS_MESSAGE);
    }

    #[test]
    fn test_duplicate_names_later_entry_wins() {
        let mut state = PlanningState::default();
        let mut first = SubjectRecord::named("Math", 10);
        first.difficulties = vec![3.0];
        state.subjects.push(first);
        state.subjects.push(SubjectRecord::named("Math", 4));

        let request = PlanRequest::from_state(&state).unwrap();
        assert_eq!(request.syllabus["Math"].chapters, 4);
        assert!(!request.difficulties.contains_key("Math"));
    }

    #[test]
    fn test_overloaded_days() {
        let mut schedule = BTreeMap::new();
        schedule.insert("2024-01-01".to_string(), vec![item("Math", 1, 3.0), item("Math", 2, 2.0)]);
        schedule.insert("2024-01-02".to_string(), vec![item("Art", 1, 2.0), item("Art", 2, 1.0)]);
        schedule.insert("2024-01-03".to_string(), vec![item("Art", 3, 4.0)]);
        let plan = Plan {
            tasks: Vec::new(),
            daily_schedule: schedule,
        };

        let overloaded = plan.overloaded_days(4);
        assert_eq!(overloaded.len(), 1);
        assert_eq!(overloaded[0].date, "2024-01-01");
        assert_eq!(overloaded[0].hours, 5.0);
    }

    #[test]
    fn test_plan_response_decoding() {
        let body = r#"{
            "tasks": [{"subject": "Math", "total_chapters": 10, "done_chapters": 4,
                       "remaining_chapters": 6, "deadline": "2024-02-01",
                       "days_left": -3, "priority": 60.0}],
            "daily_schedule": {
                "2024-01-02": [{"subject": "Math", "chapter": 6, "hours": 1.5}],
                "2024-01-01": [{"subject": "Math", "chapter": 5, "hours": 1}]
            }
        }"#;
        let plan: Plan = serde_json::from_str(body).unwrap();
        assert_eq!(plan.tasks[0].days_left, -3);
        assert_eq!(plan.tasks[0].completion_ratio(), 0.4);

        let order: Vec<(String, u32)> = plan
            .scheduled_items()
            .map(|(date, item)| (date.to_string(), item.chapter))
            .collect();
        assert_eq!(order, vec![("2024-01-01".to_string(), 5), ("2024-01-02".to_string(), 6)]);

        let breakdown = plan.progress_breakdown();
        assert_eq!(breakdown[0].completed, 4);
        assert_eq!(breakdown[0].remaining, 6);
    }

    #[test]
    fn test_plan_response_accepts_camel_case() {
        let body = r#"{"tasks": [], "dailySchedule": {"2024-01-01": []}}"#;
        let plan: Plan = serde_json::from_str(body).unwrap();
        assert!(plan.daily_schedule.contains_key("2024-01-01"));
    }
}
