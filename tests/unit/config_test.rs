#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use crate::config::settings::{DEFAULT_PLAN_SERVICE_URL, DEFAULT_TIME_ZONE};
    use crate::config::{LogFormat, NotifierBackend, PlannerConfig};

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = PlannerConfig::from_toml("").unwrap();
        assert_eq!(config.plan_service.url, DEFAULT_PLAN_SERVICE_URL);
        assert_eq!(config.calendar.time_zone, DEFAULT_TIME_ZONE);
        assert_eq!(config.notifications.backend, NotifierBackend::Desktop);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.storage.state_path.is_none());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = PlannerConfig::from_toml(
            r#"
            [plan_service]
            url = "http://planner.internal:8080/api/plan"

            [notifications]
            backend = "log"

            [storage]
            state_path = "/tmp/planner.json"

            [logging]
            format = "pretty"
            "#,
        )
        .unwrap();

        assert_eq!(config.plan_service.url, "http://planner.internal:8080/api/plan");
        assert_eq!(config.plan_service.timeout_secs, 60);
        assert_eq!(config.notifications.backend, NotifierBackend::Log);
        assert!(config.notifications.icon.is_some());
        assert_eq!(config.storage.resolved_state_path(), PathBuf::from("/tmp/planner.json"));
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let err = PlannerConfig::from_toml("[notifications]\nbackend = \"pager\"").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Config);
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        let missing = PathBuf::from("/definitely/not/here/config.toml");
        assert!(PlannerConfig::load(Some(&missing)).is_err());
    }
}
