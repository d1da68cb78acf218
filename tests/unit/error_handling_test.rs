#[cfg(test)]
mod tests {
    use crate::error::{ErrorKind, PlannerError};

    #[test]
    fn test_error_creation() {
        let error = PlannerError::new("Test error", "test_stage");
        assert_eq!(error.message, "Test error");
        assert_eq!(error.stage, "test_stage");
        assert_eq!(error.kind, ErrorKind::Internal);
    }

    #[test]
    fn test_error_with_context() {
        let error = PlannerError::new("Test error", "test_stage")
            .with_context("Additional context");
        assert_eq!(error.context.as_deref(), Some("Additional context"));
    }

    #[test]
    fn test_validation_constructor_sets_kind() {
        let error = PlannerError::validation("Please add at least one subject.");
        assert!(error.is_validation());
        assert_eq!(error.stage, "validation");
    }

    #[test]
    fn test_io_error_is_persistence() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = PlannerError::from(io);
        assert_eq!(error.kind, ErrorKind::Persistence);
        assert_eq!(error.source.as_deref(), Some("std::io"));
    }

    #[test]
    fn test_anyhow_error_keeps_context_chain() {
        let err = anyhow::anyhow!("connection refused").context("Failed to connect to plan service");
        let error = PlannerError::from(err);
        assert!(error.message.contains("Failed to connect to plan service"));
        assert!(error.message.contains("connection refused"));
    }

    #[test]
    fn test_error_display() {
        let error = PlannerError::new("Test error", "test_stage")
            .with_context("context")
            .with_source("source");
        let display = format!("{}", error);
        assert!(display.contains("test_stage"));
        assert!(display.contains("Test error"));
        assert!(display.contains("context"));
    }
}
