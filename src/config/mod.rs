pub mod paths;
pub mod settings;

pub use settings::{
    CalendarConfig, LogFormat, LoggingConfig, NotificationConfig, NotifierBackend,
    PlanServiceConfig, PlannerConfig, StorageConfig,
};
