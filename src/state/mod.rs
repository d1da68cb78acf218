pub mod app;
pub mod ledger;
pub mod model;
pub mod registry;
pub mod store;

pub use app::{AppState, StatusMessage};
pub use ledger::parse_difficulties;
pub use model::{PlanningState, SubjectField, SubjectId, SubjectRecord, DEFAULT_DAILY_HOURS};
pub use store::StateStore;
