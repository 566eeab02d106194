// Sync module - HOW TWO NODES GET BACK IN STEP
// Mutual registration, independent conflict resolution, outcome classification

mod orchestrator;
mod outcome;

pub use orchestrator::Orchestrator;
pub use outcome::{RegistrationFailure, SideReport, SyncOutcome, SyncReport};
