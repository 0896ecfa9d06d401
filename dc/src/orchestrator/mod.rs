//! Conversation orchestration
//!
//! Turns user actions into prompts, calls the completion service and keeps
//! the session's artifacts and threads up to date.

mod competitor;
mod core;
mod error;
mod generator;

pub use competitor::{ResolvedCompetitor, extract_competitor_name, resolve_primary_competitor};
pub use core::{BattlecardsOutcome, Orchestrator, PreparedSession};
pub use error::OrchestratorError;
pub use generator::Generator;
