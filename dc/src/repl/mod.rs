//! Terminal role-play REPL
//!
//! Drives one session's coaching thread from the keyboard, with slash
//! commands for feedback and history.

mod session;

pub use session::CoachingRepl;

use eyre::Result;

use crate::orchestrator::{Generator, Orchestrator};

/// Run the coaching REPL for one company
///
/// This is the main entry point for `dc coach`.
pub async fn run_coaching(generator: Generator, company: &str, competitors: Option<&str>) -> Result<()> {
    let orchestrator = Orchestrator::start(generator, company, None, competitors)?;
    let mut repl = CoachingRepl::new(orchestrator);
    repl.run().await
}
