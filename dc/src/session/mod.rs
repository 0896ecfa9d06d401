//! Session state: the profile a user entered, the artifacts generated for
//! it, and the four conversation threads.

mod state;
mod thread;

pub use state::{
    Artifacts, DEFAULT_COMPETITOR_LABEL, Session, SessionProfile, SessionSnapshot, ThreadSlot, ThreadSnapshot,
    first_listed_competitor, normalize,
};
pub use thread::{AdvisorVariant, ConversationThread, ThreadKind, ThreadState, Turn, TurnRole, render_transcript};
