//! dealcoach - LLM-backed account planning and sales role-play
//!
//! A user names a target company; the service produces an account plan,
//! competitor battlecards and an analyst report, and runs four independent
//! conversations over them: a CISO role-play and three advisor panels.
//!
//! # Core Concepts
//!
//! - **Stateless Service**: every completion call carries its full context;
//!   a thread's memory is its transcript, flattened into each prompt
//! - **One Session, One Orchestrator**: no globals; the server maps session
//!   ids to orchestrators
//! - **Per-Thread Ordering**: turns on one thread queue in order, threads
//!   run concurrently
//!
//! # Modules
//!
//! - [`llm`] - LLM client trait and Anthropic implementation
//! - [`prompts`] - Prompt templates and the request composer
//! - [`session`] - Session state, artifacts and conversation threads
//! - [`orchestrator`] - One operation per request kind
//! - [`server`] - HTTP JSON API
//! - [`repl`] - Terminal role-play
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod llm;
pub mod orchestrator;
pub mod prompts;
pub mod repl;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use config::{Config, GenerationConfig, LlmConfig, ServerConfig};
pub use llm::{AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError};
pub use orchestrator::{BattlecardsOutcome, Generator, Orchestrator, OrchestratorError, PreparedSession};
pub use prompts::{PromptComposer, PromptInputs, PromptLoader, RequestKind};
pub use server::{AppState, SessionRegistry};
pub use session::{AdvisorVariant, Session, SessionProfile, ThreadKind, ThreadState};
