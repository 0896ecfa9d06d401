//! Conversation Orchestrator
//!
//! One operation per request kind, all against a single owned `Session`.
//! Turn operations serialize per thread through the thread's gate; one-shot
//! generations each have a guard that turns a duplicate submission into
//! `Busy` instead of a second call to the service. Plan generation holds the
//! session's lifecycle lock exclusively, so nothing started before a reset
//! lands after it and nothing queued behind it sees the discarded session.

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::competitor::resolve_primary_competitor;
use super::error::OrchestratorError;
use super::generator::Generator;
use crate::prompts::{PromptInputs, RequestKind};
use crate::session::{AdvisorVariant, Session, SessionProfile, ThreadKind, normalize};

/// Result alias for orchestrator operations
pub type Result<T> = std::result::Result<T, OrchestratorError>;

/// Battlecards together with the competitor they were written for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattlecardsOutcome {
    pub battlecards: String,
    pub primary_competitor: String,
}

/// Outcome of preparing every artifact for a new session
///
/// The plan must succeed; the other two report their own failures.
#[derive(Debug)]
pub struct PreparedSession {
    pub account_plan: String,
    pub battlecards: Result<BattlecardsOutcome>,
    pub analyst_report: Result<String>,
}

/// Runs every operation for one session
pub struct Orchestrator {
    session: Session,
    generator: Generator,
    /// Shared by every operation, exclusive while a plan is generated
    lifecycle: RwLock<()>,
    plan_guard: Mutex<()>,
    battlecards_guard: Mutex<()>,
    report_guard: Mutex<()>,
}

impl Orchestrator {
    /// Create an orchestrator around a fresh session
    pub fn new(generator: Generator, profile: SessionProfile) -> Self {
        Self {
            session: Session::new(profile),
            generator,
            lifecycle: RwLock::new(()),
            plan_guard: Mutex::new(()),
            battlecards_guard: Mutex::new(()),
            report_guard: Mutex::new(()),
        }
    }

    /// Validate the user's entry and open a session for it
    pub fn start(generator: Generator, company: &str, contacts: Option<&str>, competitors: Option<&str>) -> Result<Self> {
        debug!(%company, "Orchestrator::start: called");
        if normalize(Some(company)).is_none() {
            return Err(OrchestratorError::Validation("company is required".to_string()));
        }
        Ok(Self::new(generator, SessionProfile::new(company, contacts, competitors)))
    }

    pub fn id(&self) -> Uuid {
        self.session.id()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn base_inputs(&self) -> PromptInputs {
        let profile = self.session.profile();
        PromptInputs::for_company(&profile.company).competitors(profile.competitors_raw.as_deref())
    }

    /// Generate the account plan
    ///
    /// When a plan already exists this starts a logically new session: the
    /// threads and the other artifacts are discarded before the plan is stored.
    /// Operations already running finish first; operations submitted while
    /// the plan is generated wait and then run against the new session.
    pub async fn generate_plan(&self) -> Result<String> {
        debug!(id = %self.id(), "generate_plan: called");
        let _guard = self
            .plan_guard
            .try_lock()
            .map_err(|_| OrchestratorError::Busy { artifact: "account plan" })?;
        let _exclusive = self.lifecycle.write().await;

        let inputs = self.base_inputs().contacts(self.session.profile().contacts.as_deref());
        let plan = self.generator.generate(RequestKind::AccountPlan, &inputs).await?;

        if self.session.artifacts().await.account_plan.is_some() {
            self.session.reset().await;
        }
        self.session
            .update_artifacts(|a| a.account_plan = Some(plan.clone()))
            .await;

        info!(id = %self.id(), len = plan.len(), "Account plan generated");
        Ok(plan)
    }

    /// Generate battlecards and fix the primary competitor to the one used
    pub async fn generate_battlecards(&self) -> Result<BattlecardsOutcome> {
        debug!(id = %self.id(), "generate_battlecards: called");
        let _guard = self
            .battlecards_guard
            .try_lock()
            .map_err(|_| OrchestratorError::Busy { artifact: "battlecards" })?;
        let _shared = self.lifecycle.read().await;

        let profile = self.session.profile();
        let competitor =
            resolve_primary_competitor(&self.generator, &profile.company, profile.competitors_raw.as_deref()).await?;

        let inputs = self
            .base_inputs()
            .primary_competitor(Some(&competitor.name), competitor.inferred);
        let battlecards = self.generator.generate(RequestKind::Battlecards, &inputs).await?;

        self.session
            .update_artifacts(|a| {
                a.battlecards = Some(battlecards.clone());
                a.primary_competitor = Some(competitor.name.clone());
            })
            .await;

        info!(id = %self.id(), competitor = %competitor.name, inferred = competitor.inferred, "Battlecards generated");
        Ok(BattlecardsOutcome {
            battlecards,
            primary_competitor: competitor.name,
        })
    }

    /// Generate the analyst report
    pub async fn generate_analyst_report(&self) -> Result<String> {
        debug!(id = %self.id(), "generate_analyst_report: called");
        let _guard = self
            .report_guard
            .try_lock()
            .map_err(|_| OrchestratorError::Busy { artifact: "analyst report" })?;
        let _shared = self.lifecycle.read().await;

        let report = self
            .generator
            .generate(RequestKind::AnalystReport, &self.base_inputs())
            .await?;
        self.session
            .update_artifacts(|a| a.analyst_report = Some(report.clone()))
            .await;

        info!(id = %self.id(), len = report.len(), "Analyst report generated");
        Ok(report)
    }

    /// Plan first, then battlecards and the report concurrently
    pub async fn prepare_all(&self) -> Result<PreparedSession> {
        debug!(id = %self.id(), "prepare_all: called");
        let account_plan = self.generate_plan().await?;
        let (battlecards, analyst_report) = tokio::join!(self.generate_battlecards(), self.generate_analyst_report());

        if let Err(e) = &battlecards {
            warn!(id = %self.id(), error = %e, "Battlecards failed during prepare");
        }
        if let Err(e) = &analyst_report {
            warn!(id = %self.id(), error = %e, "Analyst report failed during prepare");
        }

        Ok(PreparedSession {
            account_plan,
            battlecards,
            analyst_report,
        })
    }

    /// One role-play turn against the simulated security leader
    pub async fn coaching_turn(&self, message: &str) -> Result<String> {
        debug!(id = %self.id(), "coaching_turn: called");
        let message = require_message(message)?;
        self.run_turn(ThreadKind::Coaching, RequestKind::CoachingTurn, message)
            .await
    }

    /// Assess the coaching conversation so far; the transcript is not changed
    pub async fn coaching_feedback(&self) -> Result<String> {
        debug!(id = %self.id(), "coaching_feedback: called");
        let _shared = self.lifecycle.read().await;
        let thread = self.session.thread(ThreadKind::Coaching).snapshot().await;
        let transcript = thread.transcript_before_latest();
        if transcript.is_empty() {
            return Err(OrchestratorError::PreconditionNotMet {
                artifact: "coaching conversation",
            });
        }

        let inputs = PromptInputs::default().transcript(Some(&transcript));
        self.generator.generate(RequestKind::CoachingFeedback, &inputs).await
    }

    /// One turn with an advisor panel, grounded in that panel's artifact
    pub async fn advisor_turn(&self, variant: AdvisorVariant, message: &str) -> Result<String> {
        debug!(id = %self.id(), %variant, "advisor_turn: called");
        let message = require_message(message)?;
        self.run_turn(variant.thread_kind(), RequestKind::Advisor(variant), message)
            .await
    }

    /// Inputs for a turn, read from the artifacts as they are when the turn runs
    async fn turn_inputs(&self, kind: RequestKind) -> Result<PromptInputs> {
        let RequestKind::Advisor(variant) = kind else {
            return Ok(self.base_inputs());
        };

        let artifacts = self.session.artifacts().await;
        let (artifact, name) = match variant {
            AdvisorVariant::Sales => (artifacts.account_plan, "account plan"),
            AdvisorVariant::Competitor => (artifacts.battlecards, "battlecards"),
            AdvisorVariant::Company => (artifacts.analyst_report, "analyst report"),
        };
        let Some(artifact) = artifact else {
            return Err(OrchestratorError::PreconditionNotMet { artifact: name });
        };

        let mut inputs = self.base_inputs().artifact(Some(&artifact));
        if variant == AdvisorVariant::Competitor {
            let Some(competitor) = artifacts.primary_competitor else {
                return Err(OrchestratorError::PreconditionNotMet { artifact: "battlecards" });
            };
            inputs = inputs.primary_competitor(Some(&competitor), false);
        }
        Ok(inputs)
    }

    /// Record a user turn, call the service, record the reply
    ///
    /// The gate is held throughout, so queued turns on the same thread run in
    /// submission order and each sees its predecessors' replies. Artifacts are
    /// read only once the gate is held.
    async fn run_turn(&self, thread: ThreadKind, kind: RequestKind, message: &str) -> Result<String> {
        let _shared = self.lifecycle.read().await;
        let slot = self.session.thread(thread);
        let _turn = slot.enter().await;

        let transcript = slot.with(|t| t.transcript()).await;
        let inputs = self.turn_inputs(kind).await?.transcript(Some(&transcript)).message(message);
        let request = self.generator.compose(kind, &inputs)?;

        slot.with(|t| t.begin_turn(message)).await;
        match self.generator.complete(request).await {
            Ok(reply) => {
                slot.with(|t| t.complete_turn(reply.clone())).await;
                debug!(id = %self.id(), %thread, "run_turn: reply recorded");
                Ok(reply)
            }
            Err(e) => {
                slot.with(|t| t.fail_turn()).await;
                warn!(id = %self.id(), %thread, error = %e, "Turn failed, user message kept");
                Err(e)
            }
        }
    }
}

fn require_message(message: &str) -> Result<&str> {
    let message = message.trim();
    if message.is_empty() {
        return Err(OrchestratorError::Validation("message is required".to_string()));
    }
    Ok(message)
}
