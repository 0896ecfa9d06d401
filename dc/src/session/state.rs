//! Session state store
//!
//! Holds what one user's session has produced so far. The orchestrator owns
//! exactly one `Session`; nothing here is global.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use super::thread::{ConversationThread, ThreadKind, ThreadState, Turn};

/// Shown before battlecards have resolved a competitor and none was entered
pub const DEFAULT_COMPETITOR_LABEL: &str = "Key Competitor";

/// Trim a free-text field, treating blank input as absent
pub fn normalize(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// First non-blank entry of a comma-separated competitor list
pub fn first_listed_competitor(raw: Option<&str>) -> Option<String> {
    raw.and_then(|raw| raw.split(',').map(str::trim).find(|c| !c.is_empty()))
        .map(str::to_string)
}

/// What the user entered when the session started; fixed for its lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProfile {
    pub company: String,
    pub contacts: Option<String>,
    pub competitors_raw: Option<String>,
}

impl SessionProfile {
    pub fn new(company: &str, contacts: Option<&str>, competitors: Option<&str>) -> Self {
        Self {
            company: company.trim().to_string(),
            contacts: normalize(contacts),
            competitors_raw: normalize(competitors),
        }
    }

    pub fn first_listed_competitor(&self) -> Option<String> {
        first_listed_competitor(self.competitors_raw.as_deref())
    }
}

/// Generated texts; each is overwritten wholesale on regeneration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
    pub account_plan: Option<String>,
    pub battlecards: Option<String>,
    /// Set only by battlecard generation, to the name its prompt used
    pub primary_competitor: Option<String>,
    pub analyst_report: Option<String>,
}

/// One thread plus the gate that serializes its turns
///
/// The gate is held for a whole turn, including the completion call; tokio's
/// mutex is fair, so queued turns run in submission order. The transcript
/// itself is only locked briefly so snapshots never wait on the service.
pub struct ThreadSlot {
    gate: Mutex<()>,
    thread: Mutex<ConversationThread>,
}

impl ThreadSlot {
    fn new(kind: ThreadKind) -> Self {
        Self {
            gate: Mutex::new(()),
            thread: Mutex::new(ConversationThread::new(kind)),
        }
    }

    /// Wait for exclusive use of the thread
    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }

    /// Run a short mutation against the transcript
    pub async fn with<R>(&self, f: impl FnOnce(&mut ConversationThread) -> R) -> R {
        let mut thread = self.thread.lock().await;
        f(&mut thread)
    }

    /// Copy of the thread as it is now
    pub async fn snapshot(&self) -> ConversationThread {
        self.thread.lock().await.clone()
    }

    async fn clear(&self) {
        let _gate = self.gate.lock().await;
        let mut thread = self.thread.lock().await;
        let kind = thread.kind();
        *thread = ConversationThread::new(kind);
    }
}

/// The mutable context of one user interaction window
pub struct Session {
    id: Uuid,
    profile: SessionProfile,
    created_at: DateTime<Utc>,
    artifacts: RwLock<Artifacts>,
    coaching: ThreadSlot,
    sales_advisor: ThreadSlot,
    competitor_advisor: ThreadSlot,
    company_advisor: ThreadSlot,
}

impl Session {
    pub fn new(profile: SessionProfile) -> Self {
        let id = Uuid::now_v7();
        debug!(%id, company = %profile.company, "Session::new: called");
        Self {
            id,
            profile,
            created_at: Utc::now(),
            artifacts: RwLock::new(Artifacts::default()),
            coaching: ThreadSlot::new(ThreadKind::Coaching),
            sales_advisor: ThreadSlot::new(ThreadKind::SalesAdvisor),
            competitor_advisor: ThreadSlot::new(ThreadKind::CompetitorAdvisor),
            company_advisor: ThreadSlot::new(ThreadKind::CompanyAdvisor),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn profile(&self) -> &SessionProfile {
        &self.profile
    }

    pub fn thread(&self, kind: ThreadKind) -> &ThreadSlot {
        match kind {
            ThreadKind::Coaching => &self.coaching,
            ThreadKind::SalesAdvisor => &self.sales_advisor,
            ThreadKind::CompetitorAdvisor => &self.competitor_advisor,
            ThreadKind::CompanyAdvisor => &self.company_advisor,
        }
    }

    /// Copy of the current artifacts
    pub async fn artifacts(&self) -> Artifacts {
        self.artifacts.read().await.clone()
    }

    /// Apply a change to the artifacts under the write lock
    pub async fn update_artifacts(&self, f: impl FnOnce(&mut Artifacts)) {
        let mut artifacts = self.artifacts.write().await;
        f(&mut artifacts);
    }

    /// Competitor name for display; falls back to the entered list
    pub async fn display_competitor(&self) -> String {
        self.artifacts
            .read()
            .await
            .primary_competitor
            .clone()
            .or_else(|| self.profile.first_listed_competitor())
            .unwrap_or_else(|| DEFAULT_COMPETITOR_LABEL.to_string())
    }

    /// Start over as a logically new session with the same profile
    ///
    /// Waits for in-flight turns, then drops every thread and artifact.
    pub async fn reset(&self) {
        info!(id = %self.id, "Session reset");
        for kind in ThreadKind::ALL {
            self.thread(kind).clear().await;
        }
        *self.artifacts.write().await = Artifacts::default();
    }

    /// Serializable view of everything in the session
    pub async fn snapshot(&self) -> SessionSnapshot {
        let artifacts = self.artifacts().await;
        let mut threads = Vec::with_capacity(ThreadKind::ALL.len());
        for kind in ThreadKind::ALL {
            let thread = self.thread(kind).snapshot().await;
            threads.push(ThreadSnapshot {
                kind,
                state: thread.state(),
                turns: thread.turns().to_vec(),
            });
        }

        SessionSnapshot {
            session_id: self.id,
            created_at: self.created_at,
            display_competitor: self.display_competitor().await,
            profile: self.profile.clone(),
            account_plan: artifacts.account_plan,
            battlecards: artifacts.battlecards,
            primary_competitor: artifacts.primary_competitor,
            analyst_report: artifacts.analyst_report,
            threads,
        }
    }
}

/// Session state as returned to the presentation layer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub profile: SessionProfile,
    pub display_competitor: String,
    pub account_plan: Option<String>,
    pub battlecards: Option<String>,
    pub primary_competitor: Option<String>,
    pub analyst_report: Option<String>,
    pub threads: Vec<ThreadSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSnapshot {
    pub kind: ThreadKind,
    pub state: ThreadState,
    pub turns: Vec<Turn>,
}
