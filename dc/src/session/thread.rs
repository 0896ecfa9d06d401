//! Conversation threads
//!
//! A thread is an append-only transcript plus a small state machine. The
//! transcript is the only conversational memory: it is flattened into every
//! prompt for the thread.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Who said a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
    System,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
    #[serde(rename = "at")]
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Lifecycle of a thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThreadState {
    /// No turn has been recorded yet
    Empty,
    /// Idle with at least one turn
    Active,
    /// A completion call for this thread is in flight
    AwaitingCompletion,
}

/// The advisor panels, each scoped to one generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorVariant {
    /// Sales analyst, grounded in the account plan
    Sales,
    /// Competitor's analyst, grounded in the battlecards
    Competitor,
    /// Buyer's internal analyst, grounded in the analyst report
    Company,
}

impl AdvisorVariant {
    pub const ALL: [AdvisorVariant; 3] = [Self::Sales, Self::Competitor, Self::Company];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Competitor => "competitor",
            Self::Company => "company",
        }
    }

    /// Template rendered for a turn in this panel
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Sales => "sales-advisor",
            Self::Competitor => "competitor-advisor",
            Self::Company => "company-advisor",
        }
    }

    pub fn thread_kind(&self) -> ThreadKind {
        match self {
            Self::Sales => ThreadKind::SalesAdvisor,
            Self::Competitor => ThreadKind::CompetitorAdvisor,
            Self::Company => ThreadKind::CompanyAdvisor,
        }
    }
}

impl fmt::Display for AdvisorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdvisorVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sales" => Ok(Self::Sales),
            "competitor" => Ok(Self::Competitor),
            "company" => Ok(Self::Company),
            _ => Err(format!("Unknown advisor: {}. Use: sales, competitor, or company", s)),
        }
    }
}

/// The four threads a session owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThreadKind {
    Coaching,
    SalesAdvisor,
    CompetitorAdvisor,
    CompanyAdvisor,
}

impl ThreadKind {
    pub const ALL: [ThreadKind; 4] = [
        Self::Coaching,
        Self::SalesAdvisor,
        Self::CompetitorAdvisor,
        Self::CompanyAdvisor,
    ];
}

impl fmt::Display for ThreadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Coaching => "coaching",
            Self::SalesAdvisor => "sales-advisor",
            Self::CompetitorAdvisor => "competitor-advisor",
            Self::CompanyAdvisor => "company-advisor",
        };
        f.write_str(name)
    }
}

/// An ordered, append-only conversation transcript
#[derive(Debug, Clone)]
pub struct ConversationThread {
    kind: ThreadKind,
    turns: Vec<Turn>,
    state: ThreadState,
}

impl ConversationThread {
    pub fn new(kind: ThreadKind) -> Self {
        Self {
            kind,
            turns: Vec::new(),
            state: ThreadState::Empty,
        }
    }

    pub fn kind(&self) -> ThreadKind {
        self.kind
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn state(&self) -> ThreadState {
        self.state
    }

    /// Record the user's utterance and mark the thread as waiting
    ///
    /// The turn stays in the transcript even if the completion later fails.
    pub fn begin_turn(&mut self, content: impl Into<String>) {
        debug!(kind = %self.kind, turns = self.turns.len(), "begin_turn: called");
        self.turns.push(Turn::new(TurnRole::User, content));
        self.state = ThreadState::AwaitingCompletion;
    }

    /// Record the assistant's reply and return to Active
    pub fn complete_turn(&mut self, content: impl Into<String>) {
        debug!(kind = %self.kind, "complete_turn: called");
        self.turns.push(Turn::new(TurnRole::Assistant, content));
        self.state = ThreadState::Active;
    }

    /// Return to Active without a reply; the user turn is kept
    pub fn fail_turn(&mut self) {
        debug!(kind = %self.kind, "fail_turn: called");
        self.state = if self.turns.is_empty() {
            ThreadState::Empty
        } else {
            ThreadState::Active
        };
    }

    /// Chronological `role: content` lines
    pub fn transcript(&self) -> String {
        render_transcript(&self.turns)
    }

    /// Transcript without the trailing in-flight user turn
    pub fn transcript_before_latest(&self) -> String {
        match self.state {
            ThreadState::AwaitingCompletion => render_transcript(&self.turns[..self.turns.len() - 1]),
            _ => self.transcript(),
        }
    }
}

/// Flatten turns into the line format used inside prompts
pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.role, t.content))
        .collect::<Vec<_>>()
        .join("\n")
}
