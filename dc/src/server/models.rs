//! Request and response bodies
//!
//! Field names are camelCase on the wire to match the browser client.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Company entry shared by plan generation and session creation
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanRequest {
    pub company: String,
    pub contacts: Option<String>,
    pub competitors: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPlanResponse {
    pub account_plan: String,
}

/// Battlecard and report requests only need the company context
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyRequest {
    pub company: String,
    pub competitors: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattlecardsResponse {
    pub battlecards: String,
    pub primary_competitor: String,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: String,
}

/// Stateless coaching turn; the client renders the history itself
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoachingChatRequest {
    pub company: String,
    pub competitors: Option<String>,
    pub conversation_history: Option<String>,
    pub user_message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoachingFeedbackRequest {
    pub conversation_history: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesAnalystChatRequest {
    pub company: String,
    pub competitors: Option<String>,
    pub message: String,
    pub account_plan: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompetitorAnalystChatRequest {
    pub company: String,
    pub primary_competitor: Option<String>,
    pub message: String,
    pub battlecards: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyAnalystChatRequest {
    pub company: String,
    pub competitors: Option<String>,
    pub message: String,
    pub analyst_report: Option<String>,
}

/// Reply to any chat turn
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSessionRequest {
    pub company: String,
    pub contacts: Option<String>,
    pub competitors: Option<String>,
    /// Also generate battlecards and the report (default true)
    pub prepare_all: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub account_plan: String,
    pub battlecards: Option<String>,
    pub primary_competitor: Option<String>,
    pub report: Option<String>,
    pub errors: Vec<ArtifactError>,
}

/// A secondary artifact that failed while preparing a session
#[derive(Debug, Serialize)]
pub struct ArtifactError {
    pub artifact: &'static str,
    pub error: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
