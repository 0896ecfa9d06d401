//! Stateless routes
//!
//! Every request carries its own context, so these call the generator
//! directly and never touch the session registry.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::debug;

use super::AppState;
use super::error::ApiError;
use super::models::{
    AccountPlanResponse, BattlecardsResponse, ChatResponse, CoachingChatRequest, CoachingFeedbackRequest,
    CompanyAnalystChatRequest, CompanyRequest, CompetitorAnalystChatRequest, FeedbackResponse, PlanRequest,
    ReportResponse, SalesAnalystChatRequest,
};
use crate::orchestrator::resolve_primary_competitor;
use crate::prompts::{PromptInputs, RequestKind};
use crate::session::AdvisorVariant;

pub async fn generate_account_plan(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<AccountPlanResponse>, ApiError> {
    let Json(req) = payload?;
    debug!(company = %req.company, "generate_account_plan: called");
    let inputs = PromptInputs::for_company(&req.company)
        .contacts(req.contacts.as_deref())
        .competitors(req.competitors.as_deref());
    let account_plan = state.generator.generate(RequestKind::AccountPlan, &inputs).await?;
    Ok(Json(AccountPlanResponse { account_plan }))
}

pub async fn coaching_chat(
    State(state): State<AppState>,
    payload: Result<Json<CoachingChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;
    debug!(company = %req.company, "coaching_chat: called");
    let inputs = PromptInputs::for_company(&req.company)
        .competitors(req.competitors.as_deref())
        .transcript(req.conversation_history.as_deref())
        .message(&req.user_message);
    let response = state.generator.generate(RequestKind::CoachingTurn, &inputs).await?;
    Ok(Json(ChatResponse { response }))
}

pub async fn coaching_feedback(
    State(state): State<AppState>,
    payload: Result<Json<CoachingFeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let Json(req) = payload?;
    debug!("coaching_feedback: called");
    let inputs = PromptInputs::default().transcript(req.conversation_history.as_deref());
    let feedback = state
        .generator
        .generate(RequestKind::CoachingFeedback, &inputs)
        .await?;
    Ok(Json(FeedbackResponse { feedback }))
}

pub async fn competitor_battlecards(
    State(state): State<AppState>,
    payload: Result<Json<CompanyRequest>, JsonRejection>,
) -> Result<Json<BattlecardsResponse>, ApiError> {
    let Json(req) = payload?;
    debug!(company = %req.company, "competitor_battlecards: called");
    let competitor = resolve_primary_competitor(&state.generator, &req.company, req.competitors.as_deref()).await?;
    let inputs = PromptInputs::for_company(&req.company)
        .competitors(req.competitors.as_deref())
        .primary_competitor(Some(&competitor.name), competitor.inferred);
    let battlecards = state.generator.generate(RequestKind::Battlecards, &inputs).await?;
    Ok(Json(BattlecardsResponse {
        battlecards,
        primary_competitor: competitor.name,
    }))
}

pub async fn analyst_report(
    State(state): State<AppState>,
    payload: Result<Json<CompanyRequest>, JsonRejection>,
) -> Result<Json<ReportResponse>, ApiError> {
    let Json(req) = payload?;
    debug!(company = %req.company, "analyst_report: called");
    let inputs = PromptInputs::for_company(&req.company).competitors(req.competitors.as_deref());
    let report = state.generator.generate(RequestKind::AnalystReport, &inputs).await?;
    Ok(Json(ReportResponse { report }))
}

pub async fn sales_analyst_chat(
    State(state): State<AppState>,
    payload: Result<Json<SalesAnalystChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;
    debug!(company = %req.company, "sales_analyst_chat: called");
    let inputs = PromptInputs::for_company(&req.company)
        .competitors(req.competitors.as_deref())
        .artifact(req.account_plan.as_deref())
        .message(&req.message);
    let response = state
        .generator
        .generate(RequestKind::Advisor(AdvisorVariant::Sales), &inputs)
        .await?;
    Ok(Json(ChatResponse { response }))
}

pub async fn competitor_analyst_chat(
    State(state): State<AppState>,
    payload: Result<Json<CompetitorAnalystChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;
    debug!(company = %req.company, "competitor_analyst_chat: called");
    let inputs = PromptInputs::for_company(&req.company)
        .primary_competitor(req.primary_competitor.as_deref(), false)
        .artifact(req.battlecards.as_deref())
        .message(&req.message);
    let response = state
        .generator
        .generate(RequestKind::Advisor(AdvisorVariant::Competitor), &inputs)
        .await?;
    Ok(Json(ChatResponse { response }))
}

pub async fn company_analyst_chat(
    State(state): State<AppState>,
    payload: Result<Json<CompanyAnalystChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;
    debug!(company = %req.company, "company_analyst_chat: called");
    let inputs = PromptInputs::for_company(&req.company)
        .competitors(req.competitors.as_deref())
        .artifact(req.analyst_report.as_deref())
        .message(&req.message);
    let response = state
        .generator
        .generate(RequestKind::Advisor(AdvisorVariant::Company), &inputs)
        .await?;
    Ok(Json(ChatResponse { response }))
}
