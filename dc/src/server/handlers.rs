//! Session routes and the health check

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::debug;
use uuid::Uuid;

use super::AppState;
use super::error::ApiError;
use super::models::{
    AccountPlanResponse, ArtifactError, BattlecardsResponse, ChatResponse, CreateSessionRequest,
    CreateSessionResponse, FeedbackResponse, HealthResponse, MessageRequest, ReportResponse,
};
use crate::orchestrator::Orchestrator;
use crate::session::{AdvisorVariant, SessionSnapshot};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn lookup(state: &AppState, id: &str) -> Result<Arc<Orchestrator>, ApiError> {
    let uuid = Uuid::parse_str(id).map_err(|_| ApiError::SessionNotFound(id.to_string()))?;
    state
        .registry
        .get(&uuid)
        .await
        .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))
}

/// Open a session and generate its artifacts
///
/// The session is only registered once the plan exists.
pub async fn create_session(
    State(state): State<AppState>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), ApiError> {
    let Json(req) = payload?;
    debug!(company = %req.company, prepare_all = ?req.prepare_all, "create_session: called");
    let orchestrator = Arc::new(Orchestrator::start(
        state.generator.clone(),
        &req.company,
        req.contacts.as_deref(),
        req.competitors.as_deref(),
    )?);

    let response = if req.prepare_all.unwrap_or(true) {
        let prepared = orchestrator.prepare_all().await?;
        let mut errors = Vec::new();
        let (battlecards, primary_competitor) = match prepared.battlecards {
            Ok(outcome) => (Some(outcome.battlecards), Some(outcome.primary_competitor)),
            Err(e) => {
                errors.push(ArtifactError {
                    artifact: "battlecards",
                    error: e.to_string(),
                });
                (None, None)
            }
        };
        let report = match prepared.analyst_report {
            Ok(report) => Some(report),
            Err(e) => {
                errors.push(ArtifactError {
                    artifact: "analystReport",
                    error: e.to_string(),
                });
                None
            }
        };
        CreateSessionResponse {
            session_id: orchestrator.id(),
            account_plan: prepared.account_plan,
            battlecards,
            primary_competitor,
            report,
            errors,
        }
    } else {
        CreateSessionResponse {
            session_id: orchestrator.id(),
            account_plan: orchestrator.generate_plan().await?,
            battlecards: None,
            primary_competitor: None,
            report: None,
            errors: Vec::new(),
        }
    };

    state.registry.insert(orchestrator).await;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let orchestrator = lookup(&state, &id).await?;
    Ok(Json(orchestrator.session().snapshot().await))
}

pub async fn delete_session(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let uuid = Uuid::parse_str(&id).map_err(|_| ApiError::SessionNotFound(id.clone()))?;
    if state.registry.remove(&uuid).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound(id))
    }
}

pub async fn regenerate_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccountPlanResponse>, ApiError> {
    let orchestrator = lookup(&state, &id).await?;
    let account_plan = orchestrator.generate_plan().await?;
    Ok(Json(AccountPlanResponse { account_plan }))
}

pub async fn battlecards(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BattlecardsResponse>, ApiError> {
    let orchestrator = lookup(&state, &id).await?;
    let outcome = orchestrator.generate_battlecards().await?;
    Ok(Json(BattlecardsResponse {
        battlecards: outcome.battlecards,
        primary_competitor: outcome.primary_competitor,
    }))
}

pub async fn analyst_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportResponse>, ApiError> {
    let orchestrator = lookup(&state, &id).await?;
    let report = orchestrator.generate_analyst_report().await?;
    Ok(Json(ReportResponse { report }))
}

pub async fn coaching_turn(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;
    let orchestrator = lookup(&state, &id).await?;
    let response = orchestrator.coaching_turn(&req.message).await?;
    Ok(Json(ChatResponse { response }))
}

pub async fn coaching_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let orchestrator = lookup(&state, &id).await?;
    let feedback = orchestrator.coaching_feedback().await?;
    Ok(Json(FeedbackResponse { feedback }))
}

pub async fn advisor_turn(
    State(state): State<AppState>,
    Path((id, variant)): Path<(String, String)>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;
    let variant: AdvisorVariant = variant.parse().map_err(ApiError::BadRequest)?;
    let orchestrator = lookup(&state, &id).await?;
    let response = orchestrator.advisor_turn(variant, &req.message).await?;
    Ok(Json(ChatResponse { response }))
}
