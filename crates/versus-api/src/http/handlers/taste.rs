//! Per-user taste views and vote recording.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Serialize;

use versus_core::service::catalog::DEFAULT_CANDIDATE_LIMIT;
use versus_types::choice::{ChoiceRecord, VoteRequest};
use versus_types::id::UserId;
use versus_types::item::{CatalogEntry, Motivation};
use versus_types::taste::{
    AffinityReport, ContentQuery, HistoryEntry, RankedChoice, RecommendationList,
    SubmotivationReport,
};

use crate::http::error::AppError;
use crate::http::extractors::query::LimitQuery;
use crate::http::handlers::parse_id;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// Candidates sourced from the content provider, with the query that found them.
#[derive(Debug, Serialize)]
pub struct Candidates {
    pub content_query: ContentQuery,
    pub entries: Vec<CatalogEntry>,
}

/// GET /api/v1/users/{id}/history - Most recent votes, newest first.
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<HistoryEntry>>>, AppError> {
    let timer = RequestTimer::start();
    let user_id: UserId = parse_id(&id)?;
    let entries = state
        .taste_service
        .recent_history(&user_id, query.limit()?)
        .await?;
    Ok(Json(timer.finish(entries)))
}

/// GET /api/v1/users/{id}/top-choices - Most chosen items.
pub async fn top_choices(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<RankedChoice>>>, AppError> {
    let timer = RequestTimer::start();
    let user_id: UserId = parse_id(&id)?;
    let ranked = state
        .taste_service
        .top_choices(&user_id, query.limit()?)
        .await?;
    Ok(Json(timer.finish(ranked).with_link(
        "recommendations",
        &format!("/api/v1/users/{user_id}/recommendations"),
    )))
}

/// GET /api/v1/users/{id}/recommendations - Items related to the user's favorites.
pub async fn recommendations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RecommendationList>>, AppError> {
    let timer = RequestTimer::start();
    let user_id: UserId = parse_id(&id)?;
    let list = state.taste_service.recommend(&user_id).await?;
    Ok(Json(timer.finish(list)))
}

/// GET /api/v1/users/{id}/motivations - Motivation affinity report.
pub async fn motivations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AffinityReport<Motivation>>>, AppError> {
    let timer = RequestTimer::start();
    let user_id: UserId = parse_id(&id)?;
    let report = state.taste_service.motivation_report(&user_id).await?;
    Ok(Json(timer.finish(report)))
}

/// GET /api/v1/users/{id}/submotivations - Submotivation report and keyword query.
pub async fn submotivations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SubmotivationReport>>, AppError> {
    let timer = RequestTimer::start();
    let user_id: UserId = parse_id(&id)?;
    let report = state.taste_service.submotivation_report(&user_id).await?;
    Ok(Json(timer.finish(report).with_link(
        "candidates",
        &format!("/api/v1/users/{user_id}/candidates"),
    )))
}

/// GET /api/v1/users/{id}/candidates - Run the keyword query against the provider.
pub async fn candidates(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Candidates>>, AppError> {
    let timer = RequestTimer::start();
    let user_id: UserId = parse_id(&id)?;
    let report = state.taste_service.submotivation_report(&user_id).await?;
    let entries = state
        .catalog_service
        .source_candidates(&report.content_query, DEFAULT_CANDIDATE_LIMIT)
        .await?;
    Ok(Json(timer.finish(Candidates {
        content_query: report.content_query,
        entries,
    })))
}

/// POST /api/v1/users/{id}/votes - Record a pairwise vote.
pub async fn record_vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<VoteRequest>,
) -> Result<Json<ApiResponse<ChoiceRecord>>, AppError> {
    let timer = RequestTimer::start();
    let user_id: UserId = parse_id(&id)?;
    let record = state.vote_service.record_vote(&user_id, body).await?;
    Ok(Json(timer.finish(record).with_link(
        "history",
        &format!("/api/v1/users/{user_id}/history"),
    )))
}
