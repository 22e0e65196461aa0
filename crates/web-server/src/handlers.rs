use crate::{error::AppError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use core_types::{Candidate, CandidateUpdate, NewCandidate};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    page: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}
fn default_page() -> usize { 1 }
fn default_limit() -> usize { 20 }

impl Pagination {
    fn offset(&self) -> i64 {
        (self.page.max(1) as i64 - 1) * self.limit as i64
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

/// # GET /api/v1/candidates
pub async fn list_candidates(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    let candidates = state
        .repo
        .list(pagination.limit as i64, pagination.offset())
        .await?;
    Ok(Json(candidates))
}

/// # POST /api/v1/candidates
pub async fn create_candidate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewCandidate>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    payload.validate()?;
    let candidate = state.repo.insert(&payload).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

/// # GET /api/v1/candidates/:id
pub async fn get_candidate(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Candidate>, AppError> {
    let candidate = state.repo.get(id).await?;
    Ok(Json(candidate))
}

/// # PUT /api/v1/candidates/:id
/// Full replacement: every field must be present and valid.
pub async fn update_candidate(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewCandidate>, JsonRejection>,
) -> Result<Json<Candidate>, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    payload.validate()?;
    let candidate = state.repo.update(id, &payload).await?;
    Ok(Json(candidate))
}

/// # PATCH /api/v1/candidates/:id
/// Partial update: only the supplied fields are validated and changed.
pub async fn patch_candidate(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CandidateUpdate>, JsonRejection>,
) -> Result<Json<Candidate>, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    payload.validate()?;
    // An empty patch changes nothing; skip the write and echo the stored row.
    let candidate = if payload.is_empty() {
        state.repo.get(id).await?
    } else {
        state.repo.patch(id, &payload).await?
    };
    Ok(Json(candidate))
}

/// # DELETE /api/v1/candidates/:id
pub async fn delete_candidate(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, AppError> {
    state.repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// # GET /api/v1/candidates/search?q=<string>
/// Ranks candidates whose name contains at least one query word, best
/// word-overlap first; ties keep insertion order.
pub async fn search_candidates(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    let words = relevancy::parse_query(&params.q)?;
    let matches = state.repo.search_by_name(&words).await?;
    Ok(Json(relevancy::rank(matches, &words)))
}
