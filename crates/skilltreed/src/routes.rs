//! API routes for skilltreed.
//!
//! Thin glue over the ledger store: each handler normalizes its inputs,
//! calls one store operation, and maps the domain error taxonomy onto
//! HTTP statuses. A duplicate completion is a 200 with
//! `already_completed = true`, never an error.

use crate::server::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use skilltree_common::types::{
    Account, ActivityResponse, CompleteCourseRequest, CompleteLessonRequest, CompletionResponse,
    CourseListResponse, CourseStatus, HealthResponse, RegisterRequest, StartCourseRequest,
};
use skilltree_common::{AccountProgress, LedgerError};
use std::sync::Arc;
use tracing::{error, info};

type AppStateArc = Arc<AppState>;
type ApiError = (StatusCode, String);

fn reject(err: LedgerError) -> ApiError {
    let status = match &err {
        LedgerError::AccountNotFound(_) | LedgerError::CourseNotFound(_) => StatusCode::NOT_FOUND,
        LedgerError::AccountExists(_) => StatusCode::CONFLICT,
        LedgerError::InvalidEmail(_) | LedgerError::MissingField(_) => StatusCode::BAD_REQUEST,
        LedgerError::Storage(_) | LedgerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Storage failure: {err}");
    }
    (status, err.to_string())
}

// ============================================================================
// Account Routes
// ============================================================================

pub fn account_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/accounts/register", post(register))
        .route("/v1/accounts/progress", get(account_progress))
        .route("/v1/activity", get(activity))
}

async fn register(
    State(state): State<AppStateArc>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<Account>, ApiError> {
    let account = state
        .store
        .register_account(&req.email, &req.display_name)
        .map_err(reject)?;
    info!("Registered account {}", account.email);
    Ok(Json(account))
}

#[derive(Deserialize)]
struct EmailQuery {
    email: String,
}

async fn account_progress(
    State(state): State<AppStateArc>,
    Query(q): Query<EmailQuery>,
) -> Result<Json<AccountProgress>, ApiError> {
    let progress = state.store.account_progress(&q.email).map_err(reject)?;
    Ok(Json(progress))
}

#[derive(Deserialize)]
struct ActivityQuery {
    email: String,
    limit: Option<u32>,
}

async fn activity(
    State(state): State<AppStateArc>,
    Query(q): Query<ActivityQuery>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let limit = q.limit.unwrap_or(20).clamp(1, 100);
    let entries = state
        .store
        .recent_activity(&q.email, limit)
        .map_err(reject)?;
    Ok(Json(ActivityResponse {
        email: q.email,
        entries,
    }))
}

// ============================================================================
// Course Routes
// ============================================================================

pub fn course_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/courses", get(list_courses))
        .route("/v1/courses/start", post(start_course))
        .route("/v1/courses/status", get(course_status))
        .route("/v1/courses/complete-lesson", post(complete_lesson))
        .route("/v1/courses/complete-quiz", post(complete_quiz))
        .route("/v1/courses/complete-challenge", post(complete_challenge))
        .route("/v1/courses/complete-course", post(complete_course))
}

async fn list_courses(
    State(state): State<AppStateArc>,
    Query(q): Query<EmailQuery>,
) -> Result<Json<CourseListResponse>, ApiError> {
    let courses = state.store.list_courses(&q.email).map_err(reject)?;
    Ok(Json(CourseListResponse { courses }))
}

async fn start_course(
    State(state): State<AppStateArc>,
    Json(req): Json<StartCourseRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .start_course(&req.email, &req.course_id)
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct CourseStatusQuery {
    email: String,
    course_id: String,
}

async fn course_status(
    State(state): State<AppStateArc>,
    Query(q): Query<CourseStatusQuery>,
) -> Result<Json<CourseStatus>, ApiError> {
    let status = state
        .store
        .course_status(&q.email, &q.course_id)
        .map_err(reject)?;
    Ok(Json(status))
}

async fn complete_lesson(
    State(state): State<AppStateArc>,
    Json(req): Json<CompleteLessonRequest>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let outcome = state
        .store
        .complete_lesson(&req.email, &req.course_id, req.lesson_number)
        .map_err(reject)?;
    Ok(Json(outcome))
}

async fn complete_quiz(
    State(state): State<AppStateArc>,
    Json(req): Json<CompleteLessonRequest>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let outcome = state
        .store
        .complete_quiz(&req.email, &req.course_id, req.lesson_number)
        .map_err(reject)?;
    Ok(Json(outcome))
}

async fn complete_challenge(
    State(state): State<AppStateArc>,
    Json(req): Json<CompleteLessonRequest>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let outcome = state
        .store
        .complete_challenge(&req.email, &req.course_id, req.lesson_number)
        .map_err(reject)?;
    Ok(Json(outcome))
}

async fn complete_course(
    State(state): State<AppStateArc>,
    Json(req): Json<CompleteCourseRequest>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let outcome = state
        .store
        .complete_course(&req.email, &req.course_id)
        .map_err(reject)?;
    Ok(Json(outcome))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health))
}

async fn health(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
