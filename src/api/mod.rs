pub mod identity;

use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::{post, put};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::*;
use crate::services::aggregator::{self, HolidayStreak, LeaveSimulation};
use crate::services::views::{self, MonthView};
use crate::services::synchronizer;
use crate::state::AppState;

pub use identity::{USER_ID_HEADER, UserId};

#[derive(Deserialize)]
struct RangeQueryParams {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct DateQueryParams {
    date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub leave_dates: Vec<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub overall_percentage: u32,
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubjectDetail {
    pub subject: Subject,
    pub sessions: Vec<ClassSession>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/subjects", get(list_subjects))
        .route("/subjects/{id}", get(subject_detail))
        .route("/sessions", get(list_sessions))
        .route("/sessions/today", get(today_sessions))
        .route("/sessions/{id}/status", put(update_status))
        .route("/dashboard", get(dashboard))
        .route("/calendar/{year}/{month}", get(calendar))
        .route("/leave/simulate", post(simulate_leave))
        .route("/streaks", get(streaks))
        .route("/phases", get(phases))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.ping().await?;
    Ok(StatusCode::OK)
}

async fn list_subjects(State(state): State<AppState>) -> Json<Vec<SubjectInfo>> {
    Json(state.semester.subjects.clone())
}

async fn load(state: &AppState, user: &UserId) -> Vec<ClassSession> {
    synchronizer::load_sessions(state.store.as_ref(), &user.0, &state.semester).await
}

async fn list_sessions(
    State(state): State<AppState>,
    user: UserId,
    Query(params): Query<RangeQueryParams>,
) -> Json<Vec<ClassSession>> {
    let sessions = load(&state, &user)
        .await
        .into_iter()
        .filter(|s| params.from.is_none_or(|from| s.date >= from))
        .filter(|s| params.to.is_none_or(|to| s.date <= to))
        .collect();
    Json(sessions)
}

async fn today_sessions(
    State(state): State<AppState>,
    user: UserId,
    Query(params): Query<DateQueryParams>,
) -> Json<Vec<ClassSession>> {
    let date = params.date.unwrap_or_else(|| Local::now().date_naive());
    let sessions = load(&state, &user).await;
    Json(views::sessions_on(&sessions, date))
}

/// Applies the new status optimistically and persists it in the background.
async fn update_status(
    State(state): State<AppState>,
    user: UserId,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ClassSession>, AppError> {
    if req.status == AttendanceStatus::Pending {
        return Err(AppError::BadRequest(
            "status must be PRESENT, ABSENT or CANCELLED".to_string(),
        ));
    }

    let mut session = state
        .semester
        .sessions()
        .into_iter()
        .find(|s| s.id == id)
        .ok_or(AppError::NotFound)?;
    session.status = req.status;

    info!("{} marked {} as {}", user.0, session.id, req.status.as_str());
    synchronizer::save_attendance(state.store.clone(), user.0, session.clone(), req.status);

    Ok(Json(session))
}

async fn dashboard(State(state): State<AppState>, user: UserId) -> Json<DashboardResponse> {
    let sessions = load(&state, &user).await;
    let subjects = aggregator::aggregate_subjects(&state.semester.subjects, &sessions);
    let overall_percentage = aggregator::overall_percentage(&subjects);
    debug!("Dashboard for {}: {}%", user.0, overall_percentage);

    Json(DashboardResponse {
        overall_percentage,
        subjects,
    })
}

async fn subject_detail(
    State(state): State<AppState>,
    user: UserId,
    Path(id): Path<String>,
) -> Result<Json<SubjectDetail>, AppError> {
    let info = state.semester.subject(&id).ok_or(AppError::NotFound)?;
    let sessions: Vec<ClassSession> = load(&state, &user)
        .await
        .into_iter()
        .filter(|s| s.subject_id == info.id)
        .collect();

    Ok(Json(SubjectDetail {
        subject: aggregator::aggregate_subject(info, &sessions),
        sessions,
    }))
}

async fn calendar(
    State(state): State<AppState>,
    user: UserId,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<MonthView>, AppError> {
    let sessions = load(&state, &user).await;
    let view = views::month_view(&sessions, &state.semester.holidays, year, month)?;
    Ok(Json(view))
}

async fn simulate_leave(
    State(state): State<AppState>,
    user: UserId,
    Json(req): Json<LeaveRequest>,
) -> Json<LeaveSimulation> {
    let sessions = load(&state, &user).await;
    Json(aggregator::simulate_leave(
        &sessions,
        &req.leave_dates,
        &state.semester.phases,
    ))
}

async fn streaks(State(state): State<AppState>) -> Json<Vec<HolidayStreak>> {
    Json(aggregator::detect_holiday_streaks(&state.semester.holidays))
}

async fn phases(
    State(state): State<AppState>,
    Query(params): Query<DateQueryParams>,
) -> Json<Vec<AcademicPhase>> {
    let phases = match params.date {
        Some(date) => views::active_phases(&state.semester.phases, date),
        None => state.semester.phases.clone(),
    };
    Json(phases)
}
