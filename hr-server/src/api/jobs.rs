//! Job posting endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{JobPosting, JobPostingCreate, JobPostingUpdate, Role};

use crate::auth::StaffIdentity;
use crate::db::jobs;
use crate::state::AppState;

use super::{ApiResult, db_err, require_text};

fn not_found() -> AppError {
    AppError::new(ErrorCode::JobNotFound)
}

pub async fn list_jobs(State(state): State<AppState>) -> ApiResult<Vec<JobPosting>> {
    let rows = jobs::list(&state.pool).await.map_err(db_err)?;
    Ok(Json(rows))
}

pub async fn get_job(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<JobPosting> {
    let job = jobs::find_by_id(&state.pool, id)
        .await
        .map_err(db_err)?
        .ok_or_else(not_found)?;
    Ok(Json(job))
}

pub async fn create_job(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Json(data): Json<JobPostingCreate>,
) -> ApiResult<JobPosting> {
    identity.require(Role::is_hr_staff)?;
    require_text("title", &data.title)?;
    let job = jobs::create(&state.pool, &data, shared::util::now_millis())
        .await
        .map_err(db_err)?;
    Ok(Json(job))
}

pub async fn update_job(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(data): Json<JobPostingUpdate>,
) -> ApiResult<JobPosting> {
    identity.require(Role::is_hr_staff)?;
    let job = jobs::update(&state.pool, id, &data)
        .await
        .map_err(db_err)?
        .ok_or_else(not_found)?;
    Ok(Json(job))
}

pub async fn delete_job(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<bool> {
    identity.require(Role::is_hr_staff)?;
    if !jobs::delete(&state.pool, id).await.map_err(db_err)? {
        return Err(not_found());
    }
    Ok(Json(true))
}
