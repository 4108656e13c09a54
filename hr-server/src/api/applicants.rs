//! Recruitment pipeline endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Applicant, ApplicantCreate, ApplicantNoteCreate, ApplicantUpdate, OfferStatusUpdate, Role,
};

use crate::auth::StaffIdentity;
use crate::db::applicants;
use crate::state::AppState;

use super::{ApiResult, db_err, require_text};

#[derive(Debug, Default, Deserialize)]
pub struct ApplicantQuery {
    pub job_id: Option<i64>,
}

fn not_found() -> AppError {
    AppError::new(ErrorCode::ApplicantNotFound)
}

/// GET /api/applicants?job_id=
pub async fn list_applicants(
    State(state): State<AppState>,
    Query(query): Query<ApplicantQuery>,
) -> ApiResult<Vec<Applicant>> {
    let rows = applicants::list(&state.pool, query.job_id)
        .await
        .map_err(db_err)?;
    Ok(Json(rows))
}

pub async fn get_applicant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Applicant> {
    let applicant = applicants::find_by_id(&state.pool, id)
        .await
        .map_err(db_err)?
        .ok_or_else(not_found)?;
    Ok(Json(applicant))
}

pub async fn create_applicant(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Json(data): Json<ApplicantCreate>,
) -> ApiResult<Applicant> {
    identity.require(Role::is_hr_staff)?;
    require_text("name", &data.name)?;
    require_text("email", &data.email)?;
    let applicant = applicants::create(&state.pool, &data, shared::util::now_millis())
        .await
        .map_err(db_err)?;
    Ok(Json(applicant))
}

pub async fn update_applicant(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(data): Json<ApplicantUpdate>,
) -> ApiResult<Applicant> {
    identity.require(Role::is_hr_staff)?;
    let applicant = applicants::update(&state.pool, id, &data)
        .await
        .map_err(db_err)?
        .ok_or_else(not_found)?;
    Ok(Json(applicant))
}

/// PUT /api/applicants/{id}/status
///
/// Any status may follow any other.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(data): Json<OfferStatusUpdate>,
) -> ApiResult<Applicant> {
    identity.require(Role::is_hr_staff)?;
    let applicant = applicants::set_status(
        &state.pool,
        id,
        data.status,
        identity.employee_id,
        shared::util::now_millis(),
    )
    .await
    .map_err(db_err)?
    .ok_or_else(not_found)?;

    tracing::info!(
        applicant_id = id,
        status = %applicant.offer_status,
        changed_by = identity.employee_id,
        "Offer status changed"
    );
    Ok(Json(applicant))
}

/// POST /api/applicants/{id}/notes
pub async fn add_note(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(data): Json<ApplicantNoteCreate>,
) -> ApiResult<Applicant> {
    identity.require(Role::is_hr_staff)?;
    require_text("text", &data.text)?;
    let applicant = applicants::add_note(&state.pool, id, &data.text, shared::util::now_millis())
        .await
        .map_err(db_err)?
        .ok_or_else(not_found)?;
    Ok(Json(applicant))
}

pub async fn delete_applicant(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<bool> {
    identity.require(Role::is_hr_staff)?;
    if !applicants::delete(&state.pool, id).await.map_err(db_err)? {
        return Err(not_found());
    }
    Ok(Json(true))
}
