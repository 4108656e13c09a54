//! Reimbursement claims
//!
//! Anyone may submit and comment on their own claims. Finance approvers
//! see every claim and move it through PENDING / APPROVED / REJECTED / PAID.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Reimbursement, ReimbursementCommentCreate, ReimbursementCreate, ReimbursementStatusUpdate,
    Role,
};

use crate::auth::StaffIdentity;
use crate::db::reimbursements;
use crate::state::AppState;

use super::{ApiResult, db_err, require_text};

fn not_found() -> AppError {
    AppError::new(ErrorCode::ReimbursementNotFound)
}

fn can_see(identity: &StaffIdentity, claim: &Reimbursement) -> bool {
    identity.role.is_finance_approver() || claim.employee_id == identity.employee_id
}

/// Load a claim the caller is allowed to see. Hidden claims read as 404.
async fn visible_claim(
    state: &AppState,
    identity: &StaffIdentity,
    id: i64,
) -> Result<Reimbursement, AppError> {
    reimbursements::find_by_id(&state.pool, id)
        .await
        .map_err(db_err)?
        .filter(|claim| can_see(identity, claim))
        .ok_or_else(not_found)
}

/// GET /api/reimbursements
pub async fn list_reimbursements(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
) -> ApiResult<Vec<Reimbursement>> {
    let rows = if identity.role.is_finance_approver() {
        reimbursements::list_all(&state.pool).await
    } else {
        reimbursements::list_for_employee(&state.pool, identity.employee_id).await
    }
    .map_err(db_err)?;
    Ok(Json(rows))
}

pub async fn get_reimbursement(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<Reimbursement> {
    Ok(Json(visible_claim(&state, &identity, id).await?))
}

/// POST /api/reimbursements (payee is the caller)
pub async fn create_reimbursement(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Json(data): Json<ReimbursementCreate>,
) -> ApiResult<Reimbursement> {
    require_text("category", &data.category)?;
    if !data.amounts_valid() {
        return Err(AppError::new(ErrorCode::ReimbursementInvalidAmount));
    }
    let claim = reimbursements::create(
        &state.pool,
        identity.employee_id,
        &data,
        shared::util::now_millis(),
    )
    .await
    .map_err(db_err)?;
    Ok(Json(claim))
}

/// PUT /api/reimbursements/{id}/status (finance approvers)
pub async fn update_status(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(data): Json<ReimbursementStatusUpdate>,
) -> ApiResult<Reimbursement> {
    identity.require(Role::is_finance_approver)?;
    let claim = reimbursements::set_status(
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
        reimbursement_id = id,
        status = %claim.status,
        approver = identity.employee_id,
        "Reimbursement status changed"
    );
    Ok(Json(claim))
}

/// POST /api/reimbursements/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(data): Json<ReimbursementCommentCreate>,
) -> ApiResult<Reimbursement> {
    require_text("text", &data.text)?;
    visible_claim(&state, &identity, id).await?;
    let claim = reimbursements::add_comment(
        &state.pool,
        id,
        identity.employee_id,
        &data.text,
        shared::util::now_millis(),
    )
    .await
    .map_err(db_err)?
    .ok_or_else(not_found)?;
    Ok(Json(claim))
}
