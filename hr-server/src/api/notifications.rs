//! Notification endpoints, scoped to the caller

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::Notification;

use crate::auth::StaffIdentity;
use crate::db::notifications;
use crate::state::AppState;

use super::{ApiResult, db_err};

/// GET /api/notifications (own, newest first)
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
) -> ApiResult<Vec<Notification>> {
    let rows = notifications::list_for_employee(&state.pool, identity.employee_id)
        .await
        .map_err(db_err)?;
    Ok(Json(rows))
}

/// POST /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<Notification> {
    let notification = notifications::mark_read(&state.pool, id, identity.employee_id)
        .await
        .map_err(db_err)?
        .ok_or_else(|| AppError::new(ErrorCode::NotificationNotFound))?;
    Ok(Json(notification))
}
