//! Department endpoints. Reads are open to all staff, mutations to HR staff.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{Department, DepartmentCreate, DepartmentUpdate, Role};

use crate::auth::StaffIdentity;
use crate::db::departments;
use crate::state::AppState;

use super::{ApiResult, db_err, require_text};

fn not_found() -> AppError {
    AppError::new(ErrorCode::DepartmentNotFound)
}

pub async fn list_departments(State(state): State<AppState>) -> ApiResult<Vec<Department>> {
    let rows = departments::list(&state.pool).await.map_err(db_err)?;
    Ok(Json(rows))
}

pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Department> {
    let department = departments::find_by_id(&state.pool, id)
        .await
        .map_err(db_err)?
        .ok_or_else(not_found)?;
    Ok(Json(department))
}

pub async fn create_department(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Json(data): Json<DepartmentCreate>,
) -> ApiResult<Department> {
    identity.require(Role::is_hr_staff)?;
    require_text("name", &data.name)?;
    let department = departments::create(&state.pool, &data, shared::util::now_millis())
        .await
        .map_err(db_err)?;
    Ok(Json(department))
}

pub async fn update_department(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(data): Json<DepartmentUpdate>,
) -> ApiResult<Department> {
    identity.require(Role::is_hr_staff)?;
    if let Some(name) = &data.name {
        require_text("name", name)?;
    }
    let department = departments::update(&state.pool, id, &data)
        .await
        .map_err(db_err)?
        .ok_or_else(not_found)?;
    Ok(Json(department))
}

pub async fn delete_department(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<bool> {
    identity.require(Role::is_hr_staff)?;
    if !departments::delete(&state.pool, id).await.map_err(db_err)? {
        return Err(not_found());
    }
    Ok(Json(true))
}
