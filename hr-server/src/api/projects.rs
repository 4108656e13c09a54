//! Project endpoints. Mutations are open to HR staff and managers.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{Project, ProjectCreate, ProjectTeamUpdate, ProjectUpdate, Role};

use crate::auth::StaffIdentity;
use crate::db::projects;
use crate::state::AppState;

use super::{ApiResult, db_err, require_text};

fn can_manage(role: &Role) -> bool {
    role.is_hr_staff() || *role == Role::Manager
}

fn not_found() -> AppError {
    AppError::new(ErrorCode::ProjectNotFound)
}

pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Vec<Project>> {
    let rows = projects::list(&state.pool).await.map_err(db_err)?;
    Ok(Json(rows))
}

pub async fn get_project(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Project> {
    let project = projects::find_by_id(&state.pool, id)
        .await
        .map_err(db_err)?
        .ok_or_else(not_found)?;
    Ok(Json(project))
}

pub async fn create_project(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Json(data): Json<ProjectCreate>,
) -> ApiResult<Project> {
    identity.require(can_manage)?;
    require_text("name", &data.name)?;
    let project = projects::create(&state.pool, &data, shared::util::now_millis())
        .await
        .map_err(db_err)?;
    Ok(Json(project))
}

pub async fn update_project(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(data): Json<ProjectUpdate>,
) -> ApiResult<Project> {
    identity.require(can_manage)?;
    let project = projects::update(&state.pool, id, &data)
        .await
        .map_err(db_err)?
        .ok_or_else(not_found)?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}/team (replaces the member set)
pub async fn set_team(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(data): Json<ProjectTeamUpdate>,
) -> ApiResult<Project> {
    identity.require(can_manage)?;
    let project = projects::set_team(&state.pool, id, &data.members)
        .await
        .map_err(db_err)?
        .ok_or_else(not_found)?;
    Ok(Json(project))
}

/// POST /api/projects/{id}/team/{employee_id}
pub async fn add_member(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path((id, employee_id)): Path<(i64, i64)>,
) -> ApiResult<Project> {
    identity.require(can_manage)?;
    let project = projects::add_member(&state.pool, id, employee_id)
        .await
        .map_err(db_err)?
        .ok_or_else(not_found)?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}/team/{employee_id}
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path((id, employee_id)): Path<(i64, i64)>,
) -> ApiResult<Project> {
    identity.require(can_manage)?;
    if !projects::remove_member(&state.pool, id, employee_id)
        .await
        .map_err(db_err)?
    {
        return Err(AppError::new(ErrorCode::ProjectMemberNotFound));
    }
    let project = projects::find_by_id(&state.pool, id)
        .await
        .map_err(db_err)?
        .ok_or_else(not_found)?;
    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<bool> {
    identity.require(can_manage)?;
    if !projects::delete(&state.pool, id).await.map_err(db_err)? {
        return Err(not_found());
    }
    Ok(Json(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_manage() {
        let allowed: Vec<Role> = Role::ALL.into_iter().filter(can_manage).collect();
        assert_eq!(
            allowed,
            vec![Role::Superadmin, Role::Admin, Role::Manager, Role::Hr]
        );
    }
}
