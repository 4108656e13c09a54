//! Employee endpoints. Every record leaves through [`respond`], which
//! applies the salary visibility policy for the calling staff member.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{Employee, EmployeeCreate, EmployeeResponse, EmployeeUpdate, Role};

use crate::auth::StaffIdentity;
use crate::db::employees::{self, Deletion, NewEmployee};
use crate::services::salary_visibility::visible_salary;
use crate::state::AppState;
use crate::util::normalize_email;

use super::auth::hash_new_password;
use super::{ApiResult, crypto_err, db_err, require_text};

fn respond(
    state: &AppState,
    viewer: &StaffIdentity,
    employee: Employee,
) -> Result<EmployeeResponse, AppError> {
    let salary = visible_salary(
        &state.cipher,
        Some(viewer),
        employee.id,
        employee.salary.as_deref(),
    )
    .map_err(crypto_err)?;
    Ok(EmployeeResponse::from_employee(employee, salary))
}

fn not_found() -> AppError {
    AppError::new(ErrorCode::EmployeeNotFound)
}

fn require_grant(identity: &StaffIdentity, role: Role) -> Result<(), AppError> {
    if identity.role.can_grant(role) {
        return Ok(());
    }
    tracing::warn!(
        employee_id = identity.employee_id,
        role = %role,
        "Role assignment refused"
    );
    Err(AppError::new(ErrorCode::PermissionDenied).with_detail("role", role.as_str()))
}

/// GET /api/employees
pub async fn list_employees(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
) -> ApiResult<Vec<EmployeeResponse>> {
    let rows = employees::list(&state.pool).await.map_err(db_err)?;
    let out = rows
        .into_iter()
        .map(|e| respond(&state, &identity, e))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(out))
}

/// GET /api/employees/me
pub async fn get_me(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
) -> ApiResult<EmployeeResponse> {
    let employee = employees::find_by_id(&state.pool, identity.employee_id)
        .await
        .map_err(db_err)?
        .ok_or_else(not_found)?;
    Ok(Json(respond(&state, &identity, employee)?))
}

/// GET /api/employees/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<EmployeeResponse> {
    let employee = employees::find_by_id(&state.pool, id)
        .await
        .map_err(db_err)?
        .ok_or_else(not_found)?;
    Ok(Json(respond(&state, &identity, employee)?))
}

/// POST /api/employees (HR staff)
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Json(data): Json<EmployeeCreate>,
) -> ApiResult<EmployeeResponse> {
    identity.require(Role::is_hr_staff)?;
    require_grant(&identity, data.role)?;
    require_text("name", &data.name)?;
    require_text("email", &data.email)?;

    let hashed_password = data
        .password
        .as_deref()
        .map(hash_new_password)
        .transpose()?;
    let salary = state
        .cipher
        .encrypt(data.salary.as_deref())
        .map_err(crypto_err)?;

    let new = NewEmployee {
        name: data.name.trim().to_string(),
        email: normalize_email(&data.email),
        role: data.role,
        designation: data.designation,
        status: data.status,
        employment_type: data.employment_type,
        gender: data.gender,
        join_date: data.join_date,
        salary,
        manager_id: data.manager_id,
        department_id: data.department_id,
        hashed_password,
    };
    let employee = employees::create(&state.pool, new, shared::util::now_millis())
        .await
        .map_err(db_err)?;

    tracing::info!(
        employee_id = employee.id,
        code = %employee.employee_code,
        hired_by = identity.employee_id,
        "Employee hired"
    );
    Ok(Json(respond(&state, &identity, employee)?))
}

/// PUT /api/employees/{id} (HR staff)
pub async fn update_employee(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(mut data): Json<EmployeeUpdate>,
) -> ApiResult<EmployeeResponse> {
    identity.require(Role::is_hr_staff)?;
    if let Some(role) = data.role {
        let current = employees::find_by_id(&state.pool, id)
            .await
            .map_err(db_err)?
            .ok_or_else(not_found)?;
        require_grant(&identity, current.role)?;
        require_grant(&identity, role)?;
    }
    if let Some(name) = &data.name {
        require_text("name", name)?;
    }
    data.email = data.email.as_deref().map(normalize_email);

    let salary = state
        .cipher
        .encrypt(data.salary.as_deref())
        .map_err(crypto_err)?;
    let employee = employees::update(&state.pool, id, &data, salary, shared::util::now_millis())
        .await
        .map_err(db_err)?
        .ok_or_else(not_found)?;
    Ok(Json(respond(&state, &identity, employee)?))
}

/// DELETE /api/employees/{id} (HR staff)
pub async fn delete_employee(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<bool> {
    identity.require(Role::is_hr_staff)?;
    if id == identity.employee_id {
        return Err(AppError::new(ErrorCode::EmployeeCannotDeleteSelf));
    }
    match employees::delete(&state.pool, id).await.map_err(db_err)? {
        Deletion::Deleted => {}
        Deletion::NotFound => return Err(not_found()),
        Deletion::HasReimbursements(claims) => {
            return Err(AppError::new(ErrorCode::EmployeeHasReimbursements)
                .with_detail("reimbursements", claims));
        }
    }
    tracing::info!(employee_id = id, deleted_by = identity.employee_id, "Employee deleted");
    Ok(Json(true))
}
