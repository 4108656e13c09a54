//! Authentication endpoints: register, login

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{EmployeeResponse, RegisterRequest, Role};

use crate::auth::jwt::create_token;
use crate::db::employees::{self, NewEmployee};
use crate::state::AppState;
use crate::util::{MIN_PASSWORD_LEN, hash_password, normalize_email, verify_password};

use super::{ApiResult, db_err, require_text};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token plus the caller's own record (own salary is always visible).
#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub employee: EmployeeResponse,
}

fn issue_token(state: &AppState, id: i64, email: &str, role: Role) -> Result<String, AppError> {
    create_token(id, email, role, &state.jwt_secret).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })
}

fn hash(password: &str) -> Result<String, AppError> {
    hash_password(password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })
}

/// Check length and hash; shared with HR hires that set an initial password.
pub(crate) fn hash_new_password(password: &str) -> Result<String, AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort)
            .with_detail("min_length", MIN_PASSWORD_LEN));
    }
    hash(password)
}

/// POST /api/auth/register
///
/// Self-service signup: always role EMPLOYEE, gets a fresh code and a
/// welcome notification.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<AuthResponse> {
    require_text("name", &req.name)?;
    require_text("email", &req.email)?;
    let hashed_password = hash_new_password(&req.password)?;

    let new = NewEmployee {
        name: req.name.trim().to_string(),
        email: normalize_email(&req.email),
        role: Role::Employee,
        designation: None,
        status: None,
        employment_type: None,
        gender: None,
        join_date: None,
        salary: None,
        manager_id: None,
        department_id: None,
        hashed_password: Some(hashed_password),
    };
    let employee = employees::create(&state.pool, new, shared::util::now_millis())
        .await
        .map_err(db_err)?;

    tracing::info!(
        employee_id = employee.id,
        code = %employee.employee_code,
        "Employee registered"
    );

    let token = issue_token(&state, employee.id, &employee.email, employee.role)?;
    Ok(Json(AuthResponse {
        token,
        employee: EmployeeResponse::from_employee(employee, None),
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let email = normalize_email(&req.email);
    let employee = employees::find_by_email(&state.pool, &email)
        .await
        .map_err(db_err)?
        .ok_or_else(AppError::invalid_credentials)?;

    let Some(hashed) = employee.hashed_password.as_deref() else {
        return Err(AppError::new(ErrorCode::PasswordNotSet));
    };
    if !verify_password(&req.password, hashed) {
        tracing::warn!(employee_id = employee.id, "Failed login");
        return Err(AppError::invalid_credentials());
    }

    // Unreadable salary: log it, still issue the token. GET /api/employees/me
    // returns the 500.
    let salary = state
        .cipher
        .decrypt(employee.salary.as_deref())
        .unwrap_or_else(|e| {
            tracing::error!(
                employee_id = employee.id,
                error = %e,
                "Own salary unreadable at login"
            );
            None
        });
    let token = issue_token(&state, employee.id, &employee.email, employee.role)?;

    Ok(Json(AuthResponse {
        token,
        employee: EmployeeResponse::from_employee(employee, salary),
    }))
}
