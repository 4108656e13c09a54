//! HTTP routes for hr-server

pub mod applicants;
pub mod auth;
pub mod departments;
pub mod employees;
pub mod health;
pub mod jobs;
pub mod notifications;
pub mod projects;
pub mod reimbursements;

use axum::routing::{get, post, put};
use axum::{Json, Router, middleware};
use shared::error::AppError;
use tower_http::trace::TraceLayer;

use crate::auth::jwt::staff_auth_middleware;
use crate::auth::rate_limit::{login_rate_limit, register_rate_limit};
use crate::crypto::CryptoError;
use crate::error::ServiceError;
use crate::state::AppState;

pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Map a db error through [`ServiceError`] (logs, conflict detection).
pub(crate) fn db_err(e: sqlx::Error) -> AppError {
    ServiceError::from(e).into()
}

pub(crate) fn crypto_err(e: CryptoError) -> AppError {
    ServiceError::from(e).into()
}

/// Reject blank required text fields.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    let login = Router::new()
        .route("/api/auth/login", post(auth::login))
        .layer(middleware::from_fn_with_state(state.clone(), login_rate_limit));

    let register = Router::new()
        .route("/api/auth/register", post(auth::register))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            register_rate_limit,
        ));

    let protected = Router::new()
        .route(
            "/api/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route("/api/employees/me", get(employees::get_me))
        .route(
            "/api/employees/{id}",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route("/api/notifications", get(notifications::list_notifications))
        .route(
            "/api/notifications/{id}/read",
            post(notifications::mark_read),
        )
        .route(
            "/api/departments",
            get(departments::list_departments).post(departments::create_department),
        )
        .route(
            "/api/departments/{id}",
            get(departments::get_department)
                .put(departments::update_department)
                .delete(departments::delete_department),
        )
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route(
            "/api/jobs/{id}",
            get(jobs::get_job)
                .put(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route(
            "/api/applicants",
            get(applicants::list_applicants).post(applicants::create_applicant),
        )
        .route(
            "/api/applicants/{id}",
            get(applicants::get_applicant)
                .put(applicants::update_applicant)
                .delete(applicants::delete_applicant),
        )
        .route(
            "/api/applicants/{id}/status",
            put(applicants::update_status),
        )
        .route("/api/applicants/{id}/notes", post(applicants::add_note))
        .route(
            "/api/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/api/projects/{id}/team", put(projects::set_team))
        .route(
            "/api/projects/{id}/team/{employee_id}",
            post(projects::add_member).delete(projects::remove_member),
        )
        .route(
            "/api/reimbursements",
            get(reimbursements::list_reimbursements).post(reimbursements::create_reimbursement),
        )
        .route(
            "/api/reimbursements/{id}",
            get(reimbursements::get_reimbursement),
        )
        .route(
            "/api/reimbursements/{id}/status",
            put(reimbursements::update_status),
        )
        .route(
            "/api/reimbursements/{id}/comments",
            post(reimbursements::add_comment),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            staff_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(login)
        .merge(register)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
