//! Service-layer error for hr-server
//!
//! `ServiceError` lets db and crypto failures travel with `?` up to the
//! handlers, where they become an [`AppError`]. Infrastructure failures are
//! logged once here and surface as 500. Constraint violations are client
//! errors: a UNIQUE violation is a 409, and a foreign key pointing at a
//! missing row is the referenced entity's 404.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::crypto::CryptoError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum ServiceError {
    /// Database or infrastructure error
    Db(BoxError),
    /// Business-rule error, passed through to the client as is
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unique");
                return ServiceError::App(conflict(constraint));
            }
            if db_err.is_foreign_key_violation() {
                let constraint = db_err.constraint().unwrap_or("foreign_key");
                return ServiceError::App(broken_reference(constraint));
            }
        }
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<CryptoError> for ServiceError {
    fn from(e: CryptoError) -> Self {
        tracing::error!(error = %e, "Stored salary could not be decrypted");
        ServiceError::App(AppError::new(ErrorCode::SalaryCryptoFailed))
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        AppError::from(self).into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Map a violated UNIQUE constraint to the matching conflict code.
fn conflict(constraint: &str) -> AppError {
    let code = match constraint {
        "employees_email_key" => ErrorCode::EmployeeEmailExists,
        "employees_employee_code_key" => ErrorCode::EmployeeCodeExists,
        "departments_name_key" => ErrorCode::DepartmentNameExists,
        _ => ErrorCode::AlreadyExists,
    };
    AppError::new(code).with_detail("constraint", constraint)
}

/// Map a violated foreign key to the error of the row it points at.
///
/// Inserts and updates that name an unknown id land here. The payee key on
/// `reimbursements` is `RESTRICT`, so it fires on employee deletion instead.
fn broken_reference(constraint: &str) -> AppError {
    let code = match constraint {
        "reimbursements_employee_id_fkey" => ErrorCode::EmployeeHasReimbursements,
        "employees_department_id_fkey"
        | "job_postings_department_id_fkey"
        | "projects_department_id_fkey"
        | "reimbursements_department_id_fkey" => ErrorCode::DepartmentNotFound,
        "employees_manager_id_fkey"
        | "departments_head_fk"
        | "notifications_employee_id_fkey"
        | "projects_manager_id_fkey"
        | "project_members_employee_id_fkey"
        | "reimbursements_approver_id_fkey" => ErrorCode::EmployeeNotFound,
        "applicants_job_id_fkey" => ErrorCode::JobNotFound,
        "project_members_project_id_fkey" | "reimbursements_project_id_fkey" => {
            ErrorCode::ProjectNotFound
        }
        _ => ErrorCode::ValidationFailed,
    };
    AppError::new(code).with_detail("constraint", constraint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_codes() {
        assert_eq!(
            conflict("employees_email_key").code,
            ErrorCode::EmployeeEmailExists
        );
        assert_eq!(
            conflict("employees_employee_code_key").code,
            ErrorCode::EmployeeCodeExists
        );
        assert_eq!(
            conflict("departments_name_key").code,
            ErrorCode::DepartmentNameExists
        );
        let other = conflict("project_members_pkey");
        assert_eq!(other.code, ErrorCode::AlreadyExists);
        assert_eq!(other.http_status(), http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_broken_reference_codes() {
        let cases = [
            ("employees_department_id_fkey", ErrorCode::DepartmentNotFound),
            ("projects_department_id_fkey", ErrorCode::DepartmentNotFound),
            ("employees_manager_id_fkey", ErrorCode::EmployeeNotFound),
            ("project_members_employee_id_fkey", ErrorCode::EmployeeNotFound),
            ("departments_head_fk", ErrorCode::EmployeeNotFound),
            ("applicants_job_id_fkey", ErrorCode::JobNotFound),
            ("reimbursements_project_id_fkey", ErrorCode::ProjectNotFound),
        ];
        for (constraint, code) in cases {
            let err = broken_reference(constraint);
            assert_eq!(err.code, code, "{constraint}");
            assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);
            assert_eq!(err.details.unwrap()["constraint"], constraint);
        }

        let payee = broken_reference("reimbursements_employee_id_fkey");
        assert_eq!(payee.code, ErrorCode::EmployeeHasReimbursements);
        assert_eq!(payee.http_status(), http::StatusCode::CONFLICT);

        let other = broken_reference("some_new_fkey");
        assert_eq!(other.http_status(), http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_crypto_error_is_500() {
        let err: AppError = ServiceError::from(CryptoError::DecryptFailed).into();
        assert_eq!(err.code, ErrorCode::SalaryCryptoFailed);
        assert_eq!(err.http_status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_row_not_found_is_database_error() {
        let err: AppError = ServiceError::from(sqlx::Error::RowNotFound).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
