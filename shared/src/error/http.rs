//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::EmployeeNotFound
            | Self::NotificationNotFound
            | Self::DepartmentNotFound
            | Self::JobNotFound
            | Self::ApplicantNotFound
            | Self::ProjectNotFound
            | Self::ProjectMemberNotFound
            | Self::ReimbursementNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::EmployeeEmailExists
            | Self::EmployeeCodeExists
            | Self::EmployeeHasReimbursements
            | Self::DepartmentNameExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::PasswordNotSet => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::RoleRequired => StatusCode::FORBIDDEN,

            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::SalaryCryptoFailed => StatusCode::INTERNAL_SERVER_ERROR,

            // validation and business-rule failures
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
