//! Unified error codes for the HR service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Employee errors
//! - 4xxx: Department errors
//! - 5xxx: Recruitment errors (job postings, applicants)
//! - 6xxx: Project errors
//! - 7xxx: Reimbursement errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Too many requests from one client
    TooManyRequests = 9,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Password too short
    PasswordTooShort = 1005,
    /// Account has no password set (HR hire not yet registered)
    PasswordNotSet = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,

    // ==================== 3xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 3001,
    /// Employee email already exists
    EmployeeEmailExists = 3002,
    /// Employee code already issued
    EmployeeCodeExists = 3003,
    /// Unknown role name
    InvalidRole = 3004,
    /// Cannot delete own account
    EmployeeCannotDeleteSelf = 3005,
    /// Employee still has reimbursement claims on file
    EmployeeHasReimbursements = 3006,
    /// Notification not found
    NotificationNotFound = 3101,

    // ==================== 4xxx: Department ====================
    /// Department not found
    DepartmentNotFound = 4001,
    /// Department name already exists
    DepartmentNameExists = 4002,

    // ==================== 5xxx: Recruitment ====================
    /// Job posting not found
    JobNotFound = 5001,
    /// Applicant not found
    ApplicantNotFound = 5101,

    // ==================== 6xxx: Project ====================
    /// Project not found
    ProjectNotFound = 6001,
    /// Project member not found
    ProjectMemberNotFound = 6002,

    // ==================== 7xxx: Reimbursement ====================
    /// Reimbursement not found
    ReimbursementNotFound = 7001,
    /// Reimbursement amount is invalid
    ReimbursementInvalidAmount = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Stored salary could not be encrypted or decrypted
    SalaryCryptoFailed = 9101,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::TooManyRequests => "Too many requests, try again later",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Invalid token",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",
            ErrorCode::PasswordNotSet => "Account has no password, register first",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Required role is missing",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeEmailExists => "Employee email already exists",
            ErrorCode::EmployeeCodeExists => "Employee code already issued",
            ErrorCode::InvalidRole => "Unknown role",
            ErrorCode::EmployeeCannotDeleteSelf => "Cannot delete own account",
            ErrorCode::EmployeeHasReimbursements => {
                "Employee has reimbursement claims and cannot be deleted"
            }
            ErrorCode::NotificationNotFound => "Notification not found",

            // Department
            ErrorCode::DepartmentNotFound => "Department not found",
            ErrorCode::DepartmentNameExists => "Department name already exists",

            // Recruitment
            ErrorCode::JobNotFound => "Job posting not found",
            ErrorCode::ApplicantNotFound => "Applicant not found",

            // Project
            ErrorCode::ProjectNotFound => "Project not found",
            ErrorCode::ProjectMemberNotFound => "Employee is not a member of this project",

            // Reimbursement
            ErrorCode::ReimbursementNotFound => "Reimbursement not found",
            ErrorCode::ReimbursementInvalidAmount => "Reimbursement amount must be positive",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::SalaryCryptoFailed => "Salary could not be processed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            9 => Ok(ErrorCode::TooManyRequests),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::PasswordTooShort),
            1006 => Ok(ErrorCode::PasswordNotSet),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),

            // Employee
            3001 => Ok(ErrorCode::EmployeeNotFound),
            3002 => Ok(ErrorCode::EmployeeEmailExists),
            3003 => Ok(ErrorCode::EmployeeCodeExists),
            3004 => Ok(ErrorCode::InvalidRole),
            3005 => Ok(ErrorCode::EmployeeCannotDeleteSelf),
            3006 => Ok(ErrorCode::EmployeeHasReimbursements),
            3101 => Ok(ErrorCode::NotificationNotFound),

            // Department
            4001 => Ok(ErrorCode::DepartmentNotFound),
            4002 => Ok(ErrorCode::DepartmentNameExists),

            // Recruitment
            5001 => Ok(ErrorCode::JobNotFound),
            5101 => Ok(ErrorCode::ApplicantNotFound),

            // Project
            6001 => Ok(ErrorCode::ProjectNotFound),
            6002 => Ok(ErrorCode::ProjectMemberNotFound),

            // Reimbursement
            7001 => Ok(ErrorCode::ReimbursementNotFound),
            7002 => Ok(ErrorCode::ReimbursementInvalidAmount),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9101 => Ok(ErrorCode::SalaryCryptoFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::EmployeeNotFound.code(), 3001);
        assert_eq!(ErrorCode::DepartmentNotFound.code(), 4001);
        assert_eq!(ErrorCode::ApplicantNotFound.code(), 5101);
        assert_eq!(ErrorCode::ProjectNotFound.code(), 6001);
        assert_eq!(ErrorCode::ReimbursementNotFound.code(), 7001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::SalaryCryptoFailed.code(), 9101);
    }

    #[test]
    fn test_try_from_roundtrip_all_known() {
        let all = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidFormat,
            ErrorCode::RequiredField,
            ErrorCode::TooManyRequests,
            ErrorCode::NotAuthenticated,
            ErrorCode::InvalidCredentials,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::PasswordTooShort,
            ErrorCode::PasswordNotSet,
            ErrorCode::PermissionDenied,
            ErrorCode::RoleRequired,
            ErrorCode::EmployeeNotFound,
            ErrorCode::EmployeeEmailExists,
            ErrorCode::EmployeeCodeExists,
            ErrorCode::InvalidRole,
            ErrorCode::EmployeeCannotDeleteSelf,
            ErrorCode::EmployeeHasReimbursements,
            ErrorCode::NotificationNotFound,
            ErrorCode::DepartmentNotFound,
            ErrorCode::DepartmentNameExists,
            ErrorCode::JobNotFound,
            ErrorCode::ApplicantNotFound,
            ErrorCode::ProjectNotFound,
            ErrorCode::ProjectMemberNotFound,
            ErrorCode::ReimbursementNotFound,
            ErrorCode::ReimbursementInvalidAmount,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
            ErrorCode::ConfigError,
            ErrorCode::SalaryCryptoFailed,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_unknown_value() {
        assert_eq!(ErrorCode::try_from(8888), Err(InvalidErrorCode(8888)));
        assert_eq!(
            InvalidErrorCode(8888).to_string(),
            "invalid error code: 8888"
        );
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::EmployeeNotFound).unwrap();
        assert_eq!(json, "3001");
        let code: ErrorCode = serde_json::from_str("4002").unwrap();
        assert_eq!(code, ErrorCode::DepartmentNameExists);
        assert!(serde_json::from_str::<ErrorCode>("4242").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::JobNotFound.to_string(), "5001");
    }
}
