//! Staff JWT authentication (HS256, 24h)

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::Role;
use sqlx::PgPool;

use crate::db::employees;
use crate::error::ServiceError;
use crate::state::AppState;

/// JWT claims for staff authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct StaffClaims {
    /// Employee ID
    pub sub: String,
    pub email: String,
    /// Role at the time the token was issued
    pub role: Role,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated staff member, inserted into request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffIdentity {
    pub employee_id: i64,
    pub email: String,
    pub role: Role,
}

impl StaffIdentity {
    /// Fail with 403 unless the caller's role passes `allowed`.
    pub fn require(&self, allowed: impl Fn(&Role) -> bool) -> Result<(), AppError> {
        if allowed(&self.role) {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::RoleRequired))
        }
    }
}

const JWT_EXPIRY_HOURS: i64 = 24;

pub fn create_token(
    employee_id: i64,
    email: &str,
    role: Role,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = StaffClaims {
        sub: employee_id.to_string(),
        email: email.to_string(),
        role,
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode and validate a token into the identity it carries.
pub fn verify_token(token: &str, secret: &str) -> Result<StaffIdentity, AppError> {
    let token_data = jsonwebtoken::decode::<StaffClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::new(ErrorCode::TokenExpired)
        }
        _ => {
            tracing::debug!("JWT validation failed: {e}");
            AppError::new(ErrorCode::TokenInvalid)
        }
    })?;

    let employee_id = token_data
        .claims
        .sub
        .parse()
        .map_err(|_| AppError::new(ErrorCode::TokenInvalid))?;

    Ok(StaffIdentity {
        employee_id,
        email: token_data.claims.email,
        role: token_data.claims.role,
    })
}

/// Rebuild the identity from the stored employee row. The token only proves
/// who the caller is; role and existence are read fresh on every request.
pub async fn current_identity(
    pool: &PgPool,
    claimed: StaffIdentity,
) -> Result<StaffIdentity, AppError> {
    let employee = employees::find_by_id(pool, claimed.employee_id)
        .await
        .map_err(|e| AppError::from(ServiceError::from(e)))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::NotAuthenticated, "Account no longer exists")
        })?;

    if employee.role != claimed.role {
        tracing::debug!(
            employee_id = employee.id,
            token_role = %claimed.role,
            role = %employee.role,
            "Role changed since token was issued"
        );
    }

    Ok(StaffIdentity {
        employee_id: employee.id,
        email: employee.email,
        role: employee.role,
    })
}

/// Middleware that extracts and verifies the staff JWT from the Authorization header
pub async fn staff_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::new(ErrorCode::NotAuthenticated).into_response())?;

    let claimed = verify_token(token, &state.jwt_secret).map_err(|e| {
        tracing::warn!(code = %e.code, "Rejected staff token");
        e.into_response()
    })?;
    let identity = current_identity(&state.pool, claimed)
        .await
        .map_err(IntoResponse::into_response)?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_roundtrip() {
        let token = create_token(42, "asha@example.com", Role::Hr, SECRET).unwrap();
        let identity = verify_token(&token, SECRET).unwrap();
        assert_eq!(
            identity,
            StaffIdentity {
                employee_id: 42,
                email: "asha@example.com".into(),
                role: Role::Hr,
            }
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(1, "a@example.com", Role::Employee, SECRET).unwrap();
        let err = verify_token(&token, "other").unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = StaffClaims {
            sub: "1".into(),
            email: "a@example.com".into(),
            role: Role::Admin,
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        let err = verify_token(&token, SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenExpired);
    }

    #[test]
    fn test_require_role() {
        let identity = StaffIdentity {
            employee_id: 1,
            email: "m@example.com".into(),
            role: Role::Manager,
        };
        assert!(identity.require(Role::is_finance_approver).is_ok());
        let err = identity.require(Role::is_hr_staff).unwrap_err();
        assert_eq!(err.code, ErrorCode::RoleRequired);
    }
}
