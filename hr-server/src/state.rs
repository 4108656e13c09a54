//! Application state for hr-server

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

use crate::auth::RateLimiter;
use crate::config::Config;
use crate::crypto::SalaryCipher;
use crate::error::BoxError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Salary cipher, built once from `SALARY_ENCRYPTION_KEY`
    pub cipher: Arc<SalaryCipher>,
    /// JWT secret for staff authentication
    pub jwt_secret: String,
    /// Rate limiter for login/registration routes
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Connect, run migrations, build the cipher.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        let cipher = SalaryCipher::new(&config.salary_encryption_key)?;
        Ok(Self::from_parts(pool, cipher, config.jwt_secret.clone()))
    }

    pub fn from_parts(pool: PgPool, cipher: SalaryCipher, jwt_secret: String) -> Self {
        Self {
            pool,
            cipher: Arc::new(cipher),
            jwt_secret,
            rate_limiter: RateLimiter::new(),
        }
    }
}
