//! Server configuration
//!
//! Built once in `main` from the process environment (after `.env` is
//! loaded) and handed to [`crate::state::AppState`]. Nothing else reads
//! environment variables.

use crate::crypto::SALARY_KEY_LEN;

/// Startup configuration failure. Returned to `main`, which refuses to start.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must not be empty in {environment} environment")]
    Empty {
        name: &'static str,
        environment: String,
    },
    #[error("{name} is not a valid value: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("SALARY_ENCRYPTION_KEY must be exactly 32 bytes (got {0})")]
    SalaryKeyLength(usize),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Pool size
    pub database_max_connections: u32,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT secret for staff authentication
    pub jwt_secret: String,
    /// AES-256 key for salary encryption, exactly 32 bytes
    pub salary_encryption_key: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary lookup (env, test map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".into());

        let salary_encryption_key =
            lookup("SALARY_ENCRYPTION_KEY").ok_or(ConfigError::Missing("SALARY_ENCRYPTION_KEY"))?;
        if salary_encryption_key.len() != SALARY_KEY_LEN {
            return Err(ConfigError::SalaryKeyLength(salary_encryption_key.len()));
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            http_port: parse_or(&lookup, "HTTP_PORT", 8080)?,
            jwt_secret: require_secret(&lookup, "JWT_SECRET", &environment)?,
            salary_encryption_key,
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// Require a secret: must be set and non-empty outside development.
fn require_secret<F>(lookup: &F, name: &'static str, environment: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let val = match lookup(name) {
        Some(v) => v,
        None => {
            if environment != "development" {
                return Err(ConfigError::Missing(name));
            }
            format!("dev-{name}-not-for-production")
        }
    };
    if val.is_empty() && environment != "development" {
        return Err(ConfigError::Empty {
            name,
            environment: environment.to_string(),
        });
    }
    Ok(val)
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_in_development() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/hr"),
            ("SALARY_ENCRYPTION_KEY", KEY),
        ]))
        .unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.database_max_connections, 10);
        assert!(config.is_development());
        assert_eq!(config.jwt_secret, "dev-JWT_SECRET-not-for-production");
    }

    #[test]
    fn test_missing_salary_key_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SALARY_ENCRYPTION_KEY")));
    }

    #[test]
    fn test_short_salary_key_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("SALARY_ENCRYPTION_KEY", "too-short"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::SalaryKeyLength(9)));
        assert!(err.to_string().contains("exactly 32 bytes"));
    }

    #[test]
    fn test_jwt_secret_required_in_production() {
        let err = Config::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("DATABASE_URL", "postgres://x"),
            ("SALARY_ENCRYPTION_KEY", KEY),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));

        let err = Config::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("DATABASE_URL", "postgres://x"),
            ("SALARY_ENCRYPTION_KEY", KEY),
            ("JWT_SECRET", ""),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Empty { name: "JWT_SECRET", .. }));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("SALARY_ENCRYPTION_KEY", KEY),
            ("HTTP_PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "HTTP_PORT", .. }));
    }
}
