//! Staff authentication: bearer JWT middleware and per-IP rate limiting

pub mod jwt;
pub mod rate_limit;

pub use jwt::StaffIdentity;
pub use rate_limit::RateLimiter;
