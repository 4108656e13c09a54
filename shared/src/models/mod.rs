//! Data models
//!
//! Shared between hr-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes, instants are Unix milliseconds.

pub mod applicant;
pub mod department;
pub mod employee;
pub mod job_posting;
pub mod project;
pub mod reimbursement;
pub mod role;

// Re-exports
pub use applicant::*;
pub use department::*;
pub use employee::*;
pub use job_posting::*;
pub use project::*;
pub use reimbursement::*;
pub use role::*;
