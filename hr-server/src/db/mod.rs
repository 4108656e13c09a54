//! Database access layer
//!
//! Lookups return `Result<Option<T>, sqlx::Error>`; handlers turn `None`
//! into the matching not-found code.

pub mod applicants;
pub mod departments;
pub mod employees;
pub mod jobs;
pub mod notifications;
pub mod projects;
pub mod reimbursements;
