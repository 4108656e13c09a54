//! hr-server: HR people service
//!
//! - Staff JWT authentication and per-IP rate limiting on auth routes
//! - Employee records with encrypted salaries, redacted per viewer
//! - Sequential employee codes assigned under an advisory lock
//! - Departments, jobs, applicants, projects, reimbursements

pub mod api;
pub mod auth;
pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod services;
pub mod state;
pub mod util;
