//! Shared types for the HR service
//!
//! Domain models, the unified error system and small utilities used by
//! `hr-server` and by API clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use serde::{Deserialize, Serialize};
