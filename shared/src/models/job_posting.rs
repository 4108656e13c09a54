//! Job Posting Model

use serde::{Deserialize, Serialize};

/// Job posting entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    pub department_id: Option<i64>,
    /// e.g. "OPEN", "CLOSED"
    pub status: String,
    /// e.g. "FULL_TIME", "CONTRACT"
    pub job_type: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub posted_at: i64,
}

/// Create job posting payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPostingCreate {
    pub title: String,
    pub department_id: Option<i64>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_job_type")]
    pub job_type: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
}

fn default_status() -> String {
    "OPEN".to_string()
}

fn default_job_type() -> String {
    "FULL_TIME".to_string()
}

/// Update job posting payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPostingUpdate {
    pub title: Option<String>,
    pub department_id: Option<i64>,
    pub status: Option<String>,
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
}
