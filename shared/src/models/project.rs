//! Project Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Project row (without team)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProjectRow {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub manager_id: Option<i64>,
    pub department_id: Option<i64>,
    pub created_at: i64,
}

/// Project with its team. Members live in the `project_members` join
/// table; the set keeps them unique and ordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub manager_id: Option<i64>,
    pub department_id: Option<i64>,
    pub team: BTreeSet<i64>,
    pub created_at: i64,
}

impl Project {
    pub fn from_row(row: ProjectRow, team: BTreeSet<i64>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            status: row.status,
            start_date: row.start_date,
            end_date: row.end_date,
            manager_id: row.manager_id,
            department_id: row.department_id,
            team,
            created_at: row.created_at,
        }
    }
}

/// Create project payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCreate {
    pub name: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub manager_id: Option<i64>,
    pub department_id: Option<i64>,
    #[serde(default)]
    pub team: BTreeSet<i64>,
}

fn default_status() -> String {
    "ACTIVE".to_string()
}

/// Update project payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub manager_id: Option<i64>,
    pub department_id: Option<i64>,
}

/// Replace the whole team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTeamUpdate {
    pub members: BTreeSet<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_deduplicates_members() {
        let data: ProjectTeamUpdate =
            serde_json::from_str(r#"{"members":[7,3,7,12]}"#).unwrap();
        assert_eq!(data.members.into_iter().collect::<Vec<_>>(), vec![3, 7, 12]);
    }

    #[test]
    fn test_create_defaults() {
        let data: ProjectCreate = serde_json::from_str(r#"{"name":"Payroll v2"}"#).unwrap();
        assert_eq!(data.status, "ACTIVE");
        assert!(data.team.is_empty());
    }
}
