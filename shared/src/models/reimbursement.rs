//! Reimbursement Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Claim status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReimbursementStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Paid,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reimbursement status: {0}")]
pub struct InvalidReimbursementStatus(pub String);

impl ReimbursementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReimbursementStatus::Pending => "PENDING",
            ReimbursementStatus::Approved => "APPROVED",
            ReimbursementStatus::Rejected => "REJECTED",
            ReimbursementStatus::Paid => "PAID",
        }
    }
}

impl fmt::Display for ReimbursementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReimbursementStatus {
    type Err = InvalidReimbursementStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ReimbursementStatus::Pending),
            "APPROVED" => Ok(ReimbursementStatus::Approved),
            "REJECTED" => Ok(ReimbursementStatus::Rejected),
            "PAID" => Ok(ReimbursementStatus::Paid),
            other => Err(InvalidReimbursementStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for ReimbursementStatus {
    type Error = InvalidReimbursementStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReimbursementComment {
    pub author_id: i64,
    pub text: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReimbursementHistoryEntry {
    pub status: ReimbursementStatus,
    pub changed_by: i64,
    pub changed_at: i64,
}

/// Reimbursement claim
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reimbursement {
    pub id: i64,
    /// Payee
    pub employee_id: i64,
    pub department_id: Option<i64>,
    pub project_id: Option<i64>,
    pub approver_id: Option<i64>,
    pub category: String,
    pub subcategory: Option<String>,
    pub amount: Decimal,
    pub currency: String,
    pub advance_amount: Decimal,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: ReimbursementStatus,
    pub submitted_at: i64,
    pub attachment_ref: Option<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub comments: Vec<ReimbursementComment>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub history: Vec<ReimbursementHistoryEntry>,
}

/// Submit claim payload. The payee is always the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReimbursementCreate {
    pub department_id: Option<i64>,
    pub project_id: Option<i64>,
    pub category: String,
    pub subcategory: Option<String>,
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub advance_amount: Decimal,
    pub attachment_ref: Option<String>,
}

impl ReimbursementCreate {
    /// Amount must be positive; the advance may be zero but not negative.
    pub fn amounts_valid(&self) -> bool {
        self.amount > Decimal::ZERO && self.advance_amount >= Decimal::ZERO
    }
}

fn default_currency() -> String {
    "INR".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReimbursementStatusUpdate {
    pub status: ReimbursementStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReimbursementCommentCreate {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            ReimbursementStatus::Pending,
            ReimbursementStatus::Approved,
            ReimbursementStatus::Rejected,
            ReimbursementStatus::Paid,
        ] {
            assert_eq!(status.as_str().parse::<ReimbursementStatus>(), Ok(status));
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", status.as_str())
            );
        }
        assert!("SETTLED".parse::<ReimbursementStatus>().is_err());
    }

    #[test]
    fn test_create_defaults() {
        let data: ReimbursementCreate =
            serde_json::from_str(r#"{"category":"TRAVEL","amount":"1250.50"}"#).unwrap();
        assert_eq!(data.currency, "INR");
        assert_eq!(data.advance_amount, Decimal::ZERO);
        assert_eq!(data.amount, Decimal::new(125050, 2));
    }

    #[test]
    fn test_amounts_valid() {
        let mut data: ReimbursementCreate =
            serde_json::from_str(r#"{"category":"MEALS","amount":"40"}"#).unwrap();
        assert!(data.amounts_valid());
        data.advance_amount = Decimal::new(-1, 0);
        assert!(!data.amounts_valid());
        data.advance_amount = Decimal::ZERO;
        data.amount = Decimal::ZERO;
        assert!(!data.amounts_valid());
    }
}
