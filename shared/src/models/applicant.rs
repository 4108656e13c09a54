//! Applicant Model
//!
//! Applicants move through an offer pipeline. The pipeline has no
//! transition table: any [`OfferStatus`] can be set from any other, and
//! every change is appended to `offer_history`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Applicant pipeline stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    #[default]
    PendingOffer,
    Selected,
    OfferGenerated,
    OfferSent,
    OfferAccepted,
    Hired,
    OfferRejected,
    NotSelected,
    OnHoldOffer,
    RejectedApplication,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown offer status: {0}")]
pub struct InvalidOfferStatus(pub String);

impl OfferStatus {
    pub const ALL: [OfferStatus; 10] = [
        OfferStatus::PendingOffer,
        OfferStatus::Selected,
        OfferStatus::OfferGenerated,
        OfferStatus::OfferSent,
        OfferStatus::OfferAccepted,
        OfferStatus::Hired,
        OfferStatus::OfferRejected,
        OfferStatus::NotSelected,
        OfferStatus::OnHoldOffer,
        OfferStatus::RejectedApplication,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::PendingOffer => "PENDING_OFFER",
            OfferStatus::Selected => "SELECTED",
            OfferStatus::OfferGenerated => "OFFER_GENERATED",
            OfferStatus::OfferSent => "OFFER_SENT",
            OfferStatus::OfferAccepted => "OFFER_ACCEPTED",
            OfferStatus::Hired => "HIRED",
            OfferStatus::OfferRejected => "OFFER_REJECTED",
            OfferStatus::NotSelected => "NOT_SELECTED",
            OfferStatus::OnHoldOffer => "ON_HOLD_OFFER",
            OfferStatus::RejectedApplication => "REJECTED_APPLICATION",
        }
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferStatus {
    type Err = InvalidOfferStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OfferStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| InvalidOfferStatus(s.to_string()))
    }
}

impl TryFrom<String> for OfferStatus {
    type Error = InvalidOfferStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Free-form recruiter note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantNote {
    pub text: String,
    pub created_at: i64,
}

/// One recorded status change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferHistoryEntry {
    pub from: OfferStatus,
    pub to: OfferStatus,
    /// Employee who made the change
    pub changed_by: i64,
    pub changed_at: i64,
}

/// Applicant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Applicant {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Opaque reference to the stored resume
    pub resume_ref: Option<String>,
    pub job_id: Option<i64>,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub offer_status: OfferStatus,
    pub offered_salary: Option<Decimal>,
    pub joining_date: Option<NaiveDate>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub notes: Vec<ApplicantNote>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub offer_history: Vec<OfferHistoryEntry>,
    pub created_at: i64,
}

impl Applicant {
    /// Move to `to` unconditionally and record the change.
    pub fn set_status(&mut self, to: OfferStatus, changed_by: i64, now: i64) {
        self.offer_history.push(OfferHistoryEntry {
            from: self.offer_status,
            to,
            changed_by,
            changed_at: now,
        });
        self.offer_status = to;
    }
}

/// Create applicant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantCreate {
    pub name: String,
    pub email: String,
    pub resume_ref: Option<String>,
    pub job_id: Option<i64>,
}

/// Update applicant payload (offer fields included)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicantUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub resume_ref: Option<String>,
    pub job_id: Option<i64>,
    pub offered_salary: Option<Decimal>,
    pub joining_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferStatusUpdate {
    pub status: OfferStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantNoteCreate {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applicant(status: OfferStatus) -> Applicant {
        Applicant {
            id: 1,
            name: "Meera".into(),
            email: "meera@example.com".into(),
            resume_ref: None,
            job_id: None,
            offer_status: status,
            offered_salary: None,
            joining_date: None,
            notes: Vec::new(),
            offer_history: Vec::new(),
            created_at: 0,
        }
    }

    #[test]
    fn test_any_status_can_follow_any_other() {
        for from in OfferStatus::ALL {
            for to in OfferStatus::ALL {
                let mut a = applicant(from);
                a.set_status(to, 9, 100);
                assert_eq!(a.offer_status, to);
                assert_eq!(a.offer_history.len(), 1);
                assert_eq!(a.offer_history[0].from, from);
            }
        }
    }

    #[test]
    fn test_history_accumulates_in_order() {
        let mut a = applicant(OfferStatus::PendingOffer);
        a.set_status(OfferStatus::Selected, 2, 10);
        a.set_status(OfferStatus::OfferSent, 2, 20);
        a.set_status(OfferStatus::Selected, 3, 30);

        let to: Vec<_> = a.offer_history.iter().map(|h| h.to).collect();
        assert_eq!(
            to,
            vec![
                OfferStatus::Selected,
                OfferStatus::OfferSent,
                OfferStatus::Selected
            ]
        );
        assert_eq!(a.offer_history[2].changed_by, 3);
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OfferStatus::OnHoldOffer).unwrap(),
            "\"ON_HOLD_OFFER\""
        );
        for status in OfferStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json.trim_matches('"'), status.as_str());
            assert_eq!(status.as_str().parse::<OfferStatus>(), Ok(status));
        }
        assert!("HIRED_MAYBE".parse::<OfferStatus>().is_err());
    }
}
