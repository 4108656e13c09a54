//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Staff role. Closed set, stored as uppercase TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Superadmin,
    Admin,
    Manager,
    Hr,
    Accounts,
    Employee,
}

/// A role string outside the known set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct InvalidRole(pub String);

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Superadmin,
        Role::Admin,
        Role::Manager,
        Role::Hr,
        Role::Accounts,
        Role::Employee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "SUPERADMIN",
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Hr => "HR",
            Role::Accounts => "ACCOUNTS",
            Role::Employee => "EMPLOYEE",
        }
    }

    /// Roles that manage people records (hire, edit, delete, recruitment).
    pub fn is_hr_staff(&self) -> bool {
        matches!(self, Role::Superadmin | Role::Admin | Role::Hr)
    }

    /// Whether a holder of `self` may give `role` to someone, or change the
    /// role of someone who holds it. Only a superadmin can touch superadmins,
    /// and HR cannot touch either admin tier.
    pub fn can_grant(&self, role: Role) -> bool {
        match self {
            Role::Superadmin => true,
            Role::Admin => role != Role::Superadmin,
            Role::Hr => !matches!(role, Role::Superadmin | Role::Admin),
            _ => false,
        }
    }

    /// Roles that may approve and see every reimbursement.
    pub fn is_finance_approver(&self) -> bool {
        matches!(
            self,
            Role::Superadmin | Role::Admin | Role::Manager | Role::Accounts
        )
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| InvalidRole(s.to_string()))
    }
}

impl TryFrom<String> for Role {
    type Error = InvalidRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_roundtrip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert_eq!(
            "superadmin".parse::<Role>(),
            Err(InvalidRole("superadmin".into()))
        );
    }

    #[test]
    fn test_role_serde_matches_storage() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
        assert!(serde_json::from_str::<Role>("\"INTERN\"").is_err());
    }

    #[test]
    fn test_role_groups() {
        assert!(Role::Hr.is_hr_staff());
        assert!(!Role::Manager.is_hr_staff());
        assert!(!Role::Accounts.is_hr_staff());
        assert!(Role::Accounts.is_finance_approver());
        assert!(!Role::Employee.is_finance_approver());
        assert!(!Role::Hr.is_finance_approver());
    }

    #[test]
    fn test_can_grant() {
        for role in Role::ALL {
            assert!(Role::Superadmin.can_grant(role));
            assert!(!Role::Manager.can_grant(role));
            assert!(!Role::Employee.can_grant(role));
        }
        assert!(!Role::Admin.can_grant(Role::Superadmin));
        assert!(Role::Admin.can_grant(Role::Admin));
        assert!(!Role::Hr.can_grant(Role::Superadmin));
        assert!(!Role::Hr.can_grant(Role::Admin));
        assert!(Role::Hr.can_grant(Role::Hr));
        assert!(Role::Hr.can_grant(Role::Manager));
        assert!(Role::Hr.can_grant(Role::Employee));
    }
}
