//! Who may see an employee's salary.
//!
//! HR staff see everyone's salary and every employee sees their own.
//! Anyone else gets [`SALARY_PLACEHOLDER`] in place of the figure. The
//! decision is made per record on every read.

use shared::models::Role;

use crate::auth::StaffIdentity;
use crate::crypto::{CryptoError, SalaryCipher};

pub const SALARY_PLACEHOLDER: &str = "#####";

const SALARY_ROLES: [Role; 3] = [Role::Superadmin, Role::Admin, Role::Hr];

pub fn can_view_salary(viewer: Option<&StaffIdentity>, subject_id: i64) -> bool {
    let Some(viewer) = viewer else {
        return false;
    };
    SALARY_ROLES.contains(&viewer.role) || viewer.employee_id == subject_id
}

/// Salary as `viewer` may see it: the decrypted figure, `None` when none
/// is stored, or the placeholder. A stored value that fails to decrypt is
/// an error, never a placeholder.
pub fn visible_salary(
    cipher: &SalaryCipher,
    viewer: Option<&StaffIdentity>,
    subject_id: i64,
    stored: Option<&str>,
) -> Result<Option<String>, CryptoError> {
    if !can_view_salary(viewer, subject_id) {
        return Ok(Some(SALARY_PLACEHOLDER.to_string()));
    }
    cipher.decrypt(stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> SalaryCipher {
        SalaryCipher::new("0123456789abcdef0123456789abcdef").unwrap()
    }

    fn staff(employee_id: i64, role: Role) -> StaffIdentity {
        StaffIdentity {
            employee_id,
            email: format!("{employee_id}@example.com"),
            role,
        }
    }

    #[test]
    fn test_allow_listed_roles_see_everyone() {
        for role in [Role::Superadmin, Role::Admin, Role::Hr] {
            assert!(can_view_salary(Some(&staff(1, role)), 99));
        }
    }

    #[test]
    fn test_self_always_visible() {
        for role in Role::ALL {
            assert!(can_view_salary(Some(&staff(7, role)), 7));
        }
    }

    #[test]
    fn test_other_roles_denied_for_others() {
        for role in [Role::Manager, Role::Accounts, Role::Employee] {
            assert!(!can_view_salary(Some(&staff(7, role)), 8));
        }
        assert!(!can_view_salary(None, 8));
    }

    #[test]
    fn test_visible_salary_reveals_or_redacts() {
        let c = cipher();
        let stored = c.encrypt(Some("85000")).unwrap();

        let hr = staff(1, Role::Hr);
        let peer = staff(2, Role::Manager);
        let owner = staff(3, Role::Employee);

        let reveal = |v: Option<&StaffIdentity>| {
            visible_salary(&c, v, 3, stored.as_deref()).unwrap()
        };
        assert_eq!(reveal(Some(&hr)).as_deref(), Some("85000"));
        assert_eq!(reveal(Some(&owner)).as_deref(), Some("85000"));
        assert_eq!(reveal(Some(&peer)).as_deref(), Some(SALARY_PLACEHOLDER));
        assert_eq!(reveal(None).as_deref(), Some(SALARY_PLACEHOLDER));
    }

    #[test]
    fn test_absent_salary_is_none_when_visible() {
        let hr = staff(1, Role::Admin);
        assert_eq!(visible_salary(&cipher(), Some(&hr), 5, None), Ok(None));
    }

    #[test]
    fn test_decrypt_error_propagates() {
        let hr = staff(1, Role::Superadmin);
        assert_eq!(
            visible_salary(&cipher(), Some(&hr), 5, Some("not-a-ciphertext")),
            Err(CryptoError::Malformed)
        );
        // a denied viewer never touches the stored value
        let peer = staff(2, Role::Employee);
        assert_eq!(
            visible_salary(&cipher(), Some(&peer), 5, Some("not-a-ciphertext")).unwrap(),
            Some(SALARY_PLACEHOLDER.to_string())
        );
    }
}
