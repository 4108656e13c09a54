//! Employee Model

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::role::Role;

/// Employee row. `salary` holds the stored ciphertext and is never
/// serialized; API output goes through [`EmployeeResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub employee_code: String,
    pub name: String,
    pub email: String,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub role: Role,
    pub designation: Option<String>,
    pub status: Option<String>,
    pub employment_type: Option<String>,
    pub gender: Option<String>,
    pub join_date: Option<NaiveDate>,
    #[serde(skip)]
    pub salary: Option<String>,
    pub manager_id: Option<i64>,
    pub department_id: Option<i64>,
    #[serde(skip)]
    pub hashed_password: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Employee as returned by the API. `salary` is either the plaintext
/// figure or the redaction placeholder, depending on who is asking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: i64,
    pub employee_code: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub designation: Option<String>,
    pub status: Option<String>,
    pub employment_type: Option<String>,
    pub gender: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub salary: Option<String>,
    pub manager_id: Option<i64>,
    pub department_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl EmployeeResponse {
    pub fn from_employee(employee: Employee, salary: Option<String>) -> Self {
        Self {
            id: employee.id,
            employee_code: employee.employee_code,
            name: employee.name,
            email: employee.email,
            role: employee.role,
            designation: employee.designation,
            status: employee.status,
            employment_type: employee.employment_type,
            gender: employee.gender,
            join_date: employee.join_date,
            salary,
            manager_id: employee.manager_id,
            department_id: employee.department_id,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

/// Create employee payload (HR hire). `salary` is plaintext here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: Role,
    pub designation: Option<String>,
    pub status: Option<String>,
    pub employment_type: Option<String>,
    pub gender: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub salary: Option<String>,
    pub manager_id: Option<i64>,
    pub department_id: Option<i64>,
    pub password: Option<String>,
}

fn default_role() -> Role {
    Role::Employee
}

/// Update employee payload.
///
/// Nullable columns use `Option<Option<T>>`: an absent field leaves the
/// column alone, `null` clears it, a value sets it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub designation: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub join_date: Option<Option<NaiveDate>>,
    /// Plaintext; `None` keeps the stored value.
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub department_id: Option<Option<i64>>,
}

/// A present field, `null` included, becomes `Some(_)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Self-registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// In-app notification for one employee
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Notification {
    pub id: i64,
    pub employee_id: i64,
    pub message: String,
    pub is_read: bool,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_serialize_hides_secrets() {
        let employee = Employee {
            id: 1,
            employee_code: "EMPNO001".into(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            role: Role::Hr,
            designation: None,
            status: None,
            employment_type: None,
            gender: None,
            join_date: NaiveDate::from_ymd_opt(2024, 4, 1),
            salary: Some("00:11".into()),
            manager_id: None,
            department_id: None,
            hashed_password: Some("$argon2id$...".into()),
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_value(&employee).unwrap();
        assert!(json.get("salary").is_none());
        assert!(json.get("hashed_password").is_none());
        assert_eq!(json["role"], "HR");
        assert_eq!(json["join_date"], "2024-04-01");
    }

    #[test]
    fn test_create_defaults_to_employee_role() {
        let data: EmployeeCreate =
            serde_json::from_str(r#"{"name":"Ravi","email":"ravi@example.com"}"#).unwrap();
        assert_eq!(data.role, Role::Employee);
        assert!(data.salary.is_none());
    }

    #[test]
    fn test_update_distinguishes_absent_and_null() {
        let data: EmployeeUpdate = serde_json::from_str(
            r#"{"manager_id":null,"department_id":12,"designation":"Lead"}"#,
        )
        .unwrap();
        assert_eq!(data.manager_id, Some(None));
        assert_eq!(data.department_id, Some(Some(12)));
        assert_eq!(data.designation, Some(Some("Lead".into())));
        assert_eq!(data.status, None);
        assert_eq!(data.join_date, None);
    }

    #[test]
    fn test_create_rejects_unknown_role() {
        let result = serde_json::from_str::<EmployeeCreate>(
            r#"{"name":"Ravi","email":"ravi@example.com","role":"OWNER"}"#,
        );
        assert!(result.is_err());
    }
}
