//! Employee database operations

use chrono::NaiveDate;
use shared::models::{Employee, EmployeeUpdate, Role};
use sqlx::PgPool;

use crate::services::employee_code;

/// Transaction-scoped advisory lock key that serializes code assignment.
pub const EMPLOYEE_CODE_LOCK: i64 = 0x454D_504E_4F;

/// Insert-ready employee: salary already encrypted, password already hashed.
#[derive(Debug, Clone)]
pub struct NewEmployee {
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
    pub hashed_password: Option<String>,
}

pub fn welcome_message(name: &str, code: &str) -> String {
    format!("Welcome aboard, {name}! Your employee code is {code}.")
}

pub async fn list(pool: &PgPool) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM employees ORDER BY employee_code")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM employees WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM employees WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Assign the next employee code and insert the employee together with a
/// welcome notification. Either both rows land or neither does.
pub async fn create(pool: &PgPool, new: NewEmployee, now: i64) -> Result<Employee, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(EMPLOYEE_CODE_LOCK)
        .execute(&mut *tx)
        .await?;

    let code = employee_code::generate(&mut tx).await?;

    let employee: Employee = sqlx::query_as(
        r#"
        INSERT INTO employees (
            id, employee_code, name, email, role, designation, status,
            employment_type, gender, join_date, salary, manager_id,
            department_id, hashed_password, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
        RETURNING *
        "#,
    )
    .bind(shared::util::snowflake_id())
    .bind(&code)
    .bind(&new.name)
    .bind(&new.email)
    .bind(new.role.as_str())
    .bind(&new.designation)
    .bind(&new.status)
    .bind(&new.employment_type)
    .bind(&new.gender)
    .bind(new.join_date)
    .bind(&new.salary)
    .bind(new.manager_id)
    .bind(new.department_id)
    .bind(&new.hashed_password)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO notifications (id, employee_id, message, is_read, created_at)
         VALUES ($1, $2, $3, FALSE, $4)",
    )
    .bind(shared::util::snowflake_id())
    .bind(employee.id)
    .bind(welcome_message(&employee.name, &employee.employee_code))
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(employee)
}

/// Partial update. `salary` is the new ciphertext, if the salary changed;
/// the plaintext in `data.salary` is ignored here. Each nullable column is
/// bound as a (present, value) pair so an explicit `null` clears it.
pub async fn update(
    pool: &PgPool,
    id: i64,
    data: &EmployeeUpdate,
    salary: Option<String>,
    now: i64,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE employees SET
            name = COALESCE($1, name),
            email = COALESCE($2, email),
            role = COALESCE($3, role),
            designation = CASE WHEN $4 THEN $5 ELSE designation END,
            status = CASE WHEN $6 THEN $7 ELSE status END,
            employment_type = CASE WHEN $8 THEN $9 ELSE employment_type END,
            gender = CASE WHEN $10 THEN $11 ELSE gender END,
            join_date = CASE WHEN $12 THEN $13 ELSE join_date END,
            manager_id = CASE WHEN $14 THEN $15 ELSE manager_id END,
            department_id = CASE WHEN $16 THEN $17 ELSE department_id END,
            salary = COALESCE($18, salary),
            updated_at = $19
        WHERE id = $20
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(data.role.map(|r| r.as_str()))
    .bind(data.designation.is_some())
    .bind(data.designation.as_ref().and_then(Option::as_deref))
    .bind(data.status.is_some())
    .bind(data.status.as_ref().and_then(Option::as_deref))
    .bind(data.employment_type.is_some())
    .bind(data.employment_type.as_ref().and_then(Option::as_deref))
    .bind(data.gender.is_some())
    .bind(data.gender.as_ref().and_then(Option::as_deref))
    .bind(data.join_date.is_some())
    .bind(data.join_date.flatten())
    .bind(data.manager_id.is_some())
    .bind(data.manager_id.flatten())
    .bind(data.department_id.is_some())
    .bind(data.department_id.flatten())
    .bind(salary)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Outcome of [`delete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    NotFound,
    /// Nothing was removed; the employee is payee on this many claims.
    HasReimbursements(i64),
}

/// Remove an employee and their notifications in one transaction.
///
/// Reimbursement claims are never removed with their payee. The employee row
/// is locked first so a claim filed concurrently either lands before the
/// count or fails on the foreign key.
pub async fn delete(pool: &PgPool, id: i64) -> Result<Deletion, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let exists: Option<i64> =
        sqlx::query_scalar("SELECT id FROM employees WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    if exists.is_none() {
        return Ok(Deletion::NotFound);
    }

    let claims: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM reimbursements WHERE employee_id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
    if claims > 0 {
        return Ok(Deletion::HasReimbursements(claims));
    }

    sqlx::query("DELETE FROM notifications WHERE employee_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(Deletion::Deleted)
}
