//! Reimbursement database operations

use shared::models::{
    Reimbursement, ReimbursementComment, ReimbursementCreate, ReimbursementHistoryEntry,
    ReimbursementStatus,
};
use sqlx::PgPool;
use sqlx::types::Json;

pub async fn list_all(pool: &PgPool) -> Result<Vec<Reimbursement>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM reimbursements ORDER BY submitted_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_for_employee(
    pool: &PgPool,
    employee_id: i64,
) -> Result<Vec<Reimbursement>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM reimbursements WHERE employee_id = $1 ORDER BY submitted_at DESC",
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Reimbursement>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM reimbursements WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    employee_id: i64,
    data: &ReimbursementCreate,
    now: i64,
) -> Result<Reimbursement, sqlx::Error> {
    let history = [ReimbursementHistoryEntry {
        status: ReimbursementStatus::Pending,
        changed_by: employee_id,
        changed_at: now,
    }];
    sqlx::query_as(
        r#"
        INSERT INTO reimbursements (
            id, employee_id, department_id, project_id, category, subcategory,
            amount, currency, advance_amount, status, submitted_at, attachment_ref,
            comments, history
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, '[]', $13)
        RETURNING *
        "#,
    )
    .bind(shared::util::snowflake_id())
    .bind(employee_id)
    .bind(data.department_id)
    .bind(data.project_id)
    .bind(&data.category)
    .bind(&data.subcategory)
    .bind(data.amount)
    .bind(&data.currency)
    .bind(data.advance_amount)
    .bind(ReimbursementStatus::Pending.as_str())
    .bind(now)
    .bind(&data.attachment_ref)
    .bind(Json(&history))
    .fetch_one(pool)
    .await
}

/// Set the status, record the approver, and append to history.
pub async fn set_status(
    pool: &PgPool,
    id: i64,
    status: ReimbursementStatus,
    approver_id: i64,
    now: i64,
) -> Result<Option<Reimbursement>, sqlx::Error> {
    let entry = ReimbursementHistoryEntry {
        status,
        changed_by: approver_id,
        changed_at: now,
    };
    sqlx::query_as(
        r#"
        UPDATE reimbursements SET
            status = $1,
            approver_id = $2,
            history = history || jsonb_build_array($3::JSONB)
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(status.as_str())
    .bind(approver_id)
    .bind(Json(&entry))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn add_comment(
    pool: &PgPool,
    id: i64,
    author_id: i64,
    text: &str,
    now: i64,
) -> Result<Option<Reimbursement>, sqlx::Error> {
    let comment = ReimbursementComment {
        author_id,
        text: text.to_string(),
        created_at: now,
    };
    sqlx::query_as(
        "UPDATE reimbursements SET comments = comments || jsonb_build_array($1::JSONB)
         WHERE id = $2
         RETURNING *",
    )
    .bind(Json(&comment))
    .bind(id)
    .fetch_optional(pool)
    .await
}
