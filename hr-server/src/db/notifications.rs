use shared::models::Notification;
use sqlx::PgPool;

/// Newest first.
pub async fn list_for_employee(
    pool: &PgPool,
    employee_id: i64,
) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM notifications WHERE employee_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await
}

/// Mark one of the employee's own notifications read.
pub async fn mark_read(
    pool: &PgPool,
    id: i64,
    employee_id: i64,
) -> Result<Option<Notification>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE notifications SET is_read = TRUE
         WHERE id = $1 AND employee_id = $2
         RETURNING *",
    )
    .bind(id)
    .bind(employee_id)
    .fetch_optional(pool)
    .await
}
