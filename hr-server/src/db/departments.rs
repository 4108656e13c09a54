use shared::models::{Department, DepartmentCreate, DepartmentUpdate};
use sqlx::PgPool;

pub async fn list(pool: &PgPool) -> Result<Vec<Department>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM departments ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Department>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM departments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    data: &DepartmentCreate,
    now: i64,
) -> Result<Department, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO departments (id, name, description, head_id, created_at)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(shared::util::snowflake_id())
    .bind(data.name.trim())
    .bind(&data.description)
    .bind(data.head_id)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    data: &DepartmentUpdate,
) -> Result<Option<Department>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE departments SET
            name = COALESCE($1, name),
            description = COALESCE($2, description),
            head_id = COALESCE($3, head_id)
         WHERE id = $4
         RETURNING *",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(&data.description)
    .bind(data.head_id)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM departments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
