use shared::models::{JobPosting, JobPostingCreate, JobPostingUpdate};
use sqlx::PgPool;

pub async fn list(pool: &PgPool) -> Result<Vec<JobPosting>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM job_postings ORDER BY posted_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<JobPosting>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM job_postings WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    data: &JobPostingCreate,
    now: i64,
) -> Result<JobPosting, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO job_postings (
            id, title, department_id, status, job_type, description, requirements, posted_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(shared::util::snowflake_id())
    .bind(&data.title)
    .bind(data.department_id)
    .bind(&data.status)
    .bind(&data.job_type)
    .bind(&data.description)
    .bind(&data.requirements)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    data: &JobPostingUpdate,
) -> Result<Option<JobPosting>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE job_postings SET
            title = COALESCE($1, title),
            department_id = COALESCE($2, department_id),
            status = COALESCE($3, status),
            job_type = COALESCE($4, job_type),
            description = COALESCE($5, description),
            requirements = COALESCE($6, requirements)
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(&data.title)
    .bind(data.department_id)
    .bind(&data.status)
    .bind(&data.job_type)
    .bind(&data.description)
    .bind(&data.requirements)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM job_postings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
