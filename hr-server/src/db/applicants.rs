//! Applicant database operations
//!
//! `notes` and `offer_history` are JSONB arrays. Appends read the row under
//! `FOR UPDATE`, change it in memory, and write the arrays back.

use shared::models::{Applicant, ApplicantCreate, ApplicantNote, ApplicantUpdate, OfferStatus};
use sqlx::PgPool;
use sqlx::types::Json;

pub async fn list(pool: &PgPool, job_id: Option<i64>) -> Result<Vec<Applicant>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM applicants
         WHERE $1::BIGINT IS NULL OR job_id = $1
         ORDER BY created_at DESC",
    )
    .bind(job_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Applicant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM applicants WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    data: &ApplicantCreate,
    now: i64,
) -> Result<Applicant, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO applicants (id, name, email, resume_ref, job_id, offer_status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(shared::util::snowflake_id())
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.resume_ref)
    .bind(data.job_id)
    .bind(OfferStatus::default().as_str())
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    data: &ApplicantUpdate,
) -> Result<Option<Applicant>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE applicants SET
            name = COALESCE($1, name),
            email = COALESCE($2, email),
            resume_ref = COALESCE($3, resume_ref),
            job_id = COALESCE($4, job_id),
            offered_salary = COALESCE($5, offered_salary),
            joining_date = COALESCE($6, joining_date)
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.resume_ref)
    .bind(data.job_id)
    .bind(data.offered_salary)
    .bind(data.joining_date)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Set any status and append the change to `offer_history`.
pub async fn set_status(
    pool: &PgPool,
    id: i64,
    to: OfferStatus,
    changed_by: i64,
    now: i64,
) -> Result<Option<Applicant>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let Some(mut applicant) =
        sqlx::query_as::<_, Applicant>("SELECT * FROM applicants WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
    else {
        return Ok(None);
    };

    applicant.set_status(to, changed_by, now);

    sqlx::query("UPDATE applicants SET offer_status = $1, offer_history = $2 WHERE id = $3")
        .bind(applicant.offer_status.as_str())
        .bind(Json(&applicant.offer_history))
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(Some(applicant))
}

pub async fn add_note(
    pool: &PgPool,
    id: i64,
    text: &str,
    now: i64,
) -> Result<Option<Applicant>, sqlx::Error> {
    let note = ApplicantNote {
        text: text.to_string(),
        created_at: now,
    };
    sqlx::query_as(
        "UPDATE applicants SET notes = notes || jsonb_build_array($1::JSONB)
         WHERE id = $2
         RETURNING *",
    )
    .bind(Json(&note))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM applicants WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
