//! Project database operations
//!
//! The team lives in `project_members`; every read assembles it into a
//! `BTreeSet` so member order never depends on insertion order.

use shared::models::{Project, ProjectCreate, ProjectRow, ProjectUpdate};
use sqlx::{PgConnection, PgPool};
use std::collections::{BTreeMap, BTreeSet};

async fn team_of(conn: &mut PgConnection, project_id: i64) -> Result<BTreeSet<i64>, sqlx::Error> {
    let ids: Vec<i64> =
        sqlx::query_scalar("SELECT employee_id FROM project_members WHERE project_id = $1")
            .bind(project_id)
            .fetch_all(conn)
            .await?;
    Ok(ids.into_iter().collect())
}

async fn replace_team(
    conn: &mut PgConnection,
    project_id: i64,
    members: &BTreeSet<i64>,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM project_members WHERE project_id = $1")
        .bind(project_id)
        .execute(&mut *conn)
        .await?;

    let members: Vec<i64> = members.iter().copied().collect();
    sqlx::query(
        "INSERT INTO project_members (project_id, employee_id)
         SELECT $1, UNNEST($2::BIGINT[])",
    )
    .bind(project_id)
    .bind(&members)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
    let rows: Vec<ProjectRow> = sqlx::query_as("SELECT * FROM projects ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    let pairs: Vec<(i64, i64)> =
        sqlx::query_as("SELECT project_id, employee_id FROM project_members")
            .fetch_all(pool)
            .await?;
    let mut teams: BTreeMap<i64, BTreeSet<i64>> = BTreeMap::new();
    for (project_id, employee_id) in pairs {
        teams.entry(project_id).or_default().insert(employee_id);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let team = teams.remove(&row.id).unwrap_or_default();
            Project::from_row(row, team)
        })
        .collect())
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Project>, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    let Some(row) = sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
    else {
        return Ok(None);
    };
    let team = team_of(&mut conn, id).await?;
    Ok(Some(Project::from_row(row, team)))
}

pub async fn create(pool: &PgPool, data: &ProjectCreate, now: i64) -> Result<Project, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let row: ProjectRow = sqlx::query_as(
        r#"
        INSERT INTO projects (
            id, name, status, start_date, end_date, manager_id, department_id, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(shared::util::snowflake_id())
    .bind(&data.name)
    .bind(&data.status)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.manager_id)
    .bind(data.department_id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    replace_team(&mut tx, row.id, &data.team).await?;
    tx.commit().await?;

    Ok(Project::from_row(row, data.team.clone()))
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    data: &ProjectUpdate,
) -> Result<Option<Project>, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    let Some(row) = sqlx::query_as::<_, ProjectRow>(
        r#"
        UPDATE projects SET
            name = COALESCE($1, name),
            status = COALESCE($2, status),
            start_date = COALESCE($3, start_date),
            end_date = COALESCE($4, end_date),
            manager_id = COALESCE($5, manager_id),
            department_id = COALESCE($6, department_id)
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.status)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.manager_id)
    .bind(data.department_id)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    else {
        return Ok(None);
    };
    let team = team_of(&mut conn, id).await?;
    Ok(Some(Project::from_row(row, team)))
}

/// Replace the whole team. `None` if the project does not exist.
pub async fn set_team(
    pool: &PgPool,
    id: i64,
    members: &BTreeSet<i64>,
) -> Result<Option<Project>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let Some(row) =
        sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
    else {
        return Ok(None);
    };
    replace_team(&mut tx, id, members).await?;
    tx.commit().await?;
    Ok(Some(Project::from_row(row, members.clone())))
}

/// Add one member. Adding an existing member is a no-op.
pub async fn add_member(
    pool: &PgPool,
    id: i64,
    employee_id: i64,
) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query(
        "INSERT INTO project_members (project_id, employee_id)
         SELECT id, $2 FROM projects WHERE id = $1
         ON CONFLICT DO NOTHING",
    )
    .bind(id)
    .bind(employee_id)
    .execute(pool)
    .await?;
    find_by_id(pool, id).await
}

/// Remove one member. `Ok(false)` if they were not on the team.
pub async fn remove_member(pool: &PgPool, id: i64, employee_id: i64) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND employee_id = $2")
            .bind(id)
            .bind(employee_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
