//! Sequential employee codes: `EMPNO001`, `EMPNO002`, ...
//!
//! The successor is computed from the single highest stored code that
//! starts with the prefix. "Highest" is string order, so once a suffix
//! grows past the padded width (`EMPNO1000`) it sorts below `EMPNO999`.
//! A stored maximum that does not match `<PREFIX><digits>` restarts the
//! sequence at 1.
//!
//! [`next_code`] is pure: two callers that read the same maximum get the
//! same code. The create path in `db::employees` serializes hires with an
//! advisory lock and relies on the UNIQUE constraint as a last resort.

use regex::Regex;
use sqlx::PgConnection;
use std::sync::LazyLock;

pub const EMPLOYEE_CODE_PREFIX: &str = "EMPNO";
const CODE_WIDTH: usize = 3;

static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{EMPLOYEE_CODE_PREFIX}(\\d+)$")).expect("static pattern")
});

/// Successor of `latest` (the current string-maximum code, if any).
pub fn next_code(latest: Option<&str>) -> String {
    let next = latest
        .and_then(|code| CODE_PATTERN.captures(code))
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .map_or(1, |n| n + 1);
    format!("{EMPLOYEE_CODE_PREFIX}{next:0CODE_WIDTH$}")
}

/// Highest stored code with the prefix, by string order.
pub async fn latest_code(conn: &mut PgConnection) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT employee_code FROM employees
         WHERE employee_code LIKE $1
         ORDER BY employee_code DESC
         LIMIT 1",
    )
    .bind(format!("{EMPLOYEE_CODE_PREFIX}%"))
    .fetch_optional(conn)
    .await
}

/// Read the current maximum and compute its successor. Does not persist.
pub async fn generate(conn: &mut PgConnection) -> Result<String, sqlx::Error> {
    let latest = latest_code(conn).await?;
    Ok(next_code(latest.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_code() {
        assert_eq!(next_code(None), "EMPNO001");
    }

    #[test]
    fn test_increments_existing_max() {
        assert_eq!(next_code(Some("EMPNO007")), "EMPNO008");
        assert_eq!(next_code(Some("EMPNO099")), "EMPNO100");
        assert_eq!(next_code(Some("EMPNO999")), "EMPNO1000");
    }

    #[test]
    fn test_malformed_max_restarts_at_one() {
        assert_eq!(next_code(Some("EMPNOX12")), "EMPNO001");
        assert_eq!(next_code(Some("EMPNO")), "EMPNO001");
        assert_eq!(next_code(Some("EMPNO12a")), "EMPNO001");
        assert_eq!(next_code(Some("")), "EMPNO001");
    }

    #[test]
    fn test_string_order_past_width() {
        // The store hands back the string maximum, which is EMPNO999 even
        // after EMPNO1000 has been issued.
        let mut codes = vec!["EMPNO998", "EMPNO1000", "EMPNO999"];
        codes.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(codes[0], "EMPNO999");
        assert_eq!(next_code(Some(codes[0])), "EMPNO1000");
    }

    #[test]
    fn test_same_snapshot_yields_same_code() {
        let snapshot = Some("EMPNO041");
        let handles: Vec<_> = (0..2)
            .map(|_| std::thread::spawn(move || next_code(snapshot)))
            .collect();
        let codes: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(codes[0], "EMPNO042");
        assert_eq!(codes[0], codes[1]);
    }
}
