//! Classification of SQLite errors surfaced through sqlx.

/// Returns true if `e` is a uniqueness violation on `url.alias`.
///
/// SQLite reports no constraint name, so the column is matched from the
/// message (`UNIQUE constraint failed: url.alias`).
pub fn is_unique_violation_on_alias(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.message().contains("url.alias")
}
