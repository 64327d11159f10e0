//! Classification of PostgreSQL errors.

/// Unique constraint guarding `links.key`.
pub const LINKS_KEY_CONSTRAINT: &str = "links_key_key";

/// Unique constraint guarding `api.key`.
pub const API_KEY_CONSTRAINT: &str = "api_key_key";

/// Returns true if `e` is a unique violation on the given constraint.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}
