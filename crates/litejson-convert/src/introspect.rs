//! Schema introspection of a staged database.

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode};
use sqlx::ConnectOptions;
use std::path::Path;

/// User tables in catalog order. Names starting with the reserved `sqlite_` prefix belong
/// to SQLite itself; `_` is escaped so only the literal prefix is excluded.
const LIST_USER_TABLES: &str = r"SELECT name FROM sqlite_master
WHERE type = 'table' AND name NOT LIKE 'sqlite\_%' ESCAPE '\'
ORDER BY rowid";

/// Schema limit violations found after staging
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Database contains no tables")]
    NoTablesFound,

    #[error("Too many tables: {found} (max: {max})")]
    TooManyTables { found: usize, max: usize },
}

/// Open a staged database for reading.
///
/// `journal_mode = DELETE` converts WAL databases on open so nothing but the staged file
/// remains once the connection closes; `query_only` keeps the connection from writing.
pub async fn open_database(path: &Path) -> Result<SqliteConnection, sqlx::Error> {
    SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(false)
        .journal_mode(SqliteJournalMode::Delete)
        .pragma("query_only", "ON")
        .connect()
        .await
}

/// Names of all user tables, in catalog order
pub async fn list_user_tables(conn: &mut SqliteConnection) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(LIST_USER_TABLES)
        .fetch_all(&mut *conn)
        .await
}

/// Reject databases without tables or with more than `max_tables`
pub fn check_table_count(found: usize, max_tables: usize) -> Result<(), SchemaError> {
    if found == 0 {
        return Err(SchemaError::NoTablesFound);
    }

    if found > max_tables {
        return Err(SchemaError::TooManyTables {
            found,
            max: max_tables,
        });
    }

    Ok(())
}

/// Quote an identifier for interpolation into SQL (`a"b` → `"a""b"`)
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_table_count_boundaries() {
        assert_eq!(check_table_count(0, 1000), Err(SchemaError::NoTablesFound));
        assert!(check_table_count(1, 1000).is_ok());
        assert!(check_table_count(1000, 1000).is_ok());
        assert_eq!(
            check_table_count(1001, 1000),
            Err(SchemaError::TooManyTables {
                found: 1001,
                max: 1000
            })
        );
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("users"), "\"users\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(quote_identifier("has space"), "\"has space\"");
    }
}
