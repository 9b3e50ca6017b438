//! Bounded row extraction.
//!
//! Rows come back in the engine's storage order (no `ORDER BY`), which is deterministic for
//! a given file and SQLite version. Each cell is decoded by its dynamic storage class rather
//! than the declared column type, since SQLite columns may hold any class.

use litejson_core::{Row, SqlValue};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use crate::introspect::quote_identifier;

/// Declared columns including generated ones (hidden 2 and 3), which `SELECT *` also returns.
/// Hidden columns of virtual tables (1) are left out, as `SELECT *` does.
const TABLE_COLUMNS: &str =
    "SELECT name FROM pragma_table_xinfo(?1) WHERE hidden IN (0, 2, 3) ORDER BY cid";

/// One table's columns and its capped rows
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// Declared column names in declaration order
pub async fn table_columns(
    conn: &mut SqliteConnection,
    table: &str,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(TABLE_COLUMNS)
        .bind(table)
        .fetch_all(&mut *conn)
        .await
}

/// Up to `limit` rows of `table`
pub async fn fetch_rows(
    conn: &mut SqliteConnection,
    table: &str,
    limit: usize,
) -> Result<Vec<Row>, sqlx::Error> {
    let sql = format!("SELECT * FROM {} LIMIT ?1", quote_identifier(table));
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let rows = sqlx::query(&sql).bind(limit).fetch_all(&mut *conn).await?;

    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let names: Vec<String> = first
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();

    rows.iter().map(|row| decode_row(row, &names)).collect()
}

/// Columns and rows for one table
pub async fn extract_table(
    conn: &mut SqliteConnection,
    table: &str,
    max_rows: usize,
) -> Result<ExtractedTable, sqlx::Error> {
    let columns = table_columns(conn, table).await?;
    let rows = fetch_rows(conn, table, max_rows).await?;

    tracing::debug!(
        table = %table,
        rows = rows.len(),
        columns = columns.len(),
        "Extracted table"
    );

    Ok(ExtractedTable {
        name: table.to_string(),
        columns,
        rows,
    })
}

fn decode_row(row: &SqliteRow, names: &[String]) -> Result<Row, sqlx::Error> {
    let mut decoded = Row::with_capacity(names.len());
    for (index, name) in names.iter().enumerate() {
        decoded.push(name.as_str(), decode_cell(row, index)?);
    }
    Ok(decoded)
}

fn decode_cell(row: &SqliteRow, index: usize) -> Result<SqlValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }

    let type_info = raw.type_info();
    let value = match type_info.name() {
        "INTEGER" => SqlValue::Integer(row.try_get_unchecked::<i64, _>(index)?),
        "REAL" => SqlValue::Real(row.try_get_unchecked::<f64, _>(index)?),
        "BLOB" => SqlValue::Blob(row.try_get_unchecked::<Vec<u8>, _>(index)?),
        // TEXT; read as bytes so invalid UTF-8 degrades instead of failing the table
        _ => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
            SqlValue::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
    };
    Ok(value)
}
