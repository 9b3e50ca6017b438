//! Shared fixtures: real SQLite files built with sqlx, and converters staging into
//! throwaway directories.

#![allow(dead_code)]

use litejson_convert::{Converter, StagingArea};
use litejson_core::{ConverterConfig, UploadedFile};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{ConnectOptions, Connection};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Build a database by running `setup_sql` and return the file's bytes
pub async fn build_database(setup_sql: &str) -> Vec<u8> {
    let dir = tempfile::tempdir().expect("Failed to create fixture directory");
    let path = dir.path().join("fixture.db");

    let mut conn = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Delete)
        .connect()
        .await
        .expect("Failed to create fixture database");

    sqlx::raw_sql(setup_sql)
        .execute(&mut conn)
        .await
        .expect("Failed to run fixture SQL");
    conn.close().await.expect("Failed to close fixture database");

    std::fs::read(&path).expect("Failed to read fixture database")
}

/// A database with one table per name, each `(id INTEGER)` and empty
pub async fn database_with_tables(count: usize) -> Vec<u8> {
    let mut sql = String::from("BEGIN;\n");
    for i in 0..count {
        sql.push_str(&format!("CREATE TABLE t{} (id INTEGER);\n", i));
    }
    sql.push_str("COMMIT;");
    build_database(&sql).await
}

/// A valid database file that holds no user tables
pub async fn empty_database() -> Vec<u8> {
    build_database("CREATE TABLE scratch (id INTEGER); DROP TABLE scratch;").await
}

pub fn upload(bytes: Vec<u8>, name: &str) -> UploadedFile {
    UploadedFile::new(bytes, name)
}

/// Converter whose staging directory lives (and dies) with the returned `TempDir`
pub struct TestConverter {
    pub converter: Converter,
    pub staging_dir: PathBuf,
    _temp: TempDir,
}

impl TestConverter {
    pub fn new() -> Self {
        Self::with_config(ConverterConfig::default())
    }

    pub fn with_config(config: ConverterConfig) -> Self {
        let temp = tempfile::tempdir().expect("Failed to create staging directory");
        let staging_dir = temp.path().join("staging");
        let converter = Converter::with_staging(
            ConverterConfig {
                staging_dir: staging_dir.clone(),
                ..config
            },
            StagingArea::new(&staging_dir),
        );
        Self {
            converter,
            staging_dir,
            _temp: temp,
        }
    }

    /// Files left in the staging directory (a missing directory counts as empty)
    pub fn leftover_files(&self) -> Vec<PathBuf> {
        list_dir(&self.staging_dir)
    }
}

fn list_dir(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .map(|entry| entry.expect("Failed to read staging entry").path())
            .collect(),
        Err(_) => Vec::new(),
    }
}
