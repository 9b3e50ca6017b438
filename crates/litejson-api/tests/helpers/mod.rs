//! Test helpers: build the router around a converter that stages into a temp directory.

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use litejson_api::setup::routes;
use litejson_api::AppState;
use litejson_core::{BaseConfig, Config, ConverterConfig};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{ConnectOptions, Connection};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestApp {
    pub server: TestServer,
    pub staging_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn leftover_files(&self) -> usize {
        std::fs::read_dir(&self.staging_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

pub fn test_config(staging_dir: PathBuf) -> Config {
    Config {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
        },
        converter: ConverterConfig {
            staging_dir,
            ..ConverterConfig::default()
        },
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(|config| config)
}

/// Test app whose configuration is adjusted by `customize` before the router is built
pub fn setup_test_app_with(customize: impl FnOnce(Config) -> Config) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let staging_dir = temp_dir.path().join("staging");
    let config = customize(test_config(staging_dir.clone()));

    let state = Arc::new(AppState::new(config.clone()));
    let router = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        staging_dir,
        _temp_dir: temp_dir,
    }
}

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

/// Multipart form with `bytes` in the `file` field
pub fn file_form(bytes: Vec<u8>, file_name: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(bytes)
            .file_name(file_name)
            .mime_type("application/octet-stream"),
    )
}
