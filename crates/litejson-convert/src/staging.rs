//! Staging store for uploaded databases.
//!
//! Each upload is written to its own file inside a process-wide staging directory before
//! SQLite opens it. The directory is injected as a [`StagingArea`] so tests (and
//! deployments) can point it anywhere. A [`StagedFile`] owns its path: it is removed
//! explicitly through [`StagedFile::remove`], and on drop as a fallback.

use chrono::Utc;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Files SQLite may create next to a database
const SIDECAR_SUFFIXES: [&str; 3] = ["-journal", "-wal", "-shm"];

/// Staging operation errors
#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("Failed to create staging directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Staged file name already in use: {}", .0.display())]
    NameCollision(PathBuf),

    #[error("Failed to write staged file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Directory that holds in-flight uploads, one file per request
#[derive(Clone, Debug)]
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ensure the staging directory exists
    async fn ensure_dir(&self) -> Result<(), StagingError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StagingError::CreateDir {
                path: self.dir.clone(),
                source,
            })
    }

    /// Write `content` to a fresh, uniquely named file
    pub async fn stage(&self, content: &[u8]) -> Result<StagedFile, StagingError> {
        self.ensure_dir().await?;
        self.write_new(&unique_file_name(), content).await
    }

    async fn write_new(&self, file_name: &str, content: &[u8]) -> Result<StagedFile, StagingError> {
        let path = self.dir.join(file_name);
        let start = std::time::Instant::now();

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|source| {
                if source.kind() == io::ErrorKind::AlreadyExists {
                    StagingError::NameCollision(path.clone())
                } else {
                    StagingError::Write {
                        path: path.clone(),
                        source,
                    }
                }
            })?;

        // From here on the file exists and belongs to this request
        let staged = StagedFile::new(path);

        let write_error = |source| StagingError::Write {
            path: staged.path.clone(),
            source,
        };
        file.write_all(content).await.map_err(write_error)?;
        file.sync_all().await.map_err(write_error)?;

        tracing::debug!(
            path = %staged.path.display(),
            size_bytes = content.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Staged upload"
        );

        Ok(staged)
    }
}

/// `sqlite_<unix millis>_<random token>.db`
fn unique_file_name() -> String {
    format!(
        "sqlite_{}_{}.db",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

/// A staged database file owned by one conversion
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    removed: bool,
}

impl StagedFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            removed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The database file followed by every sidecar SQLite might have left
    fn artifact_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.path.clone()];
        paths.extend(SIDECAR_SUFFIXES.iter().map(|suffix| {
            let mut name: OsString = self.path.as_os_str().to_owned();
            name.push(suffix);
            PathBuf::from(name)
        }));
        paths
    }

    /// Delete the staged file and its sidecars. Failures are logged, never returned.
    pub async fn remove(mut self) {
        for path in self.artifact_paths() {
            match fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        path = %path.display(),
                        "Failed to remove staged file"
                    );
                }
            }
        }
        self.removed = true;
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        for path in self.artifact_paths() {
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(
                        error = %e,
                        path = %path.display(),
                        "Failed to remove staged file on drop"
                    );
                }
            }
        }
    }
}
