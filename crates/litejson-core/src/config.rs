//! Configuration module
//!
//! Limits for the conversion pipeline and settings for the HTTP surface. Every value has a
//! default matching the service's published limits and can be overridden from the
//! environment by the surrounding deployment.

use std::env;
use std::path::PathBuf;

/// The 16-byte signature every SQLite format 3 database starts with.
pub const SQLITE_MAGIC_HEADER: &[u8; 16] = b"SQLite format 3\0";

// Common constants
const MAX_FILE_SIZE_BYTES: u64 = 50 * 1024 * 1024;
const MIN_FILE_SIZE_BYTES: u64 = 100;
const MAX_TABLES: usize = 1000;
const MAX_ROWS_PER_TABLE: usize = 100_000;
const DEFAULT_ALLOWED_EXTENSIONS: &str = ".db,.sqlite,.sqlite3,.db3";
const DEFAULT_SERVER_PORT: u16 = 3456;
const STAGING_DIR_NAME: &str = "litejson-staging";

/// Limits and filesystem settings for one converter instance
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConverterConfig {
    pub max_file_size: u64,
    pub min_file_size: u64,
    /// Lowercased, each with a leading dot (e.g. `.sqlite3`)
    pub allowed_extensions: Vec<String>,
    pub max_tables: usize,
    pub max_rows_per_table: usize,
    pub staging_dir: PathBuf,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE_BYTES,
            min_file_size: MIN_FILE_SIZE_BYTES,
            allowed_extensions: parse_extensions(DEFAULT_ALLOWED_EXTENSIONS),
            max_tables: MAX_TABLES,
            max_rows_per_table: MAX_ROWS_PER_TABLE,
            staging_dir: env::temp_dir().join(STAGING_DIR_NAME),
        }
    }
}

impl ConverterConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let defaults = Self::default();

        Ok(Self {
            max_file_size: parse_var("MAX_FILE_SIZE_BYTES", defaults.max_file_size)?,
            min_file_size: parse_var("MIN_FILE_SIZE_BYTES", defaults.min_file_size)?,
            allowed_extensions: env::var("ALLOWED_EXTENSIONS")
                .map(|raw| parse_extensions(&raw))
                .unwrap_or(defaults.allowed_extensions),
            max_tables: parse_var("MAX_TABLES", defaults.max_tables)?,
            max_rows_per_table: parse_var("MAX_ROWS_PER_TABLE", defaults.max_rows_per_table)?,
            staging_dir: env::var("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.staging_dir),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.min_file_size > self.max_file_size {
            return Err(anyhow::anyhow!(
                "MIN_FILE_SIZE_BYTES ({}) must not exceed MAX_FILE_SIZE_BYTES ({})",
                self.min_file_size,
                self.max_file_size
            ));
        }

        if self.max_tables == 0 {
            return Err(anyhow::anyhow!("MAX_TABLES must be greater than 0"));
        }

        if self.max_rows_per_table == 0 {
            return Err(anyhow::anyhow!("MAX_ROWS_PER_TABLE must be greater than 0"));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        Ok(())
    }

    /// Allow-list rendered for client messages, e.g. `.db, .sqlite`
    pub fn allowed_extensions_display(&self) -> String {
        self.allowed_extensions.join(", ")
    }
}

/// Settings for the HTTP surface
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

impl BaseConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
        })
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub converter: ConverterConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config = Config {
            base: BaseConfig::from_env()?,
            converter: ConverterConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.converter.validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production(&self.base.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }
}

fn is_production(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, anyhow::Error> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

/// Normalize a comma separated extension list: lowercase, leading dot, no blanks
pub fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty() && s != ".")
        .map(|s| {
            if s.starts_with('.') {
                s
            } else {
                format!(".{}", s)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = ConverterConfig::default();
        assert_eq!(config.max_file_size, 52_428_800);
        assert_eq!(config.min_file_size, 100);
        assert_eq!(config.max_tables, 1000);
        assert_eq!(config.max_rows_per_table, 100_000);
        assert_eq!(
            config.allowed_extensions,
            vec![".db", ".sqlite", ".sqlite3", ".db3"]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_extensions_normalizes() {
        assert_eq!(
            parse_extensions(" DB, .Sqlite ,,sqlite3,."),
            vec![".db", ".sqlite", ".sqlite3"]
        );
    }

    #[test]
    fn test_allowed_extensions_display() {
        let config = ConverterConfig::default();
        assert_eq!(
            config.allowed_extensions_display(),
            ".db, .sqlite, .sqlite3, .db3"
        );
    }

    #[test]
    fn test_validate_rejects_inverted_size_bounds() {
        let config = ConverterConfig {
            min_file_size: 10,
            max_file_size: 5,
            ..ConverterConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_caps() {
        let no_tables = ConverterConfig {
            max_tables: 0,
            ..ConverterConfig::default()
        };
        assert!(no_tables.validate().is_err());

        let no_rows = ConverterConfig {
            max_rows_per_table: 0,
            ..ConverterConfig::default()
        };
        assert!(no_rows.validate().is_err());

        let no_extensions = ConverterConfig {
            allowed_extensions: vec![],
            ..ConverterConfig::default()
        };
        assert!(no_extensions.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        assert!(is_production("Production"));
        assert!(is_production("prod"));
        assert!(!is_production("development"));
    }

    #[test]
    fn test_magic_header_length() {
        assert_eq!(SQLITE_MAGIC_HEADER.len(), 16);
        assert_eq!(&SQLITE_MAGIC_HEADER[..15], b"SQLite format 3");
    }
}
