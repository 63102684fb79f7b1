use std::path::PathBuf;

use school_core::fanout::DEFAULT_WORKERS;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory uploaded avatar files are written to (default: `avatars`).
    pub avatars_dir: PathBuf,
    /// Worker threads used by the names fan-out endpoints (default: `3`).
    pub name_workers: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `AVATARS_DIR`          | `avatars`                  |
    /// | `NAME_WORKERS`         | `3`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let avatars_dir = PathBuf::from(
            std::env::var("AVATARS_DIR").unwrap_or_else(|_| "avatars".into()),
        );

        let name_workers: usize = std::env::var("NAME_WORKERS")
            .unwrap_or_else(|_| DEFAULT_WORKERS.to_string())
            .parse()
            .expect("NAME_WORKERS must be a valid usize");
        assert!(name_workers > 0, "NAME_WORKERS must be at least 1");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            avatars_dir,
            name_workers,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
