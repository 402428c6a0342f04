//! API server configuration.

use gestor_core::auth::jwt::resolve_jwt_secret;

/// Origins of the browser frontend allowed by default.
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:5174";

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:5000").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// JWT signing secret. Process-wide, never rotated.
    pub jwt_secret: String,
    /// Origins allowed by CORS (credentials enabled).
    pub cors_origins: Vec<String>,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable       | Default                                         |
    /// |----------------|-------------------------------------------------|
    /// | `BIND_ADDR`    | `127.0.0.1:5000`                                |
    /// | `DATABASE_URL` | `postgres://localhost:5432/gestor_productos`    |
    /// | `JWT_SECRET`   | generated & persisted to file                   |
    /// | `CORS_ORIGINS` | `http://localhost:5173,http://localhost:5174`   |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/gestor_productos".into()),
            jwt_secret: resolve_jwt_secret(),
            cors_origins: parse_origins(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
            ),
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
