use std::path::PathBuf;

use axum::http::HeaderValue;
use survey_db::config::{parse_var, ConfigError};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins from comma-separated `CORS_ORIGINS`. Empty means
    /// any origin.
    pub cors_origins: Vec<String>,
    /// Directory with `index.html`, `admin.html` and other front-end assets.
    pub frontend_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            cors_origins: Vec::new(),
            frontend_dir: PathBuf::from("frontend"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `HOST`                 | `0.0.0.0`  |
    /// | `PORT`                 | `3000`     |
    /// | `CORS_ORIGINS`         | any origin |
    /// | `FRONTEND_DIR`         | `frontend` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let host = var("HOST").unwrap_or(defaults.host);

        let port = var("PORT")
            .map(|v| parse_var("PORT", v, "u16"))
            .transpose()?
            .unwrap_or(defaults.port);

        let cors_origins = var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .transpose()?
            .unwrap_or(defaults.cors_origins);

        let frontend_dir = var("FRONTEND_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.frontend_dir);

        Ok(Self {
            host,
            port,
            cors_origins,
            frontend_dir,
        })
    }
}

/// Split and check a comma-separated origin list. Every entry must be usable
/// as a header value.
fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| match HeaderValue::from_str(origin) {
            Ok(_) => Ok(origin.to_string()),
            Err(_) => Err(ConfigError::InvalidVar {
                var: "CORS_ORIGINS",
                value: origin.to_string(),
                expected: "origin",
            }),
        })
        .collect()
}
