//! Database connection settings loaded from the environment.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Default upper bound on pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default wait for a pooled connection, in seconds.
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    InvalidVar {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid DATABASE_URL: {0}")]
    InvalidDatabaseUrl(#[source] sqlx::Error),
}

/// Where connection parameters come from. Exactly one form is active.
#[derive(Clone, PartialEq, Eq)]
pub enum ConnectionSource {
    /// `DATABASE_URL`.
    Url(String),
    /// `PGHOST`, `PGPORT`, `PGUSER`, `PGPASSWORD`, `PGDATABASE`. Unset values
    /// fall back to the driver defaults.
    Discrete {
        host: Option<String>,
        port: Option<u16>,
        user: Option<String>,
        password: Option<String>,
        database: Option<String>,
    },
}

impl std::fmt::Debug for ConnectionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // URLs usually embed credentials.
            Self::Url(_) => f.write_str("Url(<redacted>)"),
            Self::Discrete {
                host,
                port,
                user,
                database,
                ..
            } => f
                .debug_struct("Discrete")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("database", database)
                .finish_non_exhaustive(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub source: ConnectionSource,
    /// `PGSSL=true`: encrypt the connection without validating the server
    /// certificate.
    pub ssl: bool,
    /// Pool ceiling (`DB_MAX_CONNECTIONS`, default `10`).
    pub max_connections: u32,
    /// How long a query waits for a connection before failing
    /// (`DB_ACQUIRE_TIMEOUT_SECS`, default `30`).
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Load configuration from process environment variables.
    ///
    /// | Env Var              | Default |
    /// |----------------------|---------|
    /// | `DATABASE_URL`       | unset   |
    /// | `PGHOST`..`PGDATABASE` | driver defaults |
    /// | `PGSSL`              | `false` |
    /// | `DB_MAX_CONNECTIONS` | `10`    |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `30` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let source = match var("DATABASE_URL") {
            Some(url) => ConnectionSource::Url(url),
            None => ConnectionSource::Discrete {
                host: var("PGHOST"),
                port: var("PGPORT")
                    .map(|v| parse_var("PGPORT", v, "port number"))
                    .transpose()?,
                user: var("PGUSER"),
                password: var("PGPASSWORD"),
                database: var("PGDATABASE"),
            },
        };

        let ssl = var("PGSSL").as_deref() == Some("true");

        let max_connections = var("DB_MAX_CONNECTIONS")
            .map(|v| parse_var("DB_MAX_CONNECTIONS", v, "u32"))
            .transpose()?
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let acquire_timeout_secs = var("DB_ACQUIRE_TIMEOUT_SECS")
            .map(|v| parse_var("DB_ACQUIRE_TIMEOUT_SECS", v, "u64"))
            .transpose()?
            .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS);

        Ok(Self {
            source,
            ssl,
            max_connections,
            acquire_timeout_secs,
        })
    }

    /// Short label for logs. Never includes credentials.
    pub fn mode(&self) -> &'static str {
        match self.source {
            ConnectionSource::Url(_) => "url",
            ConnectionSource::Discrete { .. } => "discrete",
        }
    }

    /// Translate into driver connect options.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        let options = match &self.source {
            ConnectionSource::Url(url) => {
                PgConnectOptions::from_str(url).map_err(ConfigError::InvalidDatabaseUrl)?
            }
            ConnectionSource::Discrete {
                host,
                port,
                user,
                password,
                database,
            } => {
                let mut options = PgConnectOptions::new().ssl_mode(PgSslMode::Disable);
                if let Some(host) = host {
                    options = options.host(host);
                }
                if let Some(port) = port {
                    options = options.port(*port);
                }
                if let Some(user) = user {
                    options = options.username(user);
                }
                if let Some(password) = password {
                    options = options.password(password);
                }
                if let Some(database) = database {
                    options = options.database(database);
                }
                options
            }
        };

        if self.ssl {
            Ok(options.ssl_mode(PgSslMode::Require))
        } else {
            Ok(options)
        }
    }
}

/// Parse a configuration value, naming the variable on failure.
pub fn parse_var<T: FromStr>(
    var: &'static str,
    value: String,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidVar {
            var,
            value,
            expected,
        })
}
