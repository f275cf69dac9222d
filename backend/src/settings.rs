//! Service configuration loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `USERS_*` environment variables and
//! configuration files; anything left unset falls back to the defaults below.
//! Numeric overrides are parsed as numbers: `USERS_DB_PORT=6543` yields port
//! 6543, and a non-numeric value is a load error rather than a silent fallback.

use std::fmt;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_PASSWORD: &str = "postgres";
const DEFAULT_DB_NAME: &str = "users";
const DEFAULT_DB_SSLMODE: &str = "disable";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENVIRONMENT: &str = "development";

/// Reasons a configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A required text value is empty.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    /// The database port is zero.
    #[error("database port must be between 1 and 65535")]
    InvalidPort,
    /// The connection pool would hold no connections.
    #[error("database pool must allow at least one connection")]
    InvalidPoolSize,
    /// Unknown log level.
    #[error("unsupported log level: {value}")]
    LogLevel { value: String },
    /// Unknown deployment environment.
    #[error("unsupported environment: {value}")]
    Environment { value: String },
    /// The database URL could not be assembled.
    #[error("invalid database url: {message}")]
    DatabaseUrl { message: String },
}

/// Minimum severity written to the log sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `EnvFilter` directive for this level.
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(SettingsError::LogLevel {
                value: s.to_owned(),
            }),
        }
    }
}

/// Deployment environment; selects the log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl FromStr for Environment {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err(SettingsError::Environment {
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        })
    }
}

/// Store connection, listener and logging settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS")]
pub struct AppSettings {
    /// Database host name.
    pub db_host: Option<String>,
    /// Database port.
    #[ortho_config(default = 5432)]
    pub db_port: u16,
    /// Database role.
    pub db_user: Option<String>,
    /// Database password.
    pub db_password: Option<String>,
    /// Database name.
    pub db_name: Option<String>,
    /// libpq `sslmode` value.
    pub db_sslmode: Option<String>,
    /// Upper bound on pooled connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Socket address the HTTP server binds, e.g. `0.0.0.0:8080`.
    pub listen_addr: Option<String>,
    /// One of debug, info, warn, error.
    pub log_level: Option<String>,
    /// One of development, production, test.
    pub environment: Option<String>,
}

impl AppSettings {
    /// Database host, defaulting to `localhost`.
    pub fn db_host(&self) -> &str {
        self.db_host.as_deref().unwrap_or(DEFAULT_DB_HOST)
    }

    /// Database port.
    pub fn db_port(&self) -> u16 {
        self.db_port
    }

    /// Database role, defaulting to `postgres`.
    pub fn db_user(&self) -> &str {
        self.db_user.as_deref().unwrap_or(DEFAULT_DB_USER)
    }

    /// Database password, defaulting to `postgres`.
    pub fn db_password(&self) -> &str {
        self.db_password.as_deref().unwrap_or(DEFAULT_DB_PASSWORD)
    }

    /// Database name, defaulting to `users`.
    pub fn db_name(&self) -> &str {
        self.db_name.as_deref().unwrap_or(DEFAULT_DB_NAME)
    }

    /// SSL mode, defaulting to `disable`.
    pub fn db_sslmode(&self) -> &str {
        self.db_sslmode.as_deref().unwrap_or(DEFAULT_DB_SSLMODE)
    }

    /// Pool size.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    /// Listen address, defaulting to `0.0.0.0:8080`.
    pub fn listen_addr(&self) -> &str {
        self.listen_addr.as_deref().unwrap_or(DEFAULT_LISTEN_ADDR)
    }

    /// Parsed log level, defaulting to info.
    ///
    /// # Errors
    /// [`SettingsError::LogLevel`] for unknown values.
    pub fn log_level(&self) -> Result<LogLevel, SettingsError> {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL).parse()
    }

    /// Parsed environment, defaulting to development.
    ///
    /// # Errors
    /// [`SettingsError::Environment`] for unknown values.
    pub fn environment(&self) -> Result<Environment, SettingsError> {
        self.environment
            .as_deref()
            .unwrap_or(DEFAULT_ENVIRONMENT)
            .parse()
    }

    /// Check every value the service depends on.
    ///
    /// # Errors
    /// The first problem found, as a [`SettingsError`].
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.db_host().trim().is_empty() {
            return Err(SettingsError::Empty { field: "db_host" });
        }
        if self.db_port() == 0 {
            return Err(SettingsError::InvalidPort);
        }
        if self.db_user().trim().is_empty() {
            return Err(SettingsError::Empty { field: "db_user" });
        }
        if self.db_max_connections() == 0 {
            return Err(SettingsError::InvalidPoolSize);
        }
        if self.listen_addr().trim().is_empty() {
            return Err(SettingsError::Empty {
                field: "listen_addr",
            });
        }
        self.log_level()?;
        self.environment()?;
        Ok(())
    }

    /// PostgreSQL connection URL with credentials percent-encoded.
    ///
    /// # Errors
    /// [`SettingsError::DatabaseUrl`] when the host or credentials cannot be
    /// represented in a URL.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        let invalid = |message: &str| SettingsError::DatabaseUrl {
            message: message.to_owned(),
        };

        let mut url = Url::parse(&format!("postgres://{}:{}", self.db_host(), self.db_port()))
            .map_err(|err| invalid(&err.to_string()))?;
        url.set_username(self.db_user())
            .map_err(|()| invalid("user cannot be set"))?;
        url.set_password(Some(self.db_password()))
            .map_err(|()| invalid("password cannot be set"))?;
        url.set_path(self.db_name());
        url.query_pairs_mut()
            .append_pair("sslmode", self.db_sslmode());
        Ok(url.into())
    }
}
