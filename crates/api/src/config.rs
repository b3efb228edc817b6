//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DB_HOST` - Database host
//! - `DB_DBNAME` - Database name
//! - `DB_USERNAME` - Database user
//!
//! ## Optional
//! - `DB_PASSWORD` - Database password
//! - `DB_PORT` - Database port (default: 26257)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `SSL_CERT_CONTENTS` - PEM-encoded CA certificate (takes precedence over `SSL_CERT`)
//! - `SSL_CERT` - Path to a PEM-encoded CA certificate
//! - `REST_HOST` - Bind address (default: 0.0.0.0)
//! - `REST_PORT` - Listen port, falls back to `PORT` (default: 3000)
//! - `CUSTOMER_API_ERROR_MODE` - `legacy` or `strict` (default: legacy)
//! - `LOG_FORMAT` - `text` or `json` (default: text)
//!
//! ## Optional (TLS)
//! - `REST_TLS_CERT` - PEM-encoded certificate chain for the listener
//! - `REST_TLS_KEY` - PEM-encoded private key for the listener

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

use crate::error::ErrorMode;

const DEFAULT_DB_PORT: &str = "26257";
const DEFAULT_MAX_CONNECTIONS: &str = "10";
const APPLICATION_NAME: &str = "customer-rest-api";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Database connection settings
    pub database: DatabaseConfig,
    /// How store failures are reported to clients
    pub error_mode: ErrorMode,
    /// Log output format
    pub log_format: LogFormat,
    /// TLS configuration for HTTPS (optional)
    pub tls: Option<TlsConfig>,
}

/// Where the database CA certificate comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaCert {
    /// Certificate content held in memory.
    Pem(String),
    /// Certificate read from disk when the pool connects.
    File(PathBuf),
}

/// Database connection settings.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: Option<SecretString>,
    pub ca_cert: Option<CaCert>,
    pub max_connections: u32,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("ca_cert", &self.ca_cert.as_ref().map(CaCert::describe))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// TLS configuration for HTTPS.
#[derive(Clone)]
pub struct TlsConfig {
    /// PEM-encoded certificate chain
    pub cert_pem: String,
    /// PEM-encoded private key
    pub key_pem: SecretString,
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("cert_pem", &"[CERTIFICATE]")
            .field("key_pem", &"[REDACTED]")
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_var(env, "REST_HOST", "0.0.0.0")?;
        let port = match env("REST_PORT") {
            Some(_) => parse_var(env, "REST_PORT", "3000")?,
            None => parse_var(env, "PORT", "3000")?,
        };

        let error_mode = get_or_default(env, "CUSTOMER_API_ERROR_MODE", "legacy")
            .parse::<ErrorMode>()
            .map_err(|e| ConfigError::InvalidEnvVar("CUSTOMER_API_ERROR_MODE".to_string(), e))?;

        let log_format = match get_or_default(env, "LOG_FORMAT", "text").as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "LOG_FORMAT".to_string(),
                    format!("expected 'text' or 'json', got '{other}'"),
                ));
            }
        };

        Ok(Self {
            host,
            port,
            database: DatabaseConfig::from_lookup(env)?,
            error_mode,
            log_format,
            tls: TlsConfig::from_lookup(env)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DatabaseConfig {
    /// Load only the database settings from environment variables.
    ///
    /// Used by the CLI, which has no listener to configure.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let ca_cert = match (env("SSL_CERT_CONTENTS"), env("SSL_CERT")) {
            (Some(pem), _) if !pem.trim().is_empty() => Some(CaCert::Pem(pem)),
            (_, Some(path)) if !path.trim().is_empty() => Some(CaCert::File(PathBuf::from(path))),
            _ => None,
        };

        Ok(Self {
            host: get_required(env, "DB_HOST")?,
            port: parse_var(env, "DB_PORT", DEFAULT_DB_PORT)?,
            database: get_required(env, "DB_DBNAME")?,
            username: get_required(env, "DB_USERNAME")?,
            password: env("DB_PASSWORD").map(SecretString::from),
            ca_cert,
            max_connections: parse_var(env, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
        })
    }

    /// Build sqlx connect options.
    ///
    /// A configured CA certificate enables `verify-full`; without one the
    /// connection prefers TLS but does not verify the server.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        let mut options = PgConnectOptions::new_without_pgpass()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.username)
            .application_name(APPLICATION_NAME);

        if let Some(password) = &self.password {
            options = options.password(password.expose_secret());
        }

        match &self.ca_cert {
            Some(CaCert::Pem(pem)) => options
                .ssl_mode(PgSslMode::VerifyFull)
                .ssl_root_cert_from_pem(pem.as_bytes().to_vec()),
            Some(CaCert::File(path)) => options
                .ssl_mode(PgSslMode::VerifyFull)
                .ssl_root_cert(path),
            None => options.ssl_mode(PgSslMode::Prefer),
        }
    }
}

impl CaCert {
    fn describe(&self) -> String {
        match self {
            Self::Pem(_) => "[CERTIFICATE]".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

impl TlsConfig {
    fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        match (env("REST_TLS_CERT"), env("REST_TLS_KEY")) {
            (Some(cert), Some(key)) => Ok(Some(Self {
                cert_pem: cert,
                key_pem: SecretString::from(key),
            })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "REST_TLS_*".to_string(),
                "Both REST_TLS_CERT and REST_TLS_KEY must be set together".to_string(),
            )),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required variable.
fn get_required(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a variable with a default value.
fn get_or_default(env: &dyn Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    env(key).unwrap_or_else(|| default.to_string())
}

/// Get a variable with a default value and parse it.
fn parse_var<T>(
    env: &dyn Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_or_default(env, key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
