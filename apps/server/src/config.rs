//! # Server Configuration
//!
//! Layered configuration built with the `config` crate.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     OPSDESK__SERVER__PORT=9000                                         │
//! │     OPSDESK__MAIL__RELAY_HOST=smtp.example.com                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $OPSDESK_CONFIG, else ./opsdesk.toml (optional)                    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     0.0.0.0:8000, data.db, ./static, no mail relay                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 8000
//!
//! [database]
//! path = "data.db"
//! max_connections = 5
//! acquire_timeout_secs = 30
//!
//! [storage]
//! static_dir = "static"
//! public_prefix = "/static"
//!
//! # Omit the whole table to log alerts instead of mailing them
//! [mail]
//! relay_host = "smtp.example.com"
//! relay_port = 587
//! username = "alerts@example.com"
//! secret = "app-password"
//! sender = "Opsdesk <alerts@example.com>"
//! recipient = "admin@example.com"
//! ```

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "OPSDESK_CONFIG";

/// Config file looked up in the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "opsdesk.toml";

/// Prefix for per-key environment overrides.
const ENV_PREFIX: &str = "OPSDESK";

// =============================================================================
// Configuration Types
// =============================================================================

/// Top-level server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    /// Mail relay for low-stock alerts. `None` logs alerts instead.
    #[serde(default)]
    pub mail: Option<MailConfig>,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
}

impl ServerConfig {
    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// SQLite settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
    /// Seconds a request waits for a free pooled connection.
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Pool acquire timeout.
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

/// Where generated QR images go and how they are addressed.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory the PNG files are written to and served from.
    pub static_dir: PathBuf,
    /// URL prefix the directory is mounted under.
    pub public_prefix: String,
}

/// Authenticated STARTTLS submission settings.
#[derive(Clone, Deserialize)]
pub struct MailConfig {
    pub relay_host: String,
    #[serde(default = "default_relay_port")]
    pub relay_port: u16,
    pub username: String,
    pub secret: String,
    pub sender: String,
    pub recipient: String,
}

fn default_relay_port() -> u16 {
    587
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("relay_host", &self.relay_host)
            .field("relay_port", &self.relay_port)
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .finish()
    }
}

// =============================================================================
// Loading
// =============================================================================

impl AppConfig {
    /// Loads configuration from defaults, the config file and the environment.
    ///
    /// A file named by `OPSDESK_CONFIG` must exist; the default
    /// `opsdesk.toml` is optional.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        Self::load_layered(explicit, Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads defaults, then the config file, then `env`.
    ///
    /// `explicit` is the file named by `OPSDESK_CONFIG` and must exist when
    /// given; otherwise `opsdesk.toml` is read if present.
    fn load_layered(explicit: Option<PathBuf>, env: Environment) -> Result<Self, ConfigError> {
        let file = match explicit {
            Some(path) => File::from(path).required(true),
            None => File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
        };

        let config = defaults()?
            .add_source(file)
            .add_source(env.separator("__").try_parsing(true))
            .build()?;

        Self::finish(config)
    }

    /// Builds configuration from defaults plus a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config = defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        Self::finish(config)
    }

    fn finish(config: Config) -> Result<Self, ConfigError> {
        let app: AppConfig = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    /// Checks values the types alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.port".to_string(),
                reason: "must not be 0".to_string(),
            });
        }

        if self.database.acquire_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "database.acquire_timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "database.max_connections".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let prefix = &self.storage.public_prefix;
        if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                key: "storage.public_prefix".to_string(),
                reason: format!("'{}' must look like /static", prefix),
            });
        }

        if let Some(mail) = &self.mail {
            if mail.relay_host.trim().is_empty() {
                return Err(ConfigError::MissingRequired("mail.relay_host".to_string()));
            }
        }

        Ok(())
    }
}

fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("server.bind_addr", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("database.path", "data.db")?
        .set_default("database.max_connections", 5)?
        .set_default("database.acquire_timeout_secs", 30)?
        .set_default("storage.static_dir", "static")?
        .set_default("storage.public_prefix", "/static")?)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
