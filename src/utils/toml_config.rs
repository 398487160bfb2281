//! TOML-based configuration for the Stockroom server
//!
//! Loaded once at startup from `stockroom.toml` and shared read-only. Every
//! field has a default; the token secret is the only value that must come
//! from somewhere, either the environment (preferred) or the file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from stockroom.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockroomConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Largest accepted request body
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_body_limit() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

// ============= Authentication Configuration =============

#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Static token secret, used only when the environment variable is unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// Environment variable name containing the token secret
    #[serde(default = "default_secret_env")]
    pub secret_env: String,

    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,

    /// Argon2 memory cost in KiB
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,

    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,

    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
}

fn default_secret_env() -> String {
    "SECRET".to_string()
}

fn default_token_ttl() -> i64 {
    crate::auth::jwt::DEFAULT_TOKEN_TTL_SECS
}

fn default_hash_memory() -> u32 {
    argon2::Params::DEFAULT_M_COST
}

fn default_hash_iterations() -> u32 {
    argon2::Params::DEFAULT_T_COST
}

fn default_hash_parallelism() -> u32 {
    argon2::Params::DEFAULT_P_COST
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: None,
            secret_env: default_secret_env(),
            token_ttl_secs: default_token_ttl(),
            hash_memory_kib: default_hash_memory(),
            hash_iterations: default_hash_iterations(),
            hash_parallelism: default_hash_parallelism(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("secret_env", &self.secret_env)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("hash_memory_kib", &self.hash_memory_kib)
            .field("hash_iterations", &self.hash_iterations)
            .field("hash_parallelism", &self.hash_parallelism)
            .finish()
    }
}

// ============= Database Configuration =============

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    /// libSQL/SQLite file (or `:memory:`)
    #[default]
    Sqlite,
    /// Process-local maps; nothing survives a restart
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Local database path, or `:memory:`
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default)]
    pub backend: DatabaseBackend,
}

fn default_database_url() -> String {
    "./data/stockroom.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            backend: DatabaseBackend::default(),
        }
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("No token secret: set the '{0}' environment variable or auth.secret")]
    MissingSecret(String),
}

impl StockroomConfig {
    /// Load configuration from a TOML file, applying environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::FileNotFound(_)) => {
                let mut config = Self::default();
                config.apply_port_override(std::env::var("PORT").ok().as_deref())?;
                config.validate()?;
                Ok(config)
            }
            other => other,
        }
    }

    /// Parse TOML content, apply the `PORT` override and validate.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: StockroomConfig = toml::from_str(content)?;
        config.apply_port_override(std::env::var("PORT").ok().as_deref())?;
        config.validate()?;
        Ok(config)
    }

    /// Replace `server.port` with `value` when it is set and non-empty.
    pub fn apply_port_override(&mut self, value: Option<&str>) -> Result<(), ConfigError> {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(());
        };

        self.server.port = value.parse().map_err(|_| {
            ConfigError::ValidationError(format!("PORT must be a port number, got '{}'", value))
        })?;
        Ok(())
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host must not be empty".to_string(),
            ));
        }

        if self.server.body_limit_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "server.body_limit_bytes must be positive".to_string(),
            ));
        }

        if self.auth.token_ttl_secs <= 0 {
            return Err(ConfigError::ValidationError(
                "auth.token_ttl_secs must be positive".to_string(),
            ));
        }

        if self.auth.secret_env.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.secret_env must not be empty".to_string(),
            ));
        }

        argon2::Params::new(
            self.auth.hash_memory_kib,
            self.auth.hash_iterations,
            self.auth.hash_parallelism,
            None,
        )
        .map_err(|e| ConfigError::ValidationError(format!("Invalid hash parameters: {}", e)))?;

        if self.database.backend == DatabaseBackend::Sqlite && self.database.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.url must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve the token secret: the environment variable named by
    /// `auth.secret_env` wins over `auth.secret`.
    pub fn secret(&self) -> Result<String, ConfigError> {
        std::env::var(&self.auth.secret_env)
            .ok()
            .filter(|secret| !secret.is_empty())
            .or_else(|| self.auth.secret.clone().filter(|secret| !secret.is_empty()))
            .ok_or_else(|| ConfigError::MissingSecret(self.auth.secret_env.clone()))
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: StockroomConfig = toml::from_str("").expect("parse");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_format, LogFormat::Pretty);
        assert_eq!(config.server.body_limit_bytes, 1024 * 1024);
        assert_eq!(config.auth.secret_env, "SECRET");
        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert_eq!(config.database.backend, DatabaseBackend::Sqlite);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let content = r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"
log_format = "json"

[auth]
secret_env = "STOCKROOM_TEST_UNUSED_SECRET"
token_ttl_secs = 600
hash_memory_kib = 8
hash_iterations = 1
hash_parallelism = 1

[database]
url = ":memory:"
backend = "memory"
"#;
        let config: StockroomConfig = toml::from_str(content).expect("parse");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.auth.token_ttl_secs, 600);
        assert_eq!(config.database.backend, DatabaseBackend::Memory);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "[server]\nhost = \"localhost\"").expect("write");

        let config = StockroomConfig::load(file.path()).expect("load");
        assert_eq!(config.server.host, "localhost");
    }

    #[test]
    fn test_load_missing_file() {
        let result = StockroomConfig::load("/nonexistent/stockroom.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let result = StockroomConfig::parse("[server\nport = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = StockroomConfig::default();
        config.auth.token_ttl_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let mut config = StockroomConfig::default();
        config.server.host = " ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let mut config = StockroomConfig::default();
        config.auth.hash_parallelism = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_port_override() {
        let mut config = StockroomConfig::default();

        config.apply_port_override(None).expect("none");
        assert_eq!(config.server.port, 3000);

        config.apply_port_override(Some("")).expect("empty");
        assert_eq!(config.server.port, 3000);

        config.apply_port_override(Some("8081")).expect("override");
        assert_eq!(config.server.port, 8081);

        assert!(config.apply_port_override(Some("eighty")).is_err());
    }

    #[test]
    fn test_secret_env_wins_over_file() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("STOCKROOM_TEST_SECRET_ENV_WINS", "from-env");
        }

        let mut config = StockroomConfig::default();
        config.auth.secret_env = "STOCKROOM_TEST_SECRET_ENV_WINS".to_string();
        config.auth.secret = Some("from-file".to_string());

        assert_eq!(config.secret().expect("secret"), "from-env");
    }

    #[test]
    fn test_secret_falls_back_to_file() {
        let mut config = StockroomConfig::default();
        config.auth.secret_env = "STOCKROOM_TEST_SECRET_NEVER_SET".to_string();
        config.auth.secret = Some("from-file".to_string());

        assert_eq!(config.secret().expect("secret"), "from-file");
    }

    #[test]
    fn test_missing_secret() {
        let mut config = StockroomConfig::default();
        config.auth.secret_env = "STOCKROOM_TEST_SECRET_ALSO_NEVER_SET".to_string();

        assert!(matches!(config.secret(), Err(ConfigError::MissingSecret(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let mut config = StockroomConfig::default();
        config.auth.secret = Some("super-secret-value".to_string());

        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("[REDACTED]"));
    }
}
