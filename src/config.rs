//! Configuration module for corkboard.

use serde::Deserialize;
use std::path::Path;

use crate::board::ReplyPolicy;
use crate::{BoardError, Result};

/// Environment variable that overrides `auth.jwt_secret`.
pub const JWT_SECRET_ENV: &str = "CORKBOARD_JWT_SECRET";

/// Longest accepted token lifetime (ten years).
pub const MAX_TOKEN_EXPIRY_SECS: u64 = 10 * 365 * 86_400;

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/corkboard.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty disables file logging.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/corkboard.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign bearer tokens.
    #[serde(default)]
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,
    /// Login attempts allowed per client IP per minute.
    #[serde(default = "default_login_rate_limit")]
    pub login_rate_limit: u32,
}

fn default_token_expiry() -> u64 {
    86_400 // 24 hours
}

fn default_login_rate_limit() -> u32 {
    10
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_expiry_secs: default_token_expiry(),
            login_rate_limit: default_login_rate_limit(),
        }
    }
}

/// Web layer configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WebConfig {
    /// CORS allowed origins. Empty allows any origin without credentials.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Take the client IP from `X-Forwarded-For` / `X-Real-IP`.
    ///
    /// Only enable behind a reverse proxy that sets these headers, otherwise
    /// clients can pick their own rate limit key.
    #[serde(default)]
    pub trust_proxy: bool,
}

/// Board behaviour configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Page size used when the client does not send one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Upper bound for client-supplied page sizes.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    /// Whether post search matches case-sensitively. Insensitive matching
    /// uses full Unicode lowercasing.
    #[serde(default = "default_search_case_sensitive")]
    pub search_case_sensitive: bool,
    /// What happens to replies when their parent comment is deleted.
    #[serde(default)]
    pub reply_policy: ReplyPolicy,
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

fn default_search_case_sensitive() -> bool {
    true
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            search_case_sensitive: default_search_case_sensitive(),
            reply_policy: ReplyPolicy::default(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Web layer configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Board behaviour configuration.
    #[serde(default)]
    pub board: BoardConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BoardError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BoardError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CORKBOARD_JWT_SECRET`: Override the token signing secret
    pub fn apply_env_overrides(&mut self) {
        if let Ok(jwt_secret) = std::env::var(JWT_SECRET_ENV) {
            if !jwt_secret.is_empty() {
                self.auth.jwt_secret = jwt_secret;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(BoardError::Config(format!(
                "jwt_secret is not set. Set it in config.toml or via {JWT_SECRET_ENV}."
            )));
        }
        if self.auth.token_expiry_secs == 0 || self.auth.token_expiry_secs > MAX_TOKEN_EXPIRY_SECS
        {
            return Err(BoardError::Config(format!(
                "token_expiry_secs must be between 1 and {MAX_TOKEN_EXPIRY_SECS}"
            )));
        }
        if self.board.max_page_size == 0 {
            return Err(BoardError::Config(
                "max_page_size must be greater than zero".to_string(),
            ));
        }
        if self.board.default_page_size == 0
            || self.board.default_page_size > self.board.max_page_size
        {
            return Err(BoardError::Config(format!(
                "default_page_size must be between 1 and {}",
                self.board.max_page_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.auth.jwt_secret = "secret".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "data/corkboard.db");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/corkboard.log");
        assert!(config.auth.jwt_secret.is_empty());
        assert_eq!(config.auth.token_expiry_secs, 86_400);
        assert_eq!(config.auth.login_rate_limit, 10);
        assert!(config.web.cors_origins.is_empty());
        assert!(!config.web.trust_proxy);
        assert_eq!(config.board.default_page_size, 10);
        assert_eq!(config.board.max_page_size, 100);
        assert!(config.board.search_case_sensitive);
        assert_eq!(config.board.reply_policy, ReplyPolicy::Detach);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 3000

[database]
path = "custom/board.sqlite"

[logging]
level = "debug"
file = ""

[auth]
jwt_secret = "test-secret-key"
token_expiry_secs = 600
login_rate_limit = 3

[web]
cors_origins = ["http://localhost:3000"]
trust_proxy = true

[board]
default_page_size = 20
max_page_size = 50
search_case_sensitive = false
reply_policy = "cascade"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.path, "custom/board.sqlite");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.file.is_empty());
        assert_eq!(config.auth.jwt_secret, "test-secret-key");
        assert_eq!(config.auth.token_expiry_secs, 600);
        assert_eq!(config.auth.login_rate_limit, 3);
        assert_eq!(config.web.cors_origins, vec!["http://localhost:3000"]);
        assert!(config.web.trust_proxy);
        assert_eq!(config.board.default_page_size, 20);
        assert_eq!(config.board.max_page_size, 50);
        assert!(!config.board.search_case_sensitive);
        assert_eq!(config.board.reply_policy, ReplyPolicy::Cascade);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.board.reply_policy, ReplyPolicy::Detach);
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");
        match result {
            Err(BoardError::Config(msg)) => assert!(msg.contains("config parse error")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_unknown_reply_policy() {
        let result = Config::parse("[board]\nreply_policy = \"shred\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(BoardError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9090\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_apply_env_overrides() {
        let original = std::env::var(JWT_SECRET_ENV).ok();

        std::env::set_var(JWT_SECRET_ENV, "env-secret-key");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.auth.jwt_secret, "env-secret-key");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[auth]\njwt_secret = \"file-secret\"\n").unwrap();
        let config = Config::load_with_env(&path).unwrap();
        assert_eq!(config.auth.jwt_secret, "env-secret-key");

        std::env::set_var(JWT_SECRET_ENV, "");
        let mut config = Config::default();
        config.auth.jwt_secret = "original-secret".to_string();
        config.apply_env_overrides();
        assert_eq!(config.auth.jwt_secret, "original-secret");
        let config = Config::load_with_env(&path).unwrap();
        assert_eq!(config.auth.jwt_secret, "file-secret");

        match original {
            Some(val) => std::env::set_var(JWT_SECRET_ENV, val),
            None => std::env::remove_var(JWT_SECRET_ENV),
        }
    }

    #[test]
    fn test_validate_requires_secret() {
        let config = Config::default();
        match config.validate() {
            Err(BoardError::Config(msg)) => assert!(msg.contains("jwt_secret")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_page_sizes() {
        assert!(valid_config().validate().is_ok());

        let mut config = valid_config();
        config.board.default_page_size = 200;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.board.max_page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_token_expiry_bounds() {
        let mut config = valid_config();
        config.auth.token_expiry_secs = MAX_TOKEN_EXPIRY_SECS;
        assert!(config.validate().is_ok());

        for expiry in [0, MAX_TOKEN_EXPIRY_SECS + 1, u64::MAX] {
            config.auth.token_expiry_secs = expiry;
            match config.validate() {
                Err(BoardError::Config(msg)) => assert!(msg.contains("token_expiry_secs")),
                other => panic!("Expected Config error for {expiry}, got {other:?}"),
            }
        }
    }
}
