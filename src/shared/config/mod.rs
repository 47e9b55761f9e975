//! Application configuration module
//!
//! Everything the server needs at startup: where the database lives, the
//! token signing secret and lifetime, the Authorization scheme keyword and
//! the password hashing cost. Values come from the environment (a `.env`
//! file is loaded by the binary) or from a TOML file named by
//! `PROFILES_CONFIG`.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://profiles.db";
/// Tokens live for two hours unless configured otherwise
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 2 * 60 * 60;
/// Upper bound on the token lifetime: one year
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;
pub const DEFAULT_BEARER_KEYWORD: &str = "Bearer";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Environment variable naming a TOML configuration file
pub const CONFIG_FILE_ENV: &str = "PROFILES_CONFIG";

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// sqlx connection string, e.g. `sqlite://profiles.db` or `sqlite::memory:`
    pub database_url: String,
    /// HS256 signing secret for issued tokens
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: i64,
    /// Scheme keyword expected in the Authorization header
    pub bearer_keyword: String,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    pub host: String,
    pub port: u16,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("bearer_keyword", &self.bearer_keyword)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load from the TOML file named by `PROFILES_CONFIG`, or from the
    /// environment when that variable is unset
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::from_toml_file(path),
            Err(_) => Self::from_env(),
        }
    }

    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    ///
    /// Keys are the environment variable names: `DATABASE_URL`, `JWT_SECRET`,
    /// `TOKEN_TTL_SECS`, `AUTH_KEYWORD`, `BCRYPT_COST`, `SERVER_HOST`,
    /// `SERVER_PORT`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(ttl) = lookup("TOKEN_TTL_SECS") {
            builder = builder.token_ttl_secs(parse_value("TOKEN_TTL_SECS", &ttl)?);
        }
        if let Some(keyword) = lookup("AUTH_KEYWORD") {
            builder = builder.bearer_keyword(keyword);
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_value("BCRYPT_COST", &cost)?);
        }
        if let Some(host) = lookup("SERVER_HOST") {
            builder = builder.host(host);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            builder = builder.port(parse_value("SERVER_PORT", &port)?);
        }

        builder.build()
    }

    /// Read configuration from a TOML file
    ///
    /// ```toml
    /// database_url = "sqlite://profiles.db"
    /// jwt_secret = "change-me"
    /// token_ttl_secs = 7200
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(contents)?;

        let mut builder = Self::builder();
        if let Some(url) = file.database_url {
            builder = builder.database_url(url);
        }
        if let Some(secret) = file.jwt_secret {
            builder = builder.jwt_secret(secret);
        }
        if let Some(ttl) = file.token_ttl_secs {
            builder = builder.token_ttl_secs(ttl);
        }
        if let Some(keyword) = file.bearer_keyword {
            builder = builder.bearer_keyword(keyword);
        }
        if let Some(cost) = file.bcrypt_cost {
            builder = builder.bcrypt_cost(cost);
        }
        if let Some(host) = file.host {
            builder = builder.host(host);
        }
        if let Some(port) = file.port {
            builder = builder.port(port);
        }
        builder.build()
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    database_url: Option<String>,
    jwt_secret: Option<String>,
    token_ttl_secs: Option<i64>,
    bearer_keyword: Option<String>,
    bcrypt_cost: Option<u32>,
    host: Option<String>,
    port: Option<u16>,
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    jwt_secret: Option<String>,
    token_ttl_secs: Option<i64>,
    bearer_keyword: Option<String>,
    bcrypt_cost: Option<u32>,
    host: Option<String>,
    port: Option<u16>,
}

impl AppConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn token_ttl_secs(mut self, secs: i64) -> Self {
        self.token_ttl_secs = Some(secs);
        self
    }

    pub fn bearer_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.bearer_keyword = Some(keyword.into());
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let jwt_secret = self
            .jwt_secret
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingValue("JWT_SECRET"))?;

        let token_ttl_secs = self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&token_ttl_secs) {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_TTL_SECS",
                value: token_ttl_secs.to_string(),
            });
        }

        let bcrypt_cost = self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST);
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let bearer_keyword = self
            .bearer_keyword
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BEARER_KEYWORD.to_string());

        Ok(AppConfig {
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            token_ttl_secs,
            bearer_keyword,
            bcrypt_cost,
            host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}
