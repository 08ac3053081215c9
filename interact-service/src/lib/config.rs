use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for interact-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub revocation: RevocationConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration. Both `secret` and `algorithm` are required.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: String,
    #[serde(default = "default_expiration_seconds")]
    pub expiration_seconds: i64,
}

/// Revoked token pruning.
#[derive(Debug, Deserialize, Clone)]
pub struct RevocationConfig {
    #[serde(default = "default_prune_interval_seconds")]
    pub prune_interval_seconds: u64,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            prune_interval_seconds: default_prune_interval_seconds(),
        }
    }
}

/// Chat-completion endpoint (OpenRouter compatible).
#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default)]
    pub site_url: String,
    #[serde(default = "default_site_name")]
    pub site_name: String,
    #[serde(default = "default_llm_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_seconds() -> i64 {
    auth::jwt::DEFAULT_TOKEN_LIFETIME_SECONDS
}

fn default_prune_interval_seconds() -> u64 {
    600
}

fn default_llm_model() -> String {
    "deepseek/deepseek-r1-zero:free".to_string()
}

fn default_site_name() -> String {
    "AI Interact".to_string()
}

fn default_llm_timeout_seconds() -> u64 {
    60
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Returns error if required values are missing or fail validation
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject configurations that would only fail at first use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".into()));
        }

        auth::JwtHandler::parse_algorithm(&self.jwt.algorithm)
            .map_err(|e| ConfigError::Message(format!("jwt.algorithm: {}", e)))?;

        if self.jwt.expiration_seconds <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_seconds must be positive".into(),
            ));
        }

        if self.revocation.prune_interval_seconds == 0 {
            return Err(ConfigError::Message(
                "revocation.prune_interval_seconds must be positive".into(),
            ));
        }

        if self.llm.api_url.trim().is_empty() {
            return Err(ConfigError::Message("llm.api_url must not be empty".into()));
        }

        Ok(())
    }
}
