use std::env;

use auth::TokenConfig;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use thiserror::Error;

/// Secret shipped in `config/development.toml`; refused when running in production.
pub const DEVELOPMENT_SECRET: &str = "development-only-secret-do-not-use-in-production";

const PRODUCTION_RUN_MODE: &str = "production";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: Option<String>,
    #[serde(default = "default_access_token_ttl_hours")]
    pub access_token_ttl_hours: i64,
}

fn default_access_token_ttl_hours() -> i64 {
    auth::token::DEFAULT_ACCESS_TOKEN_TTL_HOURS
}

/// Fatal startup errors. The server must not accept traffic after any of these.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("JWT signing secret is not configured (set JWT__SECRET)")]
    MissingSecret,

    #[error("The development JWT secret must not be used in production")]
    DevelopmentSecretInProduction,

    #[error("Access token lifetime must be positive, got {0} hours")]
    InvalidAccessTokenTtl(i64),
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigurationError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate(&run_mode)?;

        Ok(config)
    }

    /// Check invariants that deserialization alone cannot express.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret absent or blank
    /// * `DevelopmentSecretInProduction` - Development fallback used with RUN_MODE=production
    /// * `InvalidAccessTokenTtl` - Non-positive access token lifetime
    pub fn validate(&self, run_mode: &str) -> Result<(), ConfigurationError> {
        let secret = self
            .jwt
            .secret
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigurationError::MissingSecret)?;

        if run_mode == PRODUCTION_RUN_MODE && secret == DEVELOPMENT_SECRET {
            return Err(ConfigurationError::DevelopmentSecretInProduction);
        }

        if self.jwt.access_token_ttl_hours <= 0 {
            return Err(ConfigurationError::InvalidAccessTokenTtl(
                self.jwt.access_token_ttl_hours,
            ));
        }

        Ok(())
    }

    /// Signing configuration for the token service.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret absent or blank
    pub fn token_config(&self) -> Result<TokenConfig, ConfigurationError> {
        let secret = self
            .jwt
            .secret
            .clone()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigurationError::MissingSecret)?;

        Ok(TokenConfig::new(secret)
            .with_access_token_ttl(Duration::hours(self.jwt.access_token_ttl_hours)))
    }
}
