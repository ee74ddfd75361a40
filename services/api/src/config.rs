//! Process-level settings for the API binary

use auth::IdentifierKind;
use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Deployment flavour; production turns on `Secure` cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Development,
    Production,
}

/// Settings read from `APP_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[serde(rename = "environment")]
    pub run_mode: RunMode,
    pub identifier: IdentifierKind,
}

impl AppConfig {
    /// Build the configuration from the environment
    ///
    /// # Environment Variables
    /// - `APP_HOST`: bind address (default: 0.0.0.0)
    /// - `APP_PORT`: bind port (default: 3001)
    /// - `APP_ENVIRONMENT`: `development` or `production` (default: development)
    /// - `APP_IDENTIFIER`: `email` or `username` (default: email)
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3001)?
            .set_default("environment", "development")?
            .set_default("identifier", "email")?
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn secure_cookies(&self) -> bool {
        self.run_mode == RunMode::Production
    }
}
