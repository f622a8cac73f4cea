use crate::core::{AppError, Result};
use crate::modules::gateways::SnapOptions;
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub midtrans: MidtransConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// `json` switches the subscriber to the JSON formatter
    pub log_format: String,
    /// Public base URL the checkout page is served under
    pub site_url: String,
}

/// Bootstrap values for the Midtrans settings record and the Snap client
#[derive(Debug, Clone, Deserialize)]
pub struct MidtransConfig {
    pub server_key: Option<String>,
    pub client_key: Option<String>,
    pub sandbox: bool,
    pub snap_base_url: Option<String>,
    pub max_retries: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Argon2 PHC hash of the operator API key (`midtrans-gateway hash-api-key <key>`)
    pub api_key_hash: String,
}

impl MidtransConfig {
    pub fn from_env() -> Result<Self> {
        Ok(MidtransConfig {
            server_key: non_empty_var("MIDTRANS_SERVER_KEY"),
            client_key: non_empty_var("MIDTRANS_CLIENT_KEY"),
            sandbox: env::var("MIDTRANS_SANDBOX")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .map_err(|_| AppError::Configuration("Invalid MIDTRANS_SANDBOX".to_string()))?,
            snap_base_url: non_empty_var("MIDTRANS_SNAP_BASE_URL"),
            max_retries: env::var("MIDTRANS_MAX_RETRIES")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid MIDTRANS_MAX_RETRIES".to_string())
                })?,
            timeout_secs: env::var("MIDTRANS_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid MIDTRANS_TIMEOUT_SECS".to_string())
                })?,
        })
    }

    /// Keys to seed the settings record with, when both are present
    pub fn bootstrap_keys(&self) -> Option<(&str, &str)> {
        match (&self.server_key, &self.client_key) {
            (Some(server_key), Some(client_key)) => Some((server_key, client_key)),
            _ => None,
        }
    }

    pub fn snap_options(&self) -> SnapOptions {
        SnapOptions {
            base_url: self.snap_base_url.clone(),
            max_retries: self.max_retries,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
                site_url: env::var("SITE_URL")
                    .map_err(|_| AppError::Configuration("SITE_URL not set".to_string()))?,
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            midtrans: MidtransConfig::from_env()?,
            security: SecurityConfig {
                api_key_hash: env::var("API_KEY_HASH")
                    .map_err(|_| AppError::Configuration("API_KEY_HASH not set".to_string()))?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let site_url = reqwest::Url::parse(&self.app.site_url)
            .map_err(|e| AppError::Configuration(format!("Invalid SITE_URL: {}", e)))?;
        if !matches!(site_url.scheme(), "http" | "https") {
            return Err(AppError::Configuration(
                "SITE_URL must be an http(s) URL".to_string(),
            ));
        }

        if let Some(base_url) = &self.midtrans.snap_base_url {
            reqwest::Url::parse(base_url).map_err(|e| {
                AppError::Configuration(format!("Invalid MIDTRANS_SNAP_BASE_URL: {}", e))
            })?;
        }

        if self.midtrans.server_key.is_some() != self.midtrans.client_key.is_some() {
            return Err(AppError::Configuration(
                "MIDTRANS_SERVER_KEY and MIDTRANS_CLIENT_KEY must be set together".to_string(),
            ));
        }

        if self.midtrans.max_retries > 10 {
            return Err(AppError::Configuration(
                "MIDTRANS_MAX_RETRIES must be at most 10".to_string(),
            ));
        }

        if self.midtrans.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "MIDTRANS_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        argon2::PasswordHash::new(&self.security.api_key_hash)
            .map_err(|e| AppError::Configuration(format!("Invalid API_KEY_HASH: {}", e)))?;

        Ok(())
    }

    pub fn log_as_json(&self) -> bool {
        self.app.log_format.eq_ignore_ascii_case("json")
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
