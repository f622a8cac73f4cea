use crate::core::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Record name of the singleton settings row; also the controller identifier
/// stored against the Midtrans payment gateway.
pub const SETTINGS_NAME: &str = "Midtrans Settings";

/// Display name of the payment gateway backed by these settings
pub const GATEWAY_NAME: &str = "Midtrans";

/// Midtrans only settles in rupiah
pub const SUPPORTED_CURRENCIES: &[&str] = &["IDR"];

/// Midtrans credentials and environment switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MidtransSettings {
    #[serde(default)]
    pub midtrans_sandbox: bool,

    /// Secret Snap key, accepted on input but never echoed back
    #[serde(default, skip_serializing)]
    pub server_key: String,

    #[serde(default)]
    pub client_key: String,

    #[sqlx(default)]
    #[serde(default, skip_deserializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Save-time switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SettingsFlags {
    /// Skip the mandatory credential check, e.g. for a draft record
    #[serde(default)]
    pub ignore_mandatory: bool,
}

impl MidtransSettings {
    pub fn new(server_key: impl Into<String>, client_key: impl Into<String>, sandbox: bool) -> Self {
        Self {
            midtrans_sandbox: sandbox,
            server_key: server_key.into(),
            client_key: client_key.into(),
            updated_at: None,
        }
    }

    pub fn is_production(&self) -> bool {
        !self.midtrans_sandbox
    }

    pub fn supported_currencies() -> Vec<String> {
        SUPPORTED_CURRENCIES.iter().map(|c| c.to_string()).collect()
    }

    /// Exact, case-sensitive membership test against the supported set
    pub fn supports_currency(currency: &str) -> bool {
        SUPPORTED_CURRENCIES.contains(&currency)
    }

    /// Check the record before it is persisted
    pub fn validate(&self, flags: SettingsFlags) -> Result<()> {
        if flags.ignore_mandatory {
            return Ok(());
        }

        if self.server_key.trim().is_empty() {
            return Err(AppError::validation("Midtrans server key is required"));
        }

        if self.client_key.trim().is_empty() {
            return Err(AppError::validation("Midtrans client key is required"));
        }

        Ok(())
    }
}
