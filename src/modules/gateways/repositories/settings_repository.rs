use crate::core::Result;
use crate::modules::gateways::models::{MidtransSettings, SETTINGS_NAME};
use sqlx::MySqlPool;

/// Storage for the singleton Midtrans settings row
#[derive(Clone)]
pub struct SettingsRepository {
    pool: MySqlPool,
}

impl SettingsRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self) -> Result<Option<MidtransSettings>> {
        let settings = sqlx::query_as::<_, MidtransSettings>(
            r#"
            SELECT midtrans_sandbox, server_key, client_key, updated_at
            FROM midtrans_settings
            WHERE name = ?
            "#,
        )
        .bind(SETTINGS_NAME)
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings)
    }

    /// Insert or overwrite the settings row. Callers validate first.
    pub async fn save(&self, settings: &MidtransSettings) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO midtrans_settings (name, midtrans_sandbox, server_key, client_key)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                midtrans_sandbox = VALUES(midtrans_sandbox),
                server_key = VALUES(server_key),
                client_key = VALUES(client_key)
            "#,
        )
        .bind(SETTINGS_NAME)
        .bind(settings.midtrans_sandbox)
        .bind(&settings.server_key)
        .bind(&settings.client_key)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
