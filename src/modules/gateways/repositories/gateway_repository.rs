use crate::core::Result;
use crate::modules::gateways::models::PaymentGateway;
use sqlx::MySqlPool;

/// Payment gateway rows
#[derive(Clone)]
pub struct GatewayRepository {
    pool: MySqlPool,
}

impl GatewayRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Single-column lookup of a gateway's controller identifier
    pub async fn get_gateway_controller(&self, name: &str) -> Result<Option<String>> {
        let controller = sqlx::query_scalar::<_, String>(
            r#"
            SELECT gateway_controller
            FROM payment_gateways
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(controller)
    }

    /// Create the gateway row, or point an existing one at new settings
    pub async fn upsert(&self, gateway: &PaymentGateway) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payment_gateways (name, gateway_settings, gateway_controller)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE
                gateway_settings = VALUES(gateway_settings),
                gateway_controller = VALUES(gateway_controller)
            "#,
        )
        .bind(&gateway.name)
        .bind(&gateway.gateway_settings)
        .bind(&gateway.gateway_controller)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
