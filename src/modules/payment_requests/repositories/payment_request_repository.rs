use super::super::models::PaymentRequest;
use crate::core::Result;
use sqlx::MySqlPool;

#[derive(Clone)]
pub struct PaymentRequestRepository {
    pool: MySqlPool,
}

impl PaymentRequestRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<PaymentRequest>> {
        let request = sqlx::query_as::<_, PaymentRequest>(
            r#"
            SELECT name, payment_gateway, reference_doctype, reference_name,
                   grand_total, currency, status
            FROM payment_requests
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn create(&self, request: &PaymentRequest) -> Result<PaymentRequest> {
        sqlx::query(
            r#"
            INSERT INTO payment_requests (
                name, payment_gateway, reference_doctype, reference_name,
                grand_total, currency, status
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.name)
        .bind(&request.payment_gateway)
        .bind(&request.reference_doctype)
        .bind(&request.reference_name)
        .bind(request.grand_total)
        .bind(&request.currency)
        .bind(&request.status)
        .execute(&self.pool)
        .await?;

        Ok(request.clone())
    }
}
