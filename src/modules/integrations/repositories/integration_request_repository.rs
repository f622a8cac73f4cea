use super::super::models::{IntegrationRequest, RequestStatus};
use crate::core::Result;
use sqlx::MySqlPool;
use uuid::Uuid;

/// Persistence for the outbound request log
#[derive(Clone)]
pub struct IntegrationRequestRepository {
    pool: MySqlPool,
}

impl IntegrationRequestRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Record a call about to be made; returns the log entry id
    pub async fn create_queued(
        &self,
        service: &str,
        reference_id: &str,
        request_data: &serde_json::Value,
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO integration_requests (id, service, reference_id, request_data, status)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(service)
        .bind(reference_id)
        .bind(serde_json::to_string(request_data)?)
        .bind(RequestStatus::Queued.as_str())
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn mark_completed(&self, id: &str, output: &serde_json::Value) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE integration_requests
            SET status = ?, output = ?, error = NULL
            WHERE id = ?
            "#,
        )
        .bind(RequestStatus::Completed.as_str())
        .bind(serde_json::to_string(output)?)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn mark_failed(&self, id: &str, error: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE integration_requests
            SET status = ?, error = ?
            WHERE id = ?
            "#,
        )
        .bind(RequestStatus::Failed.as_str())
        .bind(error)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Log entries for an order, newest first
    pub async fn list_by_reference(&self, reference_id: &str) -> Result<Vec<IntegrationRequest>> {
        let requests = sqlx::query_as::<_, IntegrationRequest>(
            r#"
            SELECT id, service, reference_id, request_data, output, error, status, created_at
            FROM integration_requests
            WHERE reference_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(reference_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }
}
