use async_trait::async_trait;

use crate::modules::integrations::repositories::IntegrationRequestRepository;
use crate::core::Result;

/// Sink for outbound provider calls: queued before the call, then completed or failed
#[async_trait]
pub trait RequestLog: Send + Sync {
    /// Returns the id of the new log entry
    async fn create_queued(
        &self,
        service: &str,
        reference_id: &str,
        request_data: &serde_json::Value,
    ) -> Result<String>;

    async fn mark_completed(&self, id: &str, output: &serde_json::Value) -> Result<()>;

    async fn mark_failed(&self, id: &str, error: &str) -> Result<()>;
}

#[async_trait]
impl RequestLog for IntegrationRequestRepository {
    async fn create_queued(
        &self,
        service: &str,
        reference_id: &str,
        request_data: &serde_json::Value,
    ) -> Result<String> {
        IntegrationRequestRepository::create_queued(self, service, reference_id, request_data).await
    }

    async fn mark_completed(&self, id: &str, output: &serde_json::Value) -> Result<()> {
        IntegrationRequestRepository::mark_completed(self, id, output).await
    }

    async fn mark_failed(&self, id: &str, error: &str) -> Result<()> {
        IntegrationRequestRepository::mark_failed(self, id, error).await
    }
}
