use crate::core::Result;
use crate::modules::gateways::models::PaymentDetails;
use async_trait::async_trait;
use serde::Serialize;

/// Integration contract every payment provider controller implements
#[async_trait]
pub trait GatewayController: Send + Sync {
    /// Gateway display name the controller is registered under
    fn name(&self) -> &str;

    /// Currencies the provider settles in
    fn supported_currencies(&self) -> Vec<String>;

    /// Reject a currency the provider cannot settle, with a payer-facing message
    fn validate_transaction_currency(&self, currency: &str) -> Result<()>;

    /// Create the provider-side transaction and return the URL to redirect the payer to
    async fn get_payment_url(&self, details: &PaymentDetails) -> Result<String>;
}

/// Gateway information for listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayInfo {
    pub name: String,
    pub supported_currencies: Vec<String>,
}
