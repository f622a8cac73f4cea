use super::gateway_trait::GatewayController;
use super::snap::{SnapApi, SnapClient, SnapOptions, SnapTransaction, SnapTransactionRequest};
use crate::core::{AppError, Result};
use crate::modules::gateways::models::{MidtransSettings, PaymentDetails, GATEWAY_NAME};
use crate::modules::integrations::RequestLog;
use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;
use tracing::{info, warn};

/// Path of the checkout page, relative to the site URL
pub const CHECKOUT_PATH: &str = "payment_checkout";

/// Gateway controller for Midtrans Snap checkout
pub struct MidtransController {
    settings: MidtransSettings,
    snap: Arc<dyn SnapApi>,
    site_url: Url,
    request_log: Option<Arc<dyn RequestLog>>,
}

impl MidtransController {
    pub fn new(settings: MidtransSettings, snap: Arc<dyn SnapApi>, site_url: &str) -> Result<Self> {
        let site_url = Url::parse(site_url)
            .map_err(|e| AppError::configuration(format!("Invalid site URL: {}", e)))?;

        Ok(Self {
            settings,
            snap,
            site_url,
            request_log: None,
        })
    }

    /// Controller backed by a live Snap client for the settings' environment
    pub fn from_settings(
        settings: MidtransSettings,
        options: &SnapOptions,
        site_url: &str,
    ) -> Result<Self> {
        let snap = SnapClient::new(
            settings.server_key.clone(),
            settings.is_production(),
            options,
        )?;
        Self::new(settings, Arc::new(snap), site_url)
    }

    /// Record every Snap call in the integration request log.
    /// Log write failures are reported but never block the payment.
    pub fn with_request_log(mut self, request_log: Arc<dyn RequestLog>) -> Self {
        self.request_log = Some(request_log);
        self
    }

    pub fn settings(&self) -> &MidtransSettings {
        &self.settings
    }

    /// `{site}/payment_checkout?pay={token}&client={client_key}`
    pub fn checkout_url(&self, token: &str) -> Result<String> {
        let mut url = self
            .site_url
            .join(CHECKOUT_PATH)
            .map_err(|e| AppError::internal(format!("Failed to build checkout URL: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("pay", token)
            .append_pair("client", &self.settings.client_key);

        Ok(url.to_string())
    }

    async fn create_transaction(&self, request: &SnapTransactionRequest) -> Result<SnapTransaction> {
        let Some(log) = &self.request_log else {
            return self.snap.create_transaction(request).await;
        };

        let order_id = &request.transaction_details.order_id;
        let log_id = match log
            .create_queued(GATEWAY_NAME, order_id, &serde_json::to_value(request)?)
            .await
        {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(order_id = %order_id, error = %e, "Failed to queue Snap request log");
                None
            }
        };

        let result = self.snap.create_transaction(request).await;

        let Some(log_id) = log_id else {
            return result;
        };

        match &result {
            Ok(transaction) => {
                let output = serde_json::to_value(transaction).unwrap_or_default();
                if let Err(log_err) = log.mark_completed(&log_id, &output).await {
                    warn!(
                        order_id = %order_id,
                        error = %log_err,
                        "Failed to record Snap response"
                    );
                }
            }
            Err(e) => {
                if let Err(log_err) = log.mark_failed(&log_id, &e.to_string()).await {
                    warn!(
                        order_id = %order_id,
                        error = %log_err,
                        "Failed to record Snap failure"
                    );
                }
            }
        }

        result
    }
}

#[async_trait]
impl GatewayController for MidtransController {
    fn name(&self) -> &str {
        GATEWAY_NAME
    }

    fn supported_currencies(&self) -> Vec<String> {
        MidtransSettings::supported_currencies()
    }

    fn validate_transaction_currency(&self, currency: &str) -> Result<()> {
        if !MidtransSettings::supports_currency(currency) {
            return Err(AppError::validation(format!(
                "Please select another payment method. Midtrans does not support transactions in currency '{}'",
                currency
            )));
        }
        Ok(())
    }

    async fn get_payment_url(&self, details: &PaymentDetails) -> Result<String> {
        let request = SnapTransactionRequest::new(&details.order_id, details.amount)?;
        let transaction = self.create_transaction(&request).await?;

        info!(
            order_id = %request.transaction_details.order_id,
            production = self.settings.is_production(),
            "Snap transaction created"
        );

        self.checkout_url(&transaction.token)
    }
}
