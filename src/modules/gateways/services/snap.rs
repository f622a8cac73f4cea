use crate::core::{AppError, Result};
use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const SANDBOX_SNAP_URL: &str = "https://app.sandbox.midtrans.com/snap/v1";
const PRODUCTION_SNAP_URL: &str = "https://app.midtrans.com/snap/v1";
const SANDBOX_SNAP_JS: &str = "https://app.sandbox.midtrans.com/snap/snap.js";
const PRODUCTION_SNAP_JS: &str = "https://app.midtrans.com/snap/snap.js";

/// Midtrans caps `order_id` at 50 characters
const MAX_ORDER_ID_LEN: usize = 50;

/// Snap transaction creation, the one vendor call the checkout needs
#[async_trait]
pub trait SnapApi: Send + Sync {
    async fn create_transaction(&self, request: &SnapTransactionRequest)
        -> Result<SnapTransaction>;
}

/// Body of `POST /transactions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapTransactionRequest {
    pub transaction_details: TransactionDetails,
    pub credit_card: CreditCard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetails {
    pub order_id: String,
    /// Whole rupiah
    pub gross_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    /// Force 3-D Secure on card payments
    pub secure: bool,
}

/// Snap's answer: the token for the popup and its hosted redirect page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapTransaction {
    pub token: String,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SnapErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
}

impl SnapTransactionRequest {
    /// Build a 3-D Secure transaction request. IDR has no minor unit, so the
    /// amount is rounded half away from zero to whole rupiah.
    pub fn new(order_id: &str, amount: Decimal) -> Result<Self> {
        let order_id = order_id.trim();
        if order_id.is_empty() {
            return Err(AppError::validation("Order ID is required"));
        }
        if order_id.chars().count() > MAX_ORDER_ID_LEN {
            return Err(AppError::validation(format!(
                "Order ID must be at most {} characters",
                MAX_ORDER_ID_LEN
            )));
        }

        let gross_amount = amount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or_else(|| AppError::validation(format!("Amount {} is out of range", amount)))?;
        if gross_amount <= 0 {
            return Err(AppError::validation(
                "Payment amount must be greater than zero",
            ));
        }

        Ok(Self {
            transaction_details: TransactionDetails {
                order_id: order_id.to_string(),
                gross_amount,
            },
            credit_card: CreditCard { secure: true },
        })
    }
}

/// Transport tuning for [`SnapClient`]
#[derive(Debug, Clone)]
pub struct SnapOptions {
    /// Overrides the sandbox/production Snap base URL, e.g. for a local stub
    pub base_url: Option<String>,
    /// Retries on transient failures (connect errors, 5xx, 429)
    pub max_retries: u32,
    pub timeout: Duration,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            max_retries: 2,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Snap.js host matching the environment
pub fn snap_js_url(is_production: bool) -> &'static str {
    if is_production {
        PRODUCTION_SNAP_JS
    } else {
        SANDBOX_SNAP_JS
    }
}

/// Midtrans Snap API client
///
/// API Documentation: https://docs.midtrans.com/reference/backend-integration
pub struct SnapClient {
    client: ClientWithMiddleware,
    server_key: String,
    is_production: bool,
    base_url: String,
}

impl SnapClient {
    pub fn new(server_key: String, is_production: bool, options: &SnapOptions) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(options.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        let base_url = options
            .base_url
            .clone()
            .unwrap_or_else(|| {
                if is_production {
                    PRODUCTION_SNAP_URL.to_string()
                } else {
                    SANDBOX_SNAP_URL.to_string()
                }
            })
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            server_key,
            is_production,
            base_url,
        })
    }

    pub fn is_production(&self) -> bool {
        self.is_production
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SnapApi for SnapClient {
    async fn create_transaction(
        &self,
        request: &SnapTransactionRequest,
    ) -> Result<SnapTransaction> {
        let url = format!("{}/transactions", self.base_url);
        let body = serde_json::to_vec(request)?;

        debug!(
            order_id = %request.transaction_details.order_id,
            gross_amount = request.transaction_details.gross_amount,
            production = self.is_production,
            "Creating Snap transaction"
        );

        // Server key as Basic auth user, empty password
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.server_key, Some(""))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| match e {
                reqwest_middleware::Error::Reqwest(e) if e.is_connect() || e.is_timeout() => {
                    AppError::gateway(format!(
                        "Midtrans gateway unavailable: {} ({})",
                        if e.is_timeout() {
                            "timeout"
                        } else {
                            "connection failed"
                        },
                        e
                    ))
                }
                other => AppError::gateway(format!("Midtrans API request failed: {}", other)),
            })?;

        let status_code = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|e| AppError::gateway(format!("Failed to read Midtrans response: {}", e)))?;

        if !status_code.is_success() {
            let detail = serde_json::from_str::<SnapErrorBody>(&response_body)
                .ok()
                .filter(|body| !body.error_messages.is_empty())
                .map(|body| body.error_messages.join("; "))
                .unwrap_or(response_body);
            warn!(
                order_id = %request.transaction_details.order_id,
                status = status_code.as_u16(),
                "Snap rejected transaction"
            );
            return Err(AppError::gateway(format!(
                "Midtrans API error - HTTP {} ({})",
                status_code.as_u16(),
                detail
            )));
        }

        let transaction: SnapTransaction = serde_json::from_str(&response_body)
            .map_err(|e| AppError::gateway(format!("Failed to parse Midtrans response: {}", e)))?;

        if transaction.token.is_empty() {
            return Err(AppError::gateway("Midtrans returned an empty Snap token"));
        }

        Ok(transaction)
    }
}
