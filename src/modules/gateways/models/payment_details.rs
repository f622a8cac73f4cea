use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Arguments accepted when building a payment URL.
///
/// Only `order_id` and `amount` reach Snap. The remaining fields are part of
/// the shared gateway contract and are carried along for other controllers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub order_id: String,
    pub amount: Decimal,

    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reference_doctype: Option<String>,
    #[serde(default)]
    pub reference_docname: Option<String>,
    #[serde(default)]
    pub payer_email: Option<String>,
    #[serde(default)]
    pub payer_name: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub payment_gateway: Option<String>,
    #[serde(default)]
    pub subscription_details: Option<SubscriptionDetails>,
}

/// Recurring-billing hints. Midtrans Snap checkout ignores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionDetails {
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub billing_period: Option<String>,
    #[serde(default)]
    pub billing_frequency: Option<u32>,
    #[serde(default)]
    pub customer_notify: Option<u8>,
    #[serde(default)]
    pub upfront_amount: Option<Decimal>,
}

impl PaymentDetails {
    pub fn new(order_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            order_id: order_id.into(),
            amount,
            title: None,
            description: None,
            reference_doctype: None,
            reference_docname: None,
            payer_email: None,
            payer_name: None,
            currency: None,
            payment_gateway: None,
            subscription_details: None,
        }
    }
}
