use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A request for payment raised against a host document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PaymentRequest {
    pub name: String,
    pub payment_gateway: String,
    pub reference_doctype: String,
    pub reference_name: String,
    pub grand_total: Decimal,
    pub currency: String,
    pub status: String,
}
