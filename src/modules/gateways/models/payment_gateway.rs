use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A payment gateway row: display name, the settings record it is backed by,
/// and the identifier of the controller implementing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PaymentGateway {
    pub name: String,
    pub gateway_settings: String,
    pub gateway_controller: String,
}

impl PaymentGateway {
    pub fn new(
        name: impl Into<String>,
        gateway_settings: impl Into<String>,
        gateway_controller: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            gateway_settings: gateway_settings.into(),
            gateway_controller: gateway_controller.into(),
        }
    }
}
