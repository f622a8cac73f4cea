use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{error, info};

use super::gateway_trait::{GatewayController, GatewayInfo};
use crate::core::{AppError, Result};
use crate::modules::gateways::models::PaymentDetails;

/// Registry of gateway controllers, keyed by gateway name
pub struct GatewayService {
    controllers: RwLock<HashMap<String, Arc<dyn GatewayController>>>,
}

impl GatewayService {
    pub fn new() -> Self {
        Self {
            controllers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a controller, replacing any previous one under the same name
    pub fn register(&self, controller: Arc<dyn GatewayController>) -> Result<()> {
        let name = controller.name().to_string();
        self.controllers
            .write()
            .map_err(|_| AppError::internal("Gateway registry lock poisoned"))?
            .insert(name.clone(), controller);

        info!(gateway = %name, "Gateway controller registered");
        Ok(())
    }

    /// Remove a gateway's controller; a no-op when none is registered
    pub fn unregister(&self, name: &str) -> Result<()> {
        let removed = self
            .controllers
            .write()
            .map_err(|_| AppError::internal("Gateway registry lock poisoned"))?
            .remove(name);

        if removed.is_some() {
            info!(gateway = %name, "Gateway controller unregistered");
        }
        Ok(())
    }

    /// Get the controller for a gateway by name
    pub fn get_payment_gateway_controller(&self, name: &str) -> Result<Arc<dyn GatewayController>> {
        self.controllers
            .read()
            .map_err(|_| AppError::internal("Gateway registry lock poisoned"))?
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Gateway '{}' not found", name)))
    }

    pub fn validate_transaction_currency(&self, gateway_name: &str, currency: &str) -> Result<()> {
        let controller = self.get_payment_gateway_controller(gateway_name)?;
        controller.validate_transaction_currency(currency)
    }

    /// Build the payer redirect URL with the named gateway.
    ///
    /// A currency present on the details is validated before the provider is called.
    pub async fn get_payment_url(&self, gateway_name: &str, details: &PaymentDetails) -> Result<String> {
        info!(
            gateway = %gateway_name,
            order_id = %details.order_id,
            amount = %details.amount,
            "Building payment URL"
        );

        let controller = self.get_payment_gateway_controller(gateway_name)?;
        if let Some(currency) = &details.currency {
            controller.validate_transaction_currency(currency)?;
        }

        match controller.get_payment_url(details).await {
            Ok(url) => Ok(url),
            Err(e) => {
                error!(
                    gateway = %gateway_name,
                    order_id = %details.order_id,
                    error = %e,
                    "Failed to build payment URL"
                );
                Err(e)
            }
        }
    }

    /// List all registered gateways, sorted by name
    pub fn list_gateways(&self) -> Result<Vec<GatewayInfo>> {
        let mut gateways: Vec<GatewayInfo> = self
            .controllers
            .read()
            .map_err(|_| AppError::internal("Gateway registry lock poisoned"))?
            .values()
            .map(|controller| GatewayInfo {
                name: controller.name().to_string(),
                supported_currencies: controller.supported_currencies(),
            })
            .collect();
        gateways.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(gateways)
    }
}

impl Default for GatewayService {
    fn default() -> Self {
        Self::new()
    }
}
