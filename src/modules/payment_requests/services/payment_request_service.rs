use super::super::repositories::PaymentRequestRepository;
use crate::core::{AppError, Result};
use crate::modules::gateways::GatewayRepository;
use tracing::debug;

/// Resolves which gateway controller handles a payment request
#[derive(Clone)]
pub struct PaymentRequestService {
    requests: PaymentRequestRepository,
    gateways: GatewayRepository,
}

impl PaymentRequestService {
    pub fn new(requests: PaymentRequestRepository, gateways: GatewayRepository) -> Self {
        Self { requests, gateways }
    }

    /// Payment request -> its payment gateway -> that gateway's controller
    pub async fn get_gateway_controller(&self, payment_request: &str) -> Result<String> {
        let request = self
            .requests
            .find_by_name(payment_request)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Payment Request {}", payment_request)))?;

        let controller = self
            .gateways
            .get_gateway_controller(&request.payment_gateway)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Payment Gateway {}", request.payment_gateway))
            })?;

        debug!(
            payment_request = %payment_request,
            gateway = %request.payment_gateway,
            controller = %controller,
            "Resolved gateway controller"
        );

        Ok(controller)
    }
}
