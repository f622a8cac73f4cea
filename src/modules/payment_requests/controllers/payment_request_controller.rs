use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::core::Result;
use crate::middleware::ApiKeyAuth;
use crate::modules::payment_requests::services::PaymentRequestService;

#[derive(Debug, Serialize)]
pub struct GatewayControllerResponse {
    pub payment_request: String,
    pub gateway_controller: String,
}

/// Look up the gateway controller handling a payment request
/// GET /payment-requests/{name}/gateway-controller
pub async fn get_gateway_controller(
    path: web::Path<String>,
    service: web::Data<PaymentRequestService>,
) -> Result<HttpResponse> {
    let payment_request = path.into_inner();
    let gateway_controller = service.get_gateway_controller(&payment_request).await?;

    Ok(HttpResponse::Ok().json(GatewayControllerResponse {
        payment_request,
        gateway_controller,
    }))
}

/// Configure payment request routes
pub fn configure(cfg: &mut web::ServiceConfig, auth: &ApiKeyAuth) {
    cfg.service(
        web::scope("/payment-requests").wrap(auth.clone()).route(
            "/{name}/gateway-controller",
            web::get().to(get_gateway_controller),
        ),
    );
}
