use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::middleware::ApiKeyAuth;
use crate::modules::gateways::models::PaymentDetails;
use crate::modules::gateways::services::GatewayService;

#[derive(Debug, Deserialize)]
pub struct CurrencyRequest {
    pub currency: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentUrlResponse {
    pub url: String,
}

/// List all registered payment gateways
/// GET /gateways
pub async fn list_gateways(service: web::Data<GatewayService>) -> Result<HttpResponse> {
    let gateways = service.list_gateways()?;
    Ok(HttpResponse::Ok().json(gateways))
}

/// Check that a gateway settles in the given currency
/// POST /gateways/{name}/validate-currency
pub async fn validate_currency(
    path: web::Path<String>,
    body: web::Json<CurrencyRequest>,
    service: web::Data<GatewayService>,
) -> Result<HttpResponse> {
    service.validate_transaction_currency(&path, &body.currency)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Create the provider transaction and return the payer redirect URL
/// POST /gateways/{name}/payment-url
pub async fn payment_url(
    path: web::Path<String>,
    body: web::Json<PaymentDetails>,
    service: web::Data<GatewayService>,
) -> Result<HttpResponse> {
    let url = service.get_payment_url(&path, &body).await?;
    Ok(HttpResponse::Ok().json(PaymentUrlResponse { url }))
}

/// Configure gateway routes behind API key auth
pub fn configure(cfg: &mut web::ServiceConfig, auth: &ApiKeyAuth) {
    cfg.service(
        web::scope("/gateways")
            .wrap(auth.clone())
            .route("", web::get().to(list_gateways))
            .route("/{name}/validate-currency", web::post().to(validate_currency))
            .route("/{name}/payment-url", web::post().to(payment_url)),
    );
}
