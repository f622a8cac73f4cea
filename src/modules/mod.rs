pub mod gateways;
pub mod integrations;
pub mod payment_requests;

use actix_web::web;

use crate::middleware::{json_error_handler, query_error_handler, ApiKeyAuth};

/// Register every route plus the extractor error handlers.
///
/// Handlers expect `web::Data` for `GatewayService`, `MidtransSettingsService`
/// and `PaymentRequestService` to be registered on the app. Everything except
/// `/health` and the checkout page requires an API key.
pub fn configure(auth: ApiKeyAuth) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .route("/health", web::get().to(health_check));

        gateways::configure(cfg, &auth);
        payment_requests::configure(cfg, &auth);
    }
}

async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "midtrans-gateway"
    }))
}
