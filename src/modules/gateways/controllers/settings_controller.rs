use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::Result;
use crate::middleware::ApiKeyAuth;
use crate::modules::gateways::models::{MidtransSettings, SettingsFlags};
use crate::modules::gateways::services::{GatewayService, MidtransSettingsService};

#[derive(Debug, Deserialize)]
pub struct SaveSettingsRequest {
    #[serde(flatten)]
    pub settings: MidtransSettings,
    #[serde(flatten)]
    pub flags: SettingsFlags,
}

/// GET /midtrans/settings
pub async fn get_settings(service: web::Data<MidtransSettingsService>) -> Result<HttpResponse> {
    let settings = service.load().await?;
    Ok(HttpResponse::Ok().json(settings))
}

/// Save settings and swap the registered controller for one using them.
/// Draft settings take the gateway offline until completed.
/// PUT /midtrans/settings
pub async fn save_settings(
    body: web::Json<SaveSettingsRequest>,
    service: web::Data<MidtransSettingsService>,
    gateways: web::Data<GatewayService>,
) -> Result<HttpResponse> {
    let request = body.into_inner();
    let saved = service.save(&request.settings, request.flags).await?;

    service.activate(&gateways, saved.clone())?;

    Ok(HttpResponse::Ok().json(saved))
}

pub fn configure(cfg: &mut web::ServiceConfig, auth: &ApiKeyAuth) {
    cfg.service(
        web::scope("/midtrans").wrap(auth.clone()).service(
            web::resource("/settings")
                .route(web::get().to(get_settings))
                .route(web::put().to(save_settings)),
        ),
    );
}
