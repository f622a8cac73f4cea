pub mod checkout_controller;
pub mod gateway_controller;
pub mod settings_controller;

use actix_web::web;

use crate::middleware::ApiKeyAuth;

/// Configure gateway, settings and checkout routes; the payer-facing
/// checkout page stays public
pub fn configure(cfg: &mut web::ServiceConfig, auth: &ApiKeyAuth) {
    gateway_controller::configure(cfg, auth);
    settings_controller::configure(cfg, auth);
    checkout_controller::configure(cfg);
}
