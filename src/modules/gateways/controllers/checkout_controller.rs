use actix_web::{http::header::ContentType, web, HttpResponse};
use serde::Deserialize;

use crate::core::{AppError, Result};
use crate::modules::gateways::services::{snap_js_url, MidtransSettingsService};

#[derive(Debug, Deserialize)]
pub struct CheckoutQuery {
    pub pay: String,
    pub client: String,
}

/// Snap tokens are UUIDs and client keys look like `SB-Mid-client-…`,
/// so anything outside this set is rejected rather than escaped.
fn is_safe_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// HTML page that loads Snap.js and opens the payment popup for `token`
pub fn render_checkout_page(token: &str, client_key: &str, is_production: bool) -> Result<String> {
    if !is_safe_token(token) {
        return Err(AppError::validation("Invalid payment token"));
    }
    if !is_safe_token(client_key) {
        return Err(AppError::validation("Invalid client key"));
    }

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Midtrans Checkout</title>
<script src="{snap_js}" data-client-key="{client_key}"></script>
</head>
<body>
<button id="pay-button">Pay</button>
<script>
  function pay() {{ window.snap.pay("{token}"); }}
  document.getElementById("pay-button").addEventListener("click", pay);
  window.addEventListener("load", pay);
</script>
</body>
</html>
"#,
        snap_js = snap_js_url(is_production),
        client_key = client_key,
        token = token,
    ))
}

/// GET /payment_checkout?pay={token}&client={client_key}
pub async fn checkout(
    query: web::Query<CheckoutQuery>,
    service: web::Data<MidtransSettingsService>,
) -> Result<HttpResponse> {
    let settings = service.load().await?;
    if query.client != settings.client_key {
        return Err(AppError::validation("Unknown client key"));
    }

    let page = render_checkout_page(&query.pay, &query.client, settings.is_production())?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/payment_checkout", web::get().to(checkout));
}
