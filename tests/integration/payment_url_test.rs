// Payment URL construction: Snap token and client key end up in the checkout URL.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::{sandbox_settings, StubSnap, CLIENT_KEY, SERVER_KEY, SITE_URL, SNAP_TOKEN};
use midtrans_gateway::core::AppError;
use midtrans_gateway::gateways::{
    GatewayController, GatewayService, MidtransController, PaymentDetails, SnapOptions,
};
use reqwest::Url;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::{
    matchers::{basic_auth, body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn query_pairs(url: &str) -> Vec<(String, String)> {
    Url::parse(url)
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[tokio::test]
async fn test_url_carries_token_and_client_key() {
    let snap = Arc::new(StubSnap::new(SNAP_TOKEN));
    let controller = MidtransController::new(sandbox_settings(), snap.clone(), SITE_URL).unwrap();

    let url = controller
        .get_payment_url(&PaymentDetails::new("ORDER-111", dec!(600)))
        .await
        .unwrap();

    let parsed = Url::parse(&url).unwrap();
    assert_eq!(parsed.host_str(), Some("erp.example.com"));
    assert_eq!(parsed.path(), "/payment_checkout");
    assert_eq!(
        query_pairs(&url),
        vec![
            ("pay".to_string(), SNAP_TOKEN.to_string()),
            ("client".to_string(), CLIENT_KEY.to_string()),
        ]
    );
    assert_eq!(snap.request_count(), 1);
}

#[tokio::test]
async fn test_fractional_amount_sent_as_whole_rupiah() {
    let snap = Arc::new(StubSnap::new(SNAP_TOKEN));
    let controller = MidtransController::new(sandbox_settings(), snap.clone(), SITE_URL).unwrap();

    controller
        .get_payment_url(&PaymentDetails::new("ORDER-RND", dec!(149999.5)))
        .await
        .unwrap();

    let requests = snap.requests.lock().unwrap();
    assert_eq!(requests[0].transaction_details.gross_amount, 150000);
}

#[tokio::test]
async fn test_invalid_details_never_reach_snap() {
    let snap = Arc::new(StubSnap::new(SNAP_TOKEN));
    let controller = MidtransController::new(sandbox_settings(), snap.clone(), SITE_URL).unwrap();

    let err = controller
        .get_payment_url(&PaymentDetails::new("", dec!(600)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = controller
        .get_payment_url(&PaymentDetails::new("ORDER-0", dec!(0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert_eq!(snap.request_count(), 0);
}

#[tokio::test]
async fn test_snap_failure_propagates() {
    let controller =
        MidtransController::new(sandbox_settings(), Arc::new(StubSnap::failing()), SITE_URL)
            .unwrap();

    let err = controller
        .get_payment_url(&PaymentDetails::new("ORDER-ERR", dec!(600)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Gateway(_)));
}

#[tokio::test]
async fn test_end_to_end_through_snap_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/snap/v1/transactions"))
        .and(basic_auth(SERVER_KEY, ""))
        .and(body_json(json!({
            "transaction_details": {"order_id": "PR0001", "gross_amount": 250000},
            "credit_card": {"secure": true}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "b7a3c1d2-0000-4000-8000-123456789abc",
            "redirect_url": "https://app.sandbox.midtrans.com/snap/v2/vtweb/b7a3c1d2-0000-4000-8000-123456789abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = MidtransController::from_settings(
        sandbox_settings(),
        &SnapOptions {
            base_url: Some(format!("{}/snap/v1", server.uri())),
            max_retries: 0,
            timeout: Duration::from_secs(5),
        },
        "https://erp.example.com/",
    )
    .unwrap();

    let service = GatewayService::new();
    service.register(Arc::new(controller)).unwrap();

    let mut details = PaymentDetails::new("PR0001", dec!(250000));
    details.currency = Some("IDR".to_string());
    details.title = Some("Payment for bill : PR0001".to_string());

    let url = service.get_payment_url("Midtrans", &details).await.unwrap();
    assert_eq!(
        url,
        format!(
            "https://erp.example.com/payment_checkout?pay=b7a3c1d2-0000-4000-8000-123456789abc&client={}",
            CLIENT_KEY
        )
    );
}
