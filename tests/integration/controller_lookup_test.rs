// Payment request -> gateway controller lookup and settings persistence.
// Needs a MySQL test database (TEST_DATABASE_URL); run with `--ignored`.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::time::Duration;

use helpers::{
    create_test_pool, sandbox_settings, unique_name, CLIENT_KEY, SITE_URL, SNAP_TOKEN,
};
use midtrans_gateway::core::AppError;
use midtrans_gateway::gateways::{
    GatewayController, GatewayRepository, MidtransSettingsService, PaymentGateway,
    SettingsFlags, SettingsRepository, SnapOptions, GATEWAY_NAME, SETTINGS_NAME,
};
use midtrans_gateway::gateways::PaymentDetails;
use midtrans_gateway::integrations::{IntegrationRequestRepository, RequestStatus};
use midtrans_gateway::payment_requests::{
    PaymentRequest, PaymentRequestRepository, PaymentRequestService,
};
use rust_decimal_macros::dec;
use serde_json::json;
use sqlx::MySqlPool;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
#[ignore = "Requires database setup"]
async fn test_resolves_controller_through_payment_gateway() {
    let pool = create_test_pool().await;
    let gateways = GatewayRepository::new(pool.clone());
    let requests = PaymentRequestRepository::new(pool.clone());

    let gateway_name = unique_name("Midtrans");
    gateways
        .upsert(&PaymentGateway::new(&gateway_name, SETTINGS_NAME, SETTINGS_NAME))
        .await
        .unwrap();

    let request_name = unique_name("PR");
    requests
        .create(&PaymentRequest {
            name: request_name.clone(),
            payment_gateway: gateway_name.clone(),
            reference_doctype: "Sales Order".to_string(),
            reference_name: "SO-0001".to_string(),
            grand_total: dec!(150000),
            currency: "IDR".to_string(),
            status: "Initiated".to_string(),
        })
        .await
        .unwrap();

    let service = PaymentRequestService::new(requests, gateways);
    let controller = service.get_gateway_controller(&request_name).await.unwrap();
    assert_eq!(controller, SETTINGS_NAME);
}

#[tokio::test]
#[ignore = "Requires database setup"]
async fn test_missing_payment_request_is_not_found() {
    let pool = create_test_pool().await;
    let service = PaymentRequestService::new(
        PaymentRequestRepository::new(pool.clone()),
        GatewayRepository::new(pool),
    );

    let result = service.get_gateway_controller("PR-DOES-NOT-EXIST").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
#[ignore = "Requires database setup"]
async fn test_missing_gateway_row_is_not_found() {
    let pool = create_test_pool().await;
    let requests = PaymentRequestRepository::new(pool.clone());

    let request_name = unique_name("PR");
    requests
        .create(&PaymentRequest {
            name: request_name.clone(),
            payment_gateway: unique_name("Ghost"),
            reference_doctype: "Sales Invoice".to_string(),
            reference_name: "SINV-0001".to_string(),
            grand_total: dec!(1000),
            currency: "IDR".to_string(),
            status: "Draft".to_string(),
        })
        .await
        .unwrap();

    let service = PaymentRequestService::new(requests, GatewayRepository::new(pool));
    let result = service.get_gateway_controller(&request_name).await;
    assert!(matches!(result, Err(AppError::NotFound(ref m)) if m.contains("Payment Gateway")));
}

#[tokio::test]
#[ignore = "Requires database setup"]
async fn test_settings_save_registers_gateway_and_keeps_server_key() {
    let pool = create_test_pool().await;
    let gateways = GatewayRepository::new(pool.clone());
    let service = MidtransSettingsService::new(
        SettingsRepository::new(pool.clone()),
        gateways.clone(),
        IntegrationRequestRepository::new(pool.clone()),
        SnapOptions::default(),
        SITE_URL,
    );

    let saved = service
        .save(&sandbox_settings(), SettingsFlags::default())
        .await
        .unwrap();
    assert_eq!(saved.client_key, CLIENT_KEY);
    assert!(saved.updated_at.is_some());

    assert_eq!(
        gateways.get_gateway_controller(GATEWAY_NAME).await.unwrap(),
        Some(SETTINGS_NAME.to_string())
    );

    // A read-back payload has no server key; saving it keeps the stored one
    let mut update = saved.clone();
    update.server_key = String::new();
    update.midtrans_sandbox = false;
    let updated = service.save(&update, SettingsFlags::default()).await.unwrap();
    assert!(updated.is_production());
    assert_eq!(updated.server_key, sandbox_settings().server_key);

    let controller = service.build_controller(updated).unwrap();
    assert_eq!(controller.name(), GATEWAY_NAME);
}

fn logging_service(pool: &MySqlPool, server: &MockServer) -> MidtransSettingsService {
    MidtransSettingsService::new(
        SettingsRepository::new(pool.clone()),
        GatewayRepository::new(pool.clone()),
        IntegrationRequestRepository::new(pool.clone()),
        SnapOptions {
            base_url: Some(format!("{}/snap/v1", server.uri())),
            max_retries: 0,
            timeout: Duration::from_secs(5),
        },
        SITE_URL,
    )
}

#[tokio::test]
#[ignore = "Requires database setup"]
async fn test_snap_call_is_logged_as_completed() {
    let pool = create_test_pool().await;
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/snap/v1/transactions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": SNAP_TOKEN,
            "redirect_url": format!("https://app.sandbox.midtrans.com/snap/v2/vtweb/{}", SNAP_TOKEN)
        })))
        .mount(&server)
        .await;

    let controller = logging_service(&pool, &server)
        .build_controller(sandbox_settings())
        .unwrap();
    let order_id = unique_name("ORDER");
    let url = controller
        .get_payment_url(&PaymentDetails::new(&order_id, dec!(600)))
        .await
        .unwrap();
    assert!(url.contains(SNAP_TOKEN));

    let log = IntegrationRequestRepository::new(pool)
        .list_by_reference(&order_id)
        .await
        .unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].service, GATEWAY_NAME);
    assert_eq!(log[0].status, RequestStatus::Completed);
    assert_eq!(log[0].request_data["transaction_details"]["order_id"], order_id.as_str());
    assert_eq!(log[0].output.as_ref().unwrap()["token"], SNAP_TOKEN);
    assert!(log[0].error.is_none());
}

#[tokio::test]
#[ignore = "Requires database setup"]
async fn test_snap_rejection_is_logged_as_failed() {
    let pool = create_test_pool().await;
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/snap/v1/transactions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error_messages": ["Access denied due to unauthorized transaction"]
        })))
        .mount(&server)
        .await;

    let controller = logging_service(&pool, &server)
        .build_controller(sandbox_settings())
        .unwrap();
    let order_id = unique_name("ORDER");
    let result = controller
        .get_payment_url(&PaymentDetails::new(&order_id, dec!(600)))
        .await;
    assert!(matches!(result, Err(AppError::Gateway(_))));

    let log = IntegrationRequestRepository::new(pool)
        .list_by_reference(&order_id)
        .await
        .unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].status, RequestStatus::Failed);
    assert!(log[0].output.is_none());
    assert!(log[0]
        .error
        .as_deref()
        .unwrap()
        .contains("Access denied due to unauthorized transaction"));
}
