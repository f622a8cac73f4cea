// Snap client against a local HTTP stub of the Snap API.

use std::time::Duration;

use midtrans_gateway::core::AppError;
use midtrans_gateway::gateways::{SnapApi, SnapClient, SnapOptions, SnapTransactionRequest};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::{
    matchers::{basic_auth, body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const SERVER_KEY: &str = "SB-Mid-server-TEST0000000000000000";

fn client_for(server: &MockServer, max_retries: u32) -> SnapClient {
    SnapClient::new(
        SERVER_KEY.to_string(),
        false,
        &SnapOptions {
            base_url: Some(format!("{}/snap/v1", server.uri())),
            max_retries,
            timeout: Duration::from_secs(5),
        },
    )
    .expect("client builds")
}

#[tokio::test]
async fn test_creates_transaction_with_server_key_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/snap/v1/transactions"))
        .and(basic_auth(SERVER_KEY, ""))
        .and(header("Accept", "application/json"))
        .and(body_json(json!({
            "transaction_details": {"order_id": "ORDER-111", "gross_amount": 600},
            "credit_card": {"secure": true}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "66e4fa55-fdac-4ef9-91b5-733b97d1b862",
            "redirect_url": "https://app.sandbox.midtrans.com/snap/v2/vtweb/66e4fa55-fdac-4ef9-91b5-733b97d1b862"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let request = SnapTransactionRequest::new("ORDER-111", dec!(600)).unwrap();
    let transaction = client.create_transaction(&request).await.unwrap();

    assert_eq!(transaction.token, "66e4fa55-fdac-4ef9-91b5-733b97d1b862");
    assert!(transaction
        .redirect_url
        .unwrap()
        .ends_with("66e4fa55-fdac-4ef9-91b5-733b97d1b862"));
}

#[tokio::test]
async fn test_rejection_surfaces_snap_error_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/snap/v1/transactions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error_messages": [
                "Access denied due to unauthorized transaction, please check client or server key"
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 2);
    let request = SnapTransactionRequest::new("ORDER-401", dec!(1000)).unwrap();
    let err = client.create_transaction(&request).await.unwrap_err();

    match err {
        AppError::Gateway(message) => {
            assert!(message.contains("HTTP 401"));
            assert!(message.contains("Access denied"));
        }
        other => panic!("expected gateway error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_duplicate_order_id_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/snap/v1/transactions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_messages": ["transaction_details.order_id sudah digunakan"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let request = SnapTransactionRequest::new("ORDER-DUP", dec!(1000)).unwrap();
    assert!(matches!(
        client.create_transaction(&request).await,
        Err(AppError::Gateway(_))
    ));
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/snap/v1/transactions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, 1);
    let request = SnapTransactionRequest::new("ORDER-503", dec!(1000)).unwrap();
    let err = client.create_transaction(&request).await.unwrap_err();
    assert!(err.to_string().contains("HTTP 503"));
}

#[tokio::test]
async fn test_unparseable_body_is_gateway_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/snap/v1/transactions"))
        .respond_with(ResponseTemplate::new(201).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let request = SnapTransactionRequest::new("ORDER-HTML", dec!(1000)).unwrap();
    let err = client.create_transaction(&request).await.unwrap_err();
    assert!(matches!(err, AppError::Gateway(ref m) if m.contains("Failed to parse")));
}

#[tokio::test]
async fn test_unreachable_host_is_gateway_error() {
    let client = SnapClient::new(
        SERVER_KEY.to_string(),
        false,
        &SnapOptions {
            base_url: Some("http://127.0.0.1:1/snap/v1".to_string()),
            max_retries: 0,
            timeout: Duration::from_secs(2),
        },
    )
    .unwrap();

    let request = SnapTransactionRequest::new("ORDER-DOWN", dec!(1000)).unwrap();
    let err = client.create_transaction(&request).await.unwrap_err();
    assert!(matches!(err, AppError::Gateway(ref m) if m.contains("Midtrans")));
}
