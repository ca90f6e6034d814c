//! End-to-end tests of the HTTP transport against a mock SOAP endpoint

use clmclient::{ClientConfig, LoyaltyClient};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BALANCE_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ns2:getBalanceResponse xmlns:ns2="http://interfaces.esb.clm.comarch.com/">
      <return>
        <balance>1200</balance>
        <pointsToExpire>
          <points>100</points>
          <date>20241231</date>
        </pointsToExpire>
        <pointsToExpire>
          <points>50</points>
          <date>20250630</date>
        </pointsToExpire>
      </return>
    </ns2:getBalanceResponse>
  </soap:Body>
</soap:Envelope>"#;

fn client_for(server: &MockServer, timeout: Duration) -> LoyaltyClient {
    let config = ClientConfig::new("partner", "secret", format!("{}/ws/loyalty", server.uri()))
        .with_timeout(timeout);
    LoyaltyClient::connect(config).expect("client")
}

#[tokio::test]
async fn get_balance_over_http() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("clmclient=debug")
        .with_test_writer()
        .try_init();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ws/loyalty"))
        .and(header("content-type", r#"text/xml; charset="utf-8""#))
        .and(header("accept", "text/xml"))
        .and(body_string_contains("<int:getBalance>"))
        .and(body_string_contains("<cardNo>100200300</cardNo>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BALANCE_RESPONSE))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let balance = client.get_balance("100200300").await.expect("balance");

    assert_eq!(
        balance,
        json!({
            "balance": "1200",
            "pointsToExpire": [
                {"points": "100", "date": "20241231"},
                {"points": "50", "date": "20250630"}
            ]
        })
    );
}

#[tokio::test]
async fn server_error_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client.get_customer("1").await.unwrap_err();

    assert!(err.is_connection_error());
    assert_eq!(
        err.service_error().and_then(|e| e.internal_message()),
        Some("Response status code: 502; response: Bad Gateway")
    );
}

#[tokio::test]
async fn timeout_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(BALANCE_RESPONSE)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_millis(50));
    let err = client.get_balance("1").await.unwrap_err();

    assert!(err.is_connection_error());
    assert_eq!(
        err.service_error().and_then(|e| e.internal_message()),
        Some("Request timeout")
    );
}

#[tokio::test]
async fn one_client_serves_many_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BALANCE_RESPONSE))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("<int:getAccountSummary>"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    assert!(client.get_balance("1").await.is_ok());
    // a failed call does not spoil the session
    assert!(client.get_account_summary("1").await.is_err());
    assert!(client.get_balance("2").await.is_ok());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}
