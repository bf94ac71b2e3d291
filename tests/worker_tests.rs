use order_bridge::{
    models::{batch::BatchEnvelope, request::Credentials},
    worker::execute_envelope,
};
use reqwest::Client;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

fn envelope(server_uri: &str, count: usize) -> BatchEnvelope {
    BatchEnvelope {
        method: "POST".to_string(),
        credentials: Credentials {
            email: "ops@example.com".to_string(),
            token: "t0ken".to_string(),
        },
        urls: (0..count)
            .map(|_| format!("{}/deliver", server_uri))
            .collect(),
        bodies: (0..count)
            .map(|index| format!("{{\"client\":\"{}\"}}", index))
            .collect(),
    }
}

/// Test: every item in the envelope is delivered with the credential headers
#[tokio::test]
async fn test_envelope_items_all_delivered() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/deliver"))
        .and(header("X-User-Email", "ops@example.com"))
        .and(header("X-User-Token", "t0ken"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;

    execute_envelope(&Client::new(), &envelope(&server.uri(), 3)).await;

    server.verify().await;
}

/// Test: a failing item does not abort the remaining items
#[tokio::test]
async fn test_failing_item_does_not_abort_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/deliver"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    execute_envelope(&Client::new(), &envelope(&server.uri(), 3)).await;

    server.verify().await;
}

/// Test: an envelope with an unusable method issues no requests
#[tokio::test]
async fn test_invalid_method_skips_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/deliver"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut bad = envelope(&server.uri(), 2);
    bad.method = "NOT A METHOD".to_string();

    execute_envelope(&Client::new(), &bad).await;

    server.verify().await;
}

/// Test: the envelope round-trips through its queue wire format
#[test]
fn test_envelope_round_trip() {
    let original = envelope("https://erp.example.com", 2);

    let serialized = serde_json::to_string(&original).unwrap();
    let decoded: BatchEnvelope = serde_json::from_str(&serialized).unwrap();

    assert_eq!(decoded, original);
}
