//! Steps for the `fetch` command against a mock site origin

use crate::common::world::TermfolioWorld;
use cucumber::{given, then};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[given("the site is served by a mock server")]
async fn given_mock_site(world: &mut TermfolioWorld) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/status.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "ok", "nodes": 17})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/big.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "blob": "x".repeat(5000)
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    world.mock_server = Some(server);
    world.start().expect("Failed to start terminal");
}

#[then(expr = "the mock server should have received {int} request(s)")]
async fn then_request_count(world: &mut TermfolioWorld, count: usize) {
    let server = world.mock_server.as_ref().expect("No mock server");
    let received = server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), count);
}

#[then("the last output line should be truncated")]
async fn then_truncated(world: &mut TermfolioWorld) {
    let (_, text) = world.last_entry();
    assert!(text.ends_with("… (truncated)"), "not truncated: {text}");
    assert_eq!(
        text.chars().count(),
        termfolio::config::FETCH_CHAR_BUDGET + "\n… (truncated)".chars().count()
    );
}
