//! Contract tests for the HTTP completion client against a mock service.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST | `/v1beta/models/{model}:generateContent` | `consult_*` |

use std::time::Duration;

use dmo_advisor::{Advice, Advisor, AdvisorConfig, AdvisorError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_advisor(mock_server: &MockServer) -> Advisor<dmo_advisor::HttpCompletionClient> {
    let config = AdvisorConfig::local_mock(&mock_server.uri(), "test-key").unwrap();
    Advisor::from_config(&config).unwrap()
}

#[tokio::test]
async fn consult_sends_prompt_and_returns_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_string_contains("HR Payroll Dataset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "CLASSIFICATION: SECRET\nREASON: salary data"}]}
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let advisor = test_advisor(&mock_server);
    let advice = advisor
        .consult(Some("Is this data secret?"), Some("HR Payroll Dataset"))
        .await
        .unwrap();

    match advice {
        Advice::Answered { text, model } => {
            assert!(text.starts_with("CLASSIFICATION: SECRET"));
            assert_eq!(model, "gemini-2.5-flash");
        }
        other => panic!("expected answer, got {other:?}"),
    }
}

#[tokio::test]
async fn consult_surfaces_upstream_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&mock_server)
        .await;

    let advisor = test_advisor(&mock_server);
    let err = advisor.consult(None, None).await.unwrap_err();
    match err {
        AdvisorError::Upstream { status, body, .. } => {
            assert_eq!(status, 429);
            assert_eq!(body, "quota exceeded");
        }
        other => panic!("expected upstream error, got {other}"),
    }
}

#[tokio::test]
async fn consult_rejects_empty_candidates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
        )
        .mount(&mock_server)
        .await;

    let advisor = test_advisor(&mock_server);
    assert!(matches!(
        advisor.consult(None, None).await,
        Err(AdvisorError::EmptyCompletion)
    ));
}

#[tokio::test]
async fn consult_reports_malformed_bodies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let advisor = test_advisor(&mock_server);
    assert!(matches!(
        advisor.consult(None, None).await,
        Err(AdvisorError::Deserialization { .. })
    ));
}

#[tokio::test]
async fn off_topic_questions_skip_the_service() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let advisor = test_advisor(&mock_server);
    let advice = advisor.consult(Some("tell me a joke"), None).await.unwrap();
    assert!(matches!(advice, Advice::OutOfScope { .. }));
}

#[tokio::test]
async fn slow_service_reports_timeout_not_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "candidates": [{"content": {"parts": [{"text": "late"}]}}]
                }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut config = AdvisorConfig::local_mock(&mock_server.uri(), "test-key").unwrap();
    config.timeout_secs = 1;
    let advisor = Advisor::from_config(&config).unwrap();

    match advisor.consult(None, None).await {
        Err(AdvisorError::Timeout { secs }) => assert_eq!(secs, 1),
        other => panic!("expected timeout, got {other:?}"),
    }
}
