use std::time::{Duration, Instant};

use serde_json::json;
use summarizer_engine::{EngineEvent, EngineHandle, FailureKind, ServiceSettings, SummarizePayload};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn next_event(engine: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = engine.try_recv() {
            return event;
        }
        assert!(Instant::now() < deadline, "no engine event within 5s");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

fn engine_for(server: &MockServer) -> EngineHandle {
    EngineHandle::new(ServiceSettings {
        base_url: server.uri(),
        ..ServiceSettings::default()
    })
    .expect("engine starts")
}

#[tokio::test(flavor = "multi_thread")]
async fn summarize_command_resolves_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"summary": "Hi."})))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    engine.summarize(SummarizePayload::Text {
        text: "Hello world".to_string(),
        model: "t5".to_string(),
    });

    let event = next_event(&engine).await;
    assert_eq!(event, EngineEvent::Summarized(Ok(Some("Hi.".to_string()))));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(engine.try_recv().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_failure_is_reported_with_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/delete/42"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    engine.delete("42");

    match next_event(&engine).await {
        EngineEvent::Deleted { id, result } => {
            assert_eq!(id, "42");
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(500));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn history_and_clear_commands_report_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/clear"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    engine.clear();
    assert_eq!(next_event(&engine).await, EngineEvent::Cleared(Ok(())));

    engine.load_history();
    assert_eq!(
        next_event(&engine).await,
        EngineEvent::HistoryLoaded(Ok(Vec::new()))
    );
}
