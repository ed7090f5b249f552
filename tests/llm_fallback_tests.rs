//! External-model path against a local fake provider.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    routing::post,
};
use boom_summarizer::{
    ai::LlmClient,
    api::create_router_with_config,
    core::config::AppConfig,
    core::models::{SummaryResult, SummaryType},
    errors::LlmError,
    summarize::SummaryProducer,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt;

const MODEL: &str = "gpt-4o-mini";

/// Serve `router` on an ephemeral port and return its `/v1` base URL.
async fn spawn_provider(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v1")
}

/// A base URL nothing is listening on.
async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v1")
}

fn llm_config(base_url: String) -> AppConfig {
    AppConfig {
        openai_api_key: Some("sk-test".to_string()),
        openai_base_url: base_url,
        ..AppConfig::default()
    }
}

fn client(base_url: String, timeout: Duration) -> LlmClient {
    LlmClient::with_timeout(
        "sk-test".to_string(),
        None,
        MODEL.to_string(),
        base_url,
        timeout,
    )
    .unwrap()
}

fn responses_payload(text: &str) -> Value {
    json!({
        "id": "resp_123",
        "output": [{
            "type": "message",
            "role": "assistant",
            "content": [{ "type": "output_text", "text": text }]
        }]
    })
}

async fn post_text(app: Router, text: &str) -> (StatusCode, SummaryResult) {
    let body = format!(
        "text={}&summary_type=executive",
        text.replace('\n', "%0A").replace(' ', "+")
    );
    let request = Request::builder()
        .method("POST")
        .uri("/summarize")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_llm_summary_is_returned_and_request_is_well_formed() {
    let captured: Arc<Mutex<Option<(HeaderMap, Value)>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&captured);

    let provider = Router::new().route(
        "/v1/responses",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let sink = Arc::clone(&sink);
            async move {
                *sink.lock().unwrap() = Some((headers, body));
                Json(responses_payload(
                    "Sure! ```json\n{\"purpose\": \"Launch plan\", \"insights\": [\"1. Ship Friday\"], \"next_steps\": [\"Notify sales\"]}\n```",
                ))
            }
        }),
    );
    let base_url = spawn_provider(provider).await;

    let (status, summary) = post_text(create_router_with_config(llm_config(base_url)), "We ship Friday.").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary.model_used, MODEL);
    assert_eq!(summary.purpose, "Launch plan");
    assert_eq!(summary.insights, vec!["1. Ship Friday"]);
    assert!(summary.risks.is_empty());
    assert_eq!(summary.next_steps, vec!["Notify sales"]);
    assert!(summary.notes.is_none());

    let (headers, body) = captured.lock().unwrap().take().unwrap();
    assert_eq!(headers["authorization"], "Bearer sk-test");
    assert_eq!(body["model"], MODEL);
    assert_eq!(body["input"][0]["role"], "user");
    let prompt = body["input"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("We ship Friday."));
    assert!(prompt.contains("Summary type: executive."));
}

#[tokio::test]
async fn test_output_text_field_is_accepted() {
    let provider = Router::new().route(
        "/v1/responses",
        post(|| async {
            Json(json!({ "output_text": "{\"purpose\": \"P\", \"risks\": [\"R\"]}" }))
        }),
    );
    let base_url = spawn_provider(provider).await;

    let summary = client(base_url, Duration::from_secs(5))
        .summarize("text", SummaryType::Short)
        .await
        .unwrap();

    assert_eq!(summary.purpose, "P");
    assert_eq!(summary.risks, vec!["R"]);
    assert!(summary.insights.is_empty());
}

#[tokio::test]
async fn test_non_success_status_falls_back_to_heuristic() {
    let provider = Router::new().route(
        "/v1/responses",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let base_url = spawn_provider(provider).await;

    let err = client(base_url.clone(), Duration::from_secs(5))
        .summarize("a\nb", SummaryType::Executive)
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::Status { status: 429, .. }));

    let (status, summary) = post_text(create_router_with_config(llm_config(base_url)), "a\nb").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary.model_used, "heuristic");
    assert_eq!(summary.insights, vec!["a", "b", "a", "b"]);
}

#[tokio::test]
async fn test_unparseable_output_falls_back_to_heuristic() {
    let provider = Router::new().route(
        "/v1/responses",
        post(|| async { Json(responses_payload("I cannot produce JSON today.")) }),
    );
    let base_url = spawn_provider(provider).await;

    let err = client(base_url.clone(), Duration::from_secs(5))
        .summarize("x", SummaryType::Executive)
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::NoJsonObject));

    let (status, summary) = post_text(create_router_with_config(llm_config(base_url)), "x").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary.model_used, "heuristic");
}

#[tokio::test]
async fn test_unreachable_provider_falls_back_to_heuristic() {
    let base_url = dead_base_url().await;

    let (status, summary) =
        post_text(create_router_with_config(llm_config(base_url)), "Only line").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary.model_used, "heuristic");
    assert_eq!(summary.insights, vec!["Only line", "Only line"]);
}

#[tokio::test]
async fn test_timeout_falls_back_to_heuristic() {
    let provider = Router::new().route(
        "/v1/responses",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Json(responses_payload("{\"purpose\": \"too late\"}"))
        }),
    );
    let base_url = spawn_provider(provider).await;
    let llm = client(base_url, Duration::from_millis(200));

    let err = llm
        .summarize("Line1\nLine2", SummaryType::Executive)
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::Http(_)));

    let summary = SummaryProducer::with_llm(llm)
        .produce("Line1\nLine2", SummaryType::Executive)
        .await;
    assert_eq!(summary.model_used, "heuristic");
    assert_eq!(summary.insights, vec!["Line1", "Line2", "Line1", "Line2"]);
}
