use completion_client::{OpenAiClient, DEFAULT_MODEL};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use webhook::{Processor, FUNCTION_PATH};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spawn_webhook(api_key: Option<&str>, openai: &MockServer) -> String {
    spawn_webhook_at(api_key, &openai.uri()).await
}

async fn spawn_webhook_at(api_key: Option<&str>, openai_base_url: &str) -> String {
    let client = OpenAiClient::new(api_key.map(str::to_owned), openai_base_url, DEFAULT_MODEL);
    let app = webhook::app(Processor::new(Arc::new(client)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn mount_completion(server: &MockServer, answer: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": answer}}]
        })))
        .expect(times)
        .mount(server)
        .await;
}

fn ask(kind: &str, intent: &str, question: &str) -> serde_json::Value {
    json!({
        "version": "1.0",
        "session": {"new": false, "sessionId": "a5cf3f1e", "user": {"userId": "u"}},
        "context": {"System": {"application": {"applicationId": "app"}, "device": {"deviceId": "d"}}},
        "request": {
            "type": kind,
            "intent": {"name": intent, "slots": {"question": {"name": "question", "value": question}}}
        }
    })
}

#[tokio::test]
async fn answers_with_speech_envelope() {
    let openai = MockServer::start().await;
    mount_completion(&openai, "안녕하세요", 1).await;
    let base = spawn_webhook(Some("sk-test"), &openai).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/"))
        .json(&ask("IntentRequest", "AskLLMIntent", "인사해줘"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "application/json");
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["version"], "0.1.0");
    assert_eq!(body["sessionAttributes"], json!({}));
    assert_eq!(body["response"]["outputSpeech"]["type"], "SimpleSpeech");
    assert_eq!(body["response"]["outputSpeech"]["values"]["value"], "안녕하세요");
    assert_eq!(body["response"]["outputSpeech"]["values"]["lang"], "ko");
    assert_eq!(body["response"]["outputSpeech"]["values"]["type"], "PlainText");
    assert_eq!(body["response"]["card"], json!({}));
    assert_eq!(body["response"]["directives"], json!([]));
    assert_eq!(body["response"]["shouldEndSession"], false);

    let requests = openai.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["messages"][2]["content"], "인사해줘");
}

#[tokio::test]
async fn function_path_is_served_too() {
    let openai = MockServer::start().await;
    mount_completion(&openai, "네", 1).await;
    let base = spawn_webhook(Some("sk-test"), &openai).await;

    let response = reqwest::Client::new()
        .post(format!("{base}{FUNCTION_PATH}"))
        .json(&ask("IntentRequest", "AskLLMIntent", "맞아?"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn validation_failures_are_plain_text_400s() {
    let openai = MockServer::start().await;
    mount_completion(&openai, "unused", 0).await;
    let base = spawn_webhook(Some("sk-test"), &openai).await;
    let http = reqwest::Client::new();

    let response = http
        .post(&base)
        .json(&ask("LaunchRequest", "AskLLMIntent", "q"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert_eq!(response.text().await.unwrap(), "Invalid request type or intent");

    let response = http
        .post(&base)
        .json(&ask("IntentRequest", "AskLLMIntent", ""))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert_eq!(response.text().await.unwrap(), "No question provided");

    let response = http.post(&base).body("{not json").send().await.unwrap();
    assert_eq!(response.status(), 400);
    assert!(response
        .text()
        .await
        .unwrap()
        .starts_with("Error parsing request: "));
}

#[tokio::test]
async fn missing_key_is_500_without_outbound_call() {
    let openai = MockServer::start().await;
    mount_completion(&openai, "unused", 0).await;
    let base = spawn_webhook(None, &openai).await;

    let response = reqwest::Client::new()
        .post(&base)
        .json(&ask("IntentRequest", "AskLLMIntent", "q"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    assert_eq!(response.text().await.unwrap(), "OpenAI API key not configured");
}

#[tokio::test]
async fn upstream_failure_is_500_with_detail() {
    let openai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "Rate limit reached", "type": "requests"}
        })))
        .expect(1)
        .mount(&openai)
        .await;
    let base = spawn_webhook(Some("sk-test"), &openai).await;

    let response = reqwest::Client::new()
        .post(&base)
        .json(&ask("IntentRequest", "AskLLMIntent", "q"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    assert_eq!(
        response.text().await.unwrap(),
        "Error calling OpenAI: status code: 429, message: Rate limit reached"
    );
}

#[tokio::test]
async fn unreachable_openai_is_500_with_detail() {
    let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let openai_base_url = format!("http://{}", closed.local_addr().unwrap());
    drop(closed);
    let base = spawn_webhook_at(Some("sk-test"), &openai_base_url).await;

    let response = reqwest::Client::new()
        .post(&base)
        .json(&ask("IntentRequest", "AskLLMIntent", "q"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    assert!(response
        .text()
        .await
        .unwrap()
        .starts_with("Error calling OpenAI: "));
}

#[tokio::test]
async fn null_question_is_400() {
    let openai = MockServer::start().await;
    mount_completion(&openai, "unused", 0).await;
    let base = spawn_webhook(Some("sk-test"), &openai).await;

    let response = reqwest::Client::new()
        .post(&base)
        .json(&json!({
            "request": {"type": "IntentRequest", "intent": {"name": "AskLLMIntent", "slots": {"question": {"value": null}}}}
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(response.text().await.unwrap(), "No question provided");
}
