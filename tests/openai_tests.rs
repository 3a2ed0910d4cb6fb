//! OpenAI interpreter integration tests against a mock server

use serde_json::{json, Value};
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dreamtalk::application::ports::{InterpretationError, Interpreter};
use dreamtalk::infrastructure::OpenAiInterpreter;

fn interpretation_json() -> Value {
    json!({
        "interpretation": "Flying over water points to a wish for freedom.",
        "summary": "A dream of release",
        "symbols": [
            {"symbol": "sea", "meaning": "the unconscious", "significance": "high"}
        ],
        "mood": {"primary": "joy", "secondary": ["awe"], "emotional_tone": "uplifting"},
        "themes": ["freedom"],
        "suggestions": ["Note what you were escaping"]
    })
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

fn interpreter(server: &MockServer) -> OpenAiInterpreter {
    OpenAiInterpreter::new(Some("sk-test".to_string())).with_base_url(server.uri())
}

#[tokio::test]
async fn interprets_dream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(bearer_token("sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "response_format": {"type": "json_object"}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion(&interpretation_json().to_string())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = interpreter(&server)
        .interpret("I was flying over the sea")
        .await
        .unwrap();

    assert_eq!(result.summary, "A dream of release");
    assert_eq!(result.symbols.len(), 1);
    assert_eq!(result.symbols[0].symbol, "sea");
    assert_eq!(result.mood.primary, "joy");
    assert_eq!(result.themes, vec!["freedom"]);
}

#[tokio::test]
async fn prompt_carries_dream_and_language() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion(&interpretation_json().to_string())),
        )
        .expect(1)
        .mount(&server)
        .await;

    interpreter(&server)
        .with_language("English")
        .interpret("A red door in the forest")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("A red door in the forest"));
    assert!(user.contains("English"));
    assert_eq!(body["messages"][0]["role"], "system");
}

#[tokio::test]
async fn list_fields_may_be_missing() {
    let server = MockServer::start().await;
    let content = json!({"interpretation": "Short reading", "summary": "Short"}).to_string();
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&content)))
        .mount(&server)
        .await;

    let result = interpreter(&server).interpret("a dream").await.unwrap();
    assert!(result.symbols.is_empty());
    assert!(result.themes.is_empty());
    assert_eq!(result.mood.primary, "");
}

#[tokio::test]
async fn upstream_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "Rate limit reached for gpt-4o-mini", "type": "requests"}
        })))
        .mount(&server)
        .await;

    let err = interpreter(&server).interpret("a dream").await.unwrap_err();
    assert_eq!(
        err,
        InterpretationError::Remote("Rate limit reached for gpt-4o-mini".to_string())
    );
}

#[tokio::test]
async fn status_reason_without_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = interpreter(&server).interpret("a dream").await.unwrap_err();
    assert_eq!(
        err,
        InterpretationError::Remote("Service Unavailable".to_string())
    );
}

#[tokio::test]
async fn non_json_content_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("I think it means...")))
        .mount(&server)
        .await;

    let err = interpreter(&server).interpret("a dream").await.unwrap_err();
    assert!(matches!(err, InterpretationError::Parse(_)), "got {:?}", err);
}

#[tokio::test]
async fn missing_summary_is_parse_error() {
    let server = MockServer::start().await;
    let content = json!({"interpretation": "Only half an answer"}).to_string();
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&content)))
        .mount(&server)
        .await;

    let err = interpreter(&server).interpret("a dream").await.unwrap_err();
    assert!(matches!(err, InterpretationError::Parse(_)), "got {:?}", err);
}

#[tokio::test]
async fn empty_choices_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = interpreter(&server).interpret("a dream").await.unwrap_err();
    assert!(matches!(err, InterpretationError::Parse(_)), "got {:?}", err);
}

#[tokio::test]
async fn blank_text_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = interpreter(&server).interpret("  \n ").await.unwrap_err();
    assert!(matches!(err, InterpretationError::Validation(_)));

    let unconfigured = OpenAiInterpreter::new(None).with_base_url(server.uri());
    let err = unconfigured.interpret("a dream").await.unwrap_err();
    assert!(matches!(err, InterpretationError::Configuration(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_prints_interpretation_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(bearer_token("sk-cli"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion(&interpretation_json().to_string())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::TempDir::new().unwrap();
    let home_path = home.path().to_path_buf();
    let base_url = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        std::process::Command::new(env!("CARGO_BIN_EXE_dreamtalk"))
            .args(["interpret", "I was flying over the sea", "--json"])
            .env("HOME", &home_path)
            .env("XDG_CONFIG_HOME", home_path.join("config"))
            .env("XDG_DATA_HOME", home_path.join("data"))
            .env("OPENAI_API_KEY", "sk-cli")
            .env("OPENAI_BASE_URL", base_url)
            .env_remove("SUPABASE_URL")
            .env_remove("SUPABASE_ANON_KEY")
            .output()
            .expect("Failed to execute command")
    })
    .await
    .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed["summary"], "A dream of release");
    assert_eq!(printed["themes"][0], "freedom");
}
