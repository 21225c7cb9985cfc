//! OpenAI client tests against a local HTTP stub.

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use moodcomic_error::ModelsErrorKind;
use moodcomic_models::{
    ChatMessage, ChatRequestBuilder, ImageModel, OpenAiClient, OpenAiConfig, SpeechModel,
    SpeechRequest, TextModel,
};
use serde_json::{Value, json};

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: &str) -> OpenAiClient {
    OpenAiClient::new(
        OpenAiConfig::default()
            .with_api_key("sk-test")
            .with_base_url(base_url),
    )
    .unwrap()
}

fn chat_request() -> moodcomic_models::ChatRequest {
    ChatRequestBuilder::default()
        .messages(vec![ChatMessage::user("write a comic")])
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_chat_completion_returns_first_choice() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            assert_eq!(headers[header::AUTHORIZATION], "Bearer sk-test");
            assert_eq!(body["model"], "gpt-4o-mini");
            Json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "{\"panels\":[]}" } }]
            }))
        }),
    );
    let base = spawn_stub(router).await;

    let text = client(&base).complete(&chat_request()).await.unwrap();

    assert_eq!(text, "{\"panels\":[]}");
}

#[tokio::test]
async fn test_empty_choices_is_empty_response() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({ "choices": [] })) }),
    );
    let base = spawn_stub(router).await;

    let err = client(&base).complete(&chat_request()).await.unwrap_err();

    assert_eq!(err.kind, ModelsErrorKind::EmptyResponse);
}

#[tokio::test]
async fn test_content_policy_refusal_is_classified() {
    let router = Router::new().route(
        "/v1/images/generations",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": {
                        "code": "content_policy_violation",
                        "message": "Your request was rejected by the safety system."
                    }
                })),
            )
        }),
    );
    let base = spawn_stub(router).await;

    let err = client(&base).generate_image("a quiet street").await.unwrap_err();

    assert!(err.kind.is_content_policy());
    assert!(!err.kind.is_rate_limited());
}

#[tokio::test]
async fn test_rate_limit_and_outage_statuses_are_preserved() {
    let router = Router::new()
        .route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        )
        .route(
            "/v1/audio/speech",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
    let base = spawn_stub(router).await;
    let client = client(&base);

    let limited = client.complete(&chat_request()).await.unwrap_err();
    assert!(limited.kind.is_rate_limited());

    let outage = client
        .synthesize(&SpeechRequest::new("hello", "nova"))
        .await
        .unwrap_err();
    assert_eq!(
        outage.kind,
        ModelsErrorKind::Api {
            status_code: 502,
            message: "upstream down".into(),
        }
    );
    assert!(!outage.kind.is_content_policy());
}

#[tokio::test]
async fn test_image_generation_then_download() {
    let router = Router::new()
        .route(
            "/v1/images/generations",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["n"], 1);
                assert_eq!(body["size"], "256x256");
                assert_eq!(body["response_format"], "url");
                Json(json!({ "data": [{ "url": "/files/panel.png" }] }))
            }),
        )
        .route("/files/panel.png", get(|| async { vec![0x89u8, b'P', b'N', b'G'] }));
    let base = spawn_stub(router).await;
    let client = client(&base);

    let url = client.generate_image("lighthouse").await.unwrap();
    assert_eq!(url, "/files/panel.png");

    let bytes = client.fetch_image(&format!("{}{}", base, url)).await.unwrap();
    assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn test_speech_returns_audio_bytes() {
    let router = Router::new().route(
        "/v1/audio/speech",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["voice"], "onyx");
            assert_eq!(body["response_format"], "mp3");
            ([(header::CONTENT_TYPE, "audio/mpeg")], vec![b'I', b'D', b'3']).into_response()
        }),
    );
    let base = spawn_stub(router).await;

    let audio = client(&base)
        .synthesize(&SpeechRequest::new("once upon a time", "onyx"))
        .await
        .unwrap();

    assert_eq!(audio, b"ID3".to_vec());
}
