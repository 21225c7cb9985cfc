//! HTTP surface tests.

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use moodcomic::{AppState, ComicPipeline, create_router};
use moodcomic_cache::SynthesisCache;
use moodcomic_core::CostModel;
use moodcomic_models::mock::{MockImageModel, MockSpeechModel, MockTextModel};
use moodcomic_panels::{PanelSynthesizer, SynthesisSettings};
use moodcomic_rate_limit::RetryPolicy;
use moodcomic_story::{StoryGenerator, StorySettings};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn story() -> String {
    let panels: Vec<_> = (0..4)
        .map(|i| {
            json!({
                "index": i,
                "title": format!("Beat {}", i + 1),
                "narration": "The lighthouse keeper counts the passing ships.",
                "visual_prompt": format!("lighthouse at night, beat {}", i + 1),
                "duration_sec": "6s"
            })
        })
        .collect();
    json!({ "panels": panels }).to_string()
}

fn router(text: MockTextModel) -> axum::Router {
    let story = StoryGenerator::new(
        Arc::new(text),
        RetryPolicy::no_retry(),
        StorySettings::default(),
    );
    let panels = PanelSynthesizer::new(
        Arc::new(MockImageModel::new()),
        Some(Arc::new(MockSpeechModel::new())),
        Arc::new(SynthesisCache::default()),
        RetryPolicy::no_retry(),
        SynthesisSettings::default(),
    );
    create_router(AppState::new(ComicPipeline::new(
        story,
        panels,
        CostModel::default(),
        None,
    )))
}

fn post_generate(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = router(MockTextModel::new_success(story()))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_generate_returns_panels_and_meta() {
    let response = router(MockTextModel::new_success(story()))
        .oneshot(post_generate(
            r#"{"mood":"lighthouse","style":"mystery","voiceGender":"male"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let panels = body["panels"].as_array().unwrap();
    assert_eq!(panels.len(), 4);
    assert_eq!(panels[0]["title"], "Beat 1");
    assert_eq!(panels[0]["duration_sec"], 6.0);
    assert!(panels[3]["image_b64"].as_str().is_some());
    assert!(panels[3]["audio_b64"].as_str().is_some());
    assert!(panels[3].get("sfx_audio_b64").is_none());
    assert_eq!(body["meta"]["style"], "mystery");
    assert_eq!(body["meta"]["model_tts"], "mock-tts");
}

#[tokio::test]
async fn test_empty_mood_is_400_with_error_message() {
    let text = MockTextModel::new_success(story());
    let response = router(text.clone())
        .oneshot(post_generate(r#"{"mood":""}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Mood is required");
    assert_eq!(text.call_count(), 0);
}

#[tokio::test]
async fn test_invalid_json_is_400() {
    let response = router(MockTextModel::new_success(story()))
        .oneshot(post_generate("{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Invalid request body");
}

#[tokio::test]
async fn test_unknown_voice_gender_is_invalid_body() {
    let text = MockTextModel::new_success(story());
    let response = router(text.clone())
        .oneshot(post_generate(r#"{"mood":"lighthouse","voiceGender":"robot"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Invalid request body");
    assert_eq!(text.call_count(), 0);
}

#[tokio::test]
async fn test_upstream_outage_is_503() {
    let text = MockTextModel::new_error(moodcomic_error::ModelsErrorKind::Api {
        status_code: 502,
        message: "bad gateway".into(),
    });
    let response = router(text)
        .oneshot(post_generate(r#"{"mood":"lighthouse"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        json_body(response).await["error"],
        "The service is temporarily unavailable. Please try again shortly."
    );
}
