//! Tests for provider configuration and request types.

use moodcomic_models::{ChatMessage, ChatRequestBuilder, ChatRole, OpenAiConfig, SpeechRequest};

#[test]
fn test_config_defaults() {
    let config = OpenAiConfig::default();
    assert_eq!(config.base_url(), "https://api.openai.com");
    assert_eq!(config.text_model(), "gpt-4o-mini");
    assert_eq!(config.image_model(), "dall-e-2");
    assert_eq!(config.image_size(), "256x256");
    assert_eq!(config.speech_model(), "tts-1");
}

#[test]
fn test_config_partial_deserialize_keeps_defaults() {
    let config: OpenAiConfig =
        serde_json::from_str(r#"{"text_model":"gpt-4o","api_key":"sk-abc"}"#).unwrap();
    assert_eq!(config.text_model(), "gpt-4o");
    assert_eq!(config.image_model(), "dall-e-2");
    assert_eq!(config.resolve_api_key().as_deref(), Some("sk-abc"));
}

#[test]
fn test_api_key_is_never_serialized() {
    let config = OpenAiConfig::default().with_api_key("sk-secret");
    let json = serde_json::to_string(&config).unwrap();
    assert!(!json.contains("sk-secret"));
}

#[test]
fn test_chat_request_builder_defaults() {
    let request = ChatRequestBuilder::default()
        .messages(vec![
            ChatMessage::system("You write comics."),
            ChatMessage::user("rainy day"),
        ])
        .build()
        .unwrap();

    assert_eq!(request.messages().len(), 2);
    assert_eq!(request.messages()[0].role, ChatRole::System);
    assert_eq!(*request.max_tokens(), 1000);
    assert_eq!(*request.presence_penalty(), 0.0);
}

#[test]
fn test_chat_role_serializes_lowercase() {
    let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
    assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
}

#[test]
fn test_speech_request_speed() {
    let request = SpeechRequest::new("Hello", "nova");
    assert_eq!(*request.speed(), 1.0);
    assert_eq!(*request.with_speed(0.8).speed(), 0.8);
}
