use super::*;
use serial_test::serial;

fn enabled_config(api_key: Option<&str>) -> LlmConfig {
    LlmConfig {
        enabled: true,
        api_key: api_key.map(str::to_string),
        ..LlmConfig::default()
    }
}

#[test]
fn message_constructors_set_roles() {
    assert_eq!(ChatMessage::system("rules").role, "system");
    assert_eq!(ChatMessage::user("question").role, "user");
}

#[test]
fn request_serializes_sampling_parameters() {
    let messages = [ChatMessage::user("What is a control chart?")];
    let json = serde_json::to_value(CompletionRequest {
        model: "gpt-4o-mini",
        messages: &messages,
        temperature: 0.1,
        max_tokens: 1000,
    })
    .expect("serializes");

    assert_eq!(json["model"], "gpt-4o-mini");
    assert_eq!(json["max_tokens"], 1000);
    assert_eq!(json["messages"][0]["role"], "user");
}

#[test]
fn response_parsing_reads_first_choice() {
    let response: CompletionResponse = serde_json::from_str(
        r#"{"choices":[{"message":{"role":"assistant","content":"  Use SPC.  "}}]}"#,
    )
    .expect("parses");
    assert_eq!(response.choices[0].message.content, "  Use SPC.  ");
}

#[test]
fn client_targets_chat_completions() {
    let config = LlmConfig {
        api_base: "http://localhost:9999/v1/".to_string(),
        ..enabled_config(Some("sk-live-key"))
    };
    let client = OpenAiChatClient::new(&config).expect("client builds");

    assert_eq!(client.endpoint, "http://localhost:9999/v1/chat/completions");
    assert_eq!(client.model_name(), "gpt-4o-mini");
}

#[test]
#[serial]
fn placeholder_key_means_free_mode() {
    // SAFETY: serialized test, no other thread reads the environment
    unsafe {
        std::env::remove_var(crate::config::API_KEY_ENV_VAR);
    }

    assert!(GenerationMode::from_config(&enabled_config(Some("sk-abcdef123"))).is_free());
    assert!(GenerationMode::from_config(&enabled_config(Some("disabled"))).is_free());
    assert!(OpenAiChatClient::new(&enabled_config(None)).is_err());
}

#[test]
#[serial]
fn disabled_llm_ignores_credentials() {
    let config = LlmConfig {
        enabled: false,
        ..enabled_config(Some("sk-live-key"))
    };
    assert!(GenerationMode::from_config(&config).is_free());
}

#[test]
#[serial]
fn usable_key_selects_model_backend() {
    let mode = GenerationMode::from_config(&enabled_config(Some("sk-live-key")));
    assert!(!mode.is_free());
    assert_eq!(format!("{mode:?}"), "Llm(\"gpt-4o-mini\")");
}
