//! Configuration tests

use promptline::config::{load_system_prompt_from, Config};
use promptline::AppError;
use std::env;
use std::path::Path;

#[tokio::test]
async fn test_env_overrides_and_optional_credential() {
    // Single test so the env-var mutations cannot race each other
    env::set_var("OPENAI_API_KEY", "test-key-from-env");
    env::set_var("OPENAI_MODEL", "gpt-4-turbo");
    env::set_var("OPENAI_MAX_TOKENS", "2048");
    env::set_var("OPENAI_BASE_URL", "http://localhost:1234");

    let config = Config::load().await.unwrap();

    assert_eq!(config.api_key().unwrap(), "test-key-from-env");
    assert_eq!(config.model, "gpt-4-turbo");
    assert_eq!(config.max_tokens, 2048);
    assert_eq!(config.base_url, "http://localhost:1234");

    env::remove_var("OPENAI_API_KEY");
    env::remove_var("OPENAI_MODEL");
    env::remove_var("OPENAI_MAX_TOKENS");
    env::remove_var("OPENAI_BASE_URL");

    // A missing credential is not a startup failure; it only surfaces
    // through the accessor when a request is about to be sent
    let config = Config::load().await.unwrap();
    match config.api_key() {
        Err(AppError::ApiKeyNotFound) => (),
        other => panic!("Expected ApiKeyNotFound, got {:?}", other),
    }

    // A malformed numeric override is a config error, not a silent default
    env::set_var("OPENAI_MAX_TOKENS", "not-a-number");
    let result = Config::load().await;
    env::remove_var("OPENAI_MAX_TOKENS");

    match result {
        Err(AppError::ConfigError(_)) => (),
        other => panic!("Expected ConfigError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_prompt_file_yields_empty_prompt() {
    let prompt = load_system_prompt_from(Path::new("definitely-not-here/prompts.txt"))
        .await
        .unwrap();
    assert_eq!(prompt, "");
}

#[tokio::test]
async fn test_prompt_file_contents_are_used_verbatim() {
    let path = env::temp_dir().join("promptline-prompt-test.txt");
    tokio::fs::write(&path, "You are a helpful math assistant\n")
        .await
        .unwrap();

    let prompt = load_system_prompt_from(&path).await.unwrap();
    assert_eq!(prompt, "You are a helpful math assistant");

    tokio::fs::remove_file(&path).await.unwrap();
}

#[tokio::test]
async fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.model, "gpt-4o-mini");
    assert_eq!(config.max_tokens, 4096);
    assert_eq!(config.base_url, "https://api.openai.com");
    assert_eq!(config.api_path, "/v1/chat/completions");
    assert_eq!(
        config.api_url(),
        "https://api.openai.com/v1/chat/completions"
    );
    assert_eq!(config.timeout_seconds, 30);
}
