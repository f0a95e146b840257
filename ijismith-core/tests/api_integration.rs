//! Integration tests that call the real OpenRouter API.
//!
//! These tests require OPENROUTER_API_KEY to be set (via .env file or environment).
//! Run with: `cargo test -p ijismith-core --test api_integration -- --ignored`

use ijismith_core::{
    ArtifactGenerator, ArtifactKind, CompletionClient, ForgeConfig, Preference, SharedBuffer,
};
use futures::StreamExt;
use tempfile::TempDir;

/// Load environment variables from .env file
fn setup() {
    let _ = dotenvy::dotenv();
}

/// Check if API key is available
fn has_api_key() -> bool {
    std::env::var("OPENROUTER_API_KEY").is_ok()
}

#[tokio::test]
#[ignore] // Run with: cargo test -p ijismith-core --test api_integration -- --ignored
async fn test_completion_streams_fragments() {
    setup();
    if !has_api_key() {
        eprintln!("Skipping test: OPENROUTER_API_KEY not set");
        return;
    }

    let config = ForgeConfig::from_env().expect("Failed to read config");
    let mut fragments = config
        .client()
        .complete(ijismith_core::DEFAULT_MODEL, "Reply with the single word: ready")
        .await
        .expect("Request failed");

    let mut text = String::new();
    let mut count = 0;
    while let Some(fragment) = fragments.next().await {
        text.push_str(&fragment.expect("Stream failed"));
        count += 1;
    }

    println!("Received {count} fragments: {text}");
    assert!(!text.trim().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_story_generation_returns_json() {
    setup();
    if !has_api_key() {
        eprintln!("Skipping test: OPENROUTER_API_KEY not set");
        return;
    }

    let dir = TempDir::new().unwrap();
    let config = ForgeConfig::from_env()
        .expect("Failed to read config")
        .with_preferences_path(dir.path().join(".ijismithrc"));
    let store = config.preference_store();
    store
        .save(&Preference::default())
        .await
        .expect("Failed to save preference");

    let echo = SharedBuffer::new();
    let mut generator = ArtifactGenerator::new(config.client(), store).with_echo(echo.clone());

    let text = generator
        .try_generate(
            "a lighthouse keeper who talks to ghosts",
            ArtifactKind::Story,
            "{\"title\": \"\", \"summary\": \"\"}",
            &[],
        )
        .await
        .expect("Generation failed");

    println!("{text}");
    assert!(!text.starts_with("```"));
    let parsed: Result<serde_json::Value, _> = serde_json::from_str(&text);
    assert!(parsed.is_ok(), "model did not return JSON: {text}");
    assert!(!echo.contents().is_empty());
}
