//! Multi-speaker synthesis against a mock Text-to-Speech API

mod common;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::MockGoogleServer;
use serde_json::json;
use snipctl_core::texttospeech::{MultiSpeakerParams, default_dialogue, synthesize_to_file};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

const FAKE_MP3: &[u8] = b"ID3\x04\x00\x00\x00\x00\x00\x00fake-mp3-frames";

#[tokio::test]
async fn test_synthesize_writes_audio_file() {
    let mock = MockGoogleServer::start().await;

    Mock::given(method("POST"))
        .and(path("/text:synthesize"))
        .and(body_partial_json(json!({
            "voice": {"languageCode": "en-US", "name": "en-US-Studio-MultiSpeaker"},
            "audioConfig": {"audioEncoding": "MP3"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "audioContent": STANDARD.encode(FAKE_MP3)
        })))
        .expect(1)
        .mount(&mock.server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.mp3");
    let params = MultiSpeakerParams::new().with_turns(default_dialogue());

    let file = synthesize_to_file(&mock.client(), params, &output).await.unwrap();

    assert_eq!(file.bytes, FAKE_MP3.len());
    assert_eq!(std::fs::read(&output).unwrap(), FAKE_MP3);
}

#[tokio::test]
async fn test_turns_are_sent_in_order() {
    let mock = MockGoogleServer::start().await;

    Mock::given(method("POST"))
        .and(path("/text:synthesize"))
        .and(body_partial_json(json!({
            "input": {"multiSpeakerMarkup": {"turns": [
                {"speaker": "R", "text": "First"},
                {"speaker": "S", "text": "Second"}
            ]}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "audioContent": STANDARD.encode(b"abc")
        })))
        .expect(1)
        .mount(&mock.server)
        .await;

    let dir = TempDir::new().unwrap();
    let params = MultiSpeakerParams::new()
        .with_turn("R", "First")
        .with_turn("S", "Second");

    synthesize_to_file(&mock.client(), params, &dir.path().join("a.mp3"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_empty_audio_is_an_error() {
    let mock = MockGoogleServer::start().await;

    Mock::given(method("POST"))
        .and(path("/text:synthesize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock.server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.mp3");

    let err = synthesize_to_file(
        &mock.client(),
        MultiSpeakerParams::new().with_turn("R", "Hi"),
        &output,
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("no audio"));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_no_turns_sends_nothing() {
    let mock = MockGoogleServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock.server)
        .await;

    let dir = TempDir::new().unwrap();
    let err = synthesize_to_file(&mock.client(), MultiSpeakerParams::new(), &dir.path().join("x.mp3"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
}
