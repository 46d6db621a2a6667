use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tasteshift_voice::{RemoteSpeechClient, RemoteSpeechConfig, SpeechSynthesizer, VoiceError};
use tokio::net::TcpListener;

#[derive(Debug, Clone, Default)]
struct Seen {
    voice: Option<String>,
    api_key: Option<String>,
    accept: Option<String>,
    body: Option<Value>,
}

type Shared = Arc<Mutex<Seen>>;

async fn tts(
    State(seen): State<Shared>,
    Path(voice): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let api_key = headers
        .get("xi-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    {
        let mut seen = seen.lock().unwrap();
        seen.voice = Some(voice);
        seen.api_key = api_key.clone();
        seen.accept = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        seen.body = Some(body);
    }
    if api_key.as_deref() != Some("sk-good") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": {"status": "invalid_api_key", "message": "Invalid API key"}})),
        )
            .into_response();
    }
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "audio/mpeg")],
        vec![0x49u8, 0x44, 0x33],
    )
        .into_response()
}

async fn spawn_server() -> (String, Shared) {
    let seen: Shared = Arc::default();
    let app = Router::new()
        .route("/v1/text-to-speech/{voice_id}", post(tts))
        .with_state(seen.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), seen)
}

fn client(base_url: String, key: Option<&str>) -> RemoteSpeechClient {
    RemoteSpeechClient::new(
        RemoteSpeechConfig {
            base_url,
            ..Default::default()
        },
        key.map(str::to_string),
    )
}

#[tokio::test]
async fn synthesize_sends_expected_request() {
    let (url, seen) = spawn_server().await;
    let client = client(url, Some("sk-good"));

    let audio = client
        .synthesize("What rice would you like?", "italian_rice_voice_id")
        .await
        .expect("synthesis should succeed");
    assert_eq!(audio, vec![0x49, 0x44, 0x33]);

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.voice.as_deref(), Some("italian_rice_voice_id"));
    assert_eq!(seen.api_key.as_deref(), Some("sk-good"));
    assert_eq!(seen.accept.as_deref(), Some("audio/mpeg"));
    assert_eq!(
        seen.body.unwrap(),
        json!({
            "text": "What rice would you like?",
            "model_id": "eleven_monolingual_v1",
            "voice_settings": {"stability": 0.5, "similarity_boost": 0.5}
        })
    );
}

#[tokio::test]
async fn upstream_error_message_is_surfaced() {
    let (url, _seen) = spawn_server().await;
    let client = client(url, Some("sk-bad"));

    let err = client.synthesize("hi", "voice").await.unwrap_err();
    match err {
        VoiceError::Upstream { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid API key");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn missing_credential_fails_without_request() {
    let (url, seen) = spawn_server().await;
    let client = client(url, None);

    let err = client.synthesize("hi", "voice").await.unwrap_err();
    assert!(matches!(err, VoiceError::MissingCredential));
    assert!(seen.lock().unwrap().voice.is_none());
}
