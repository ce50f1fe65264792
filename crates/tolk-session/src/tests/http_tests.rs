//! End-to-end against an in-process provider speaking the `/translate` contract

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::Json;
use axum::http::StatusCode;
use axum::routing::post;
use kanal::AsyncReceiver;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tolk_core::types::NO_TRANSLATION_AVAILABLE;
use tolk_core::{ErrorKind, SessionEvent, TranslationOutcome};
use tolk_translator::{GENERIC_FAILURE_MESSAGE, HttpTranslator};

use super::next_event;
use crate::{SessionOptions, TranslationSession};

async fn provider(reply: fn(&str) -> (StatusCode, Value)) -> String {
    let router = Router::new().route(
        "/translate",
        post(move |Json(body): Json<Value>| async move {
            let text = body["text"].as_str().unwrap_or_default().to_string();
            if text == "slow" {
                tokio::time::sleep(Duration::from_millis(400)).await;
            }
            let (status, body) = reply(&text);
            (status, Json(body))
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn http_session(url: &str, timeout: Duration) -> TranslationSession {
    TranslationSession::new(
        Arc::new(HttpTranslator::new(url)),
        SessionOptions {
            timeout,
            ..Default::default()
        },
    )
}

async fn settled(events: &AsyncReceiver<SessionEvent>) -> TranslationOutcome {
    loop {
        let event = next_event(events).await;
        if event.outcome.is_settled() {
            return event.outcome;
        }
    }
}

#[tokio::test]
async fn hello_en_es() {
    let url = provider(|text| {
        let translated = if text == "Hello" { "Hola" } else { "?" };
        (StatusCode::OK, json!({ "translated_text": translated }))
    })
    .await;
    let session = http_session(&url, Duration::from_secs(2));
    let events = session.subscribe();

    session.submit("Hello", "en", "es");

    assert_eq!(
        settled(&events).await,
        TranslationOutcome::Succeeded {
            translated_text: "Hola".to_string()
        }
    );
}

#[tokio::test]
async fn empty_body_uses_fallback() {
    let url = provider(|_| (StatusCode::OK, json!({}))).await;
    let session = http_session(&url, Duration::from_secs(2));
    let events = session.subscribe();

    session.submit("Hello", "en", "es");

    assert_eq!(
        settled(&events).await.translated_text(),
        Some(NO_TRANSLATION_AVAILABLE)
    );
}

#[tokio::test]
async fn rate_limited() {
    let url = provider(|_| {
        (
            StatusCode::TOO_MANY_REQUESTS,
            json!({ "message": "rate limited" }),
        )
    })
    .await;
    let session = http_session(&url, Duration::from_secs(2));
    let events = session.subscribe();

    session.submit("Hello", "en", "es");

    assert_eq!(
        settled(&events).await,
        TranslationOutcome::Failed {
            kind: ErrorKind::ProviderError,
            message: "rate limited".to_string(),
        }
    );
}

#[tokio::test]
async fn error_without_message_is_generic() {
    let url = provider(|_| (StatusCode::BAD_GATEWAY, json!(null))).await;
    let session = http_session(&url, Duration::from_secs(2));
    let events = session.subscribe();

    session.submit("Hello", "en", "es");

    assert_eq!(
        settled(&events).await.error(),
        Some((ErrorKind::ProviderError, GENERIC_FAILURE_MESSAGE))
    );
}

#[tokio::test]
async fn slow_provider_times_out() {
    let url = provider(|_| (StatusCode::OK, json!({ "translated_text": "late" }))).await;
    let session = http_session(&url, Duration::from_millis(100));
    let events = session.subscribe();

    session.submit("slow", "en", "es");

    assert_eq!(
        settled(&events).await,
        TranslationOutcome::Failed {
            kind: ErrorKind::NetworkFailure,
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        }
    );
}

#[tokio::test]
async fn unreachable_provider_is_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session = http_session(&format!("http://{addr}"), Duration::from_secs(2));
    let events = session.subscribe();

    session.submit("Hello", "en", "es");

    assert_eq!(
        settled(&events).await.error().map(|(kind, _)| kind),
        Some(ErrorKind::NetworkFailure)
    );
}

#[tokio::test]
async fn slow_first_request_is_superseded() {
    let url = provider(|text| (StatusCode::OK, json!({ "translated_text": format!("{text}!") }))).await;
    let session = http_session(&url, Duration::from_secs(2));
    let events = session.subscribe();

    session.submit("slow", "en", "es");
    session.submit("fast", "en", "es");

    assert_eq!(settled(&events).await.translated_text(), Some("fast!"));

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(session.current_outcome().translated_text(), Some("fast!"));
    assert!(events.is_empty());
}
