//! Session tests driven by an in-memory provider whose calls the test answers by hand

mod http_tests;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::oneshot;
use tokio::time::timeout;
use tolk_core::SessionEvent;
use tolk_translator::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

use crate::{SessionOptions, TranslationSession};

/// One provider call waiting for the test to answer it
pub(crate) struct PendingCall {
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    reply: oneshot::Sender<Result<Translation, TranslateError>>,
}

impl PendingCall {
    /// Returns false when the session already dropped the call
    pub fn succeed(self, text: Option<&str>) -> bool {
        let translation = Translation {
            text: text.map(str::to_string),
            from: self.from,
            to: self.to,
            provider: "manual".to_string(),
        };
        self.reply.send(Ok(translation)).is_ok()
    }

    pub fn fail(self, err: TranslateError) -> bool {
        self.reply.send(Err(err)).is_ok()
    }
}

pub(crate) struct ManualTranslator {
    calls: AsyncSender<PendingCall>,
}

#[async_trait]
impl Translator for ManualTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let (reply, rx) = oneshot::channel();
        let call = PendingCall {
            text: text.to_string(),
            from,
            to,
            reply,
        };

        if self.calls.send(call).await.is_err() {
            return std::future::pending().await;
        }

        match rx.await {
            Ok(result) => result,
            // Unanswered calls hang, like a provider that never responds
            Err(_) => std::future::pending().await,
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "manual".to_string(),
            endpoint: None,
        }
    }
}

pub(crate) fn manual_session(options: SessionOptions) -> (TranslationSession, AsyncReceiver<PendingCall>) {
    let (calls, calls_rx) = kanal::unbounded_async();
    let session = TranslationSession::new(Arc::new(ManualTranslator { calls }), options);
    (session, calls_rx)
}

pub(crate) async fn next_call(calls: &AsyncReceiver<PendingCall>) -> PendingCall {
    match timeout(Duration::from_secs(2), calls.recv()).await {
        Ok(Ok(call)) => call,
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - provider was never called"),
    }
}

pub(crate) async fn next_event(events: &AsyncReceiver<SessionEvent>) -> SessionEvent {
    match timeout(Duration::from_secs(2), events.recv()).await {
        Ok(Ok(event)) => event,
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - no session event"),
    }
}
