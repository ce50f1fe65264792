use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tolk_config::translator::TranslatorConfig;
use tolk_core::types::NO_TRANSLATION_AVAILABLE;
use tolk_core::{SessionEvent, SubmissionId, TranslationOutcome, TranslationRequest, ValidationRules};
use tolk_translator::{TranslateError, Translator};

use crate::form::TranslationForm;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Bound on a single provider call
    pub timeout: Duration,
    pub rules: ValidationRules,
    /// Initial form languages
    pub source_language: String,
    pub target_language: String,
}

impl From<&TranslatorConfig> for SessionOptions {
    fn from(config: &TranslatorConfig) -> Self {
        Self {
            timeout: config.timeout(),
            rules: ValidationRules {
                max_text_chars: config.max_text_chars,
                reject_identical_languages: config.reject_identical_languages,
            },
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&TranslatorConfig::default())
    }
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub form: TranslationForm,
    pub outcome: TranslationOutcome,
    pub in_progress: bool,
}

/// Mutable state of one session, only touched under the slot lock
struct SessionSlot {
    latest: SubmissionId,
    outcome: TranslationOutcome,
    active: Option<CancellationToken>,
    form: TranslationForm,
    subscribers: Vec<AsyncSender<SessionEvent>>,
}

impl SessionSlot {
    /// Claim the next submission id and abort whatever is in flight
    fn supersede(&mut self) -> SubmissionId {
        if let Some(token) = self.active.take() {
            tracing::debug!(superseded = %self.latest, "Cancelling in-flight request");
            token.cancel();
        }

        self.latest = self.latest.next();
        self.latest
    }

    fn publish(&mut self, submission: SubmissionId, outcome: TranslationOutcome) {
        tracing::debug!(%submission, ?outcome, "Session transition");

        self.outcome = outcome.clone();
        let event = SessionEvent {
            submission,
            outcome,
        };

        // Sent under the lock so observers see transitions in order
        self.subscribers
            .retain(|tx| tx.try_send(event.clone()).is_ok());
    }
}

struct SessionInner {
    translator: Arc<dyn Translator>,
    options: SessionOptions,
    slot: Mutex<SessionSlot>,
}

impl SessionInner {
    fn lock(&self) -> MutexGuard<'_, SessionSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run(
        self: Arc<Self>,
        submission: SubmissionId,
        request: TranslationRequest,
        cancel: CancellationToken,
    ) {
        let timeout = self.options.timeout;
        let call = self.translator.translate(
            request.text(),
            request.source_language().to_string(),
            request.target_language().to_string(),
        );

        let result = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(%submission, "Request aborted");
                return;
            }
            result = tokio::time::timeout(timeout, call) => {
                result.unwrap_or_else(|_| Err(TranslateError::Timeout(timeout)))
            }
        };

        let outcome = match result {
            Ok(translation) => {
                tracing::info!(%submission, provider = %translation.provider, "Translation succeeded");
                let translated_text = translation
                    .text
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| NO_TRANSLATION_AVAILABLE.to_string());
                TranslationOutcome::Succeeded { translated_text }
            }
            Err(e) => {
                tracing::warn!(%submission, "Translation failed: {e}");
                TranslationOutcome::Failed {
                    kind: e.kind(),
                    message: e.user_message(),
                }
            }
        };

        self.settle(submission, outcome);
    }

    /// Apply a provider result unless a newer submission exists. Returns whether it was applied
    fn settle(&self, submission: SubmissionId, outcome: TranslationOutcome) -> bool {
        let mut slot = self.lock();

        if slot.latest != submission {
            tracing::debug!(%submission, latest = %slot.latest, "Discarding stale response");
            return false;
        }

        slot.active = None;
        slot.publish(submission, outcome);
        true
    }
}

/// Drives submissions through idle, validating, in-flight and settled states.
///
/// At most one provider request is outstanding. A new submission cancels the previous one, and a
/// result is only applied while its submission is still the latest, so the last submission wins
/// even when cancellation comes too late. Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct TranslationSession {
    inner: Arc<SessionInner>,
}

impl TranslationSession {
    pub fn new(translator: Arc<dyn Translator>, options: SessionOptions) -> Self {
        let form = TranslationForm::new(
            options.source_language.clone(),
            options.target_language.clone(),
        );

        tracing::info!(
            provider = %translator.metadata().name,
            timeout = ?options.timeout,
            "Translation session created"
        );

        Self {
            inner: Arc::new(SessionInner {
                translator,
                options,
                slot: Mutex::new(SessionSlot {
                    latest: SubmissionId::default(),
                    outcome: TranslationOutcome::Idle,
                    active: None,
                    form,
                    subscribers: Vec::new(),
                }),
            }),
        }
    }

    /// Receive every published transition from now on
    pub fn subscribe(&self) -> AsyncReceiver<SessionEvent> {
        let (tx, rx) = kanal::unbounded_async();
        self.inner.lock().subscribers.push(tx);
        rx
    }

    /// Validate and send one translation.
    ///
    /// Validation happens synchronously; a rejected input settles as `Failed` without any
    /// provider call. Accepted input is published as `InFlight` and the provider call runs on a
    /// spawned task, so this must be called from within a Tokio runtime.
    pub fn submit(&self, raw_text: &str, raw_source: &str, raw_target: &str) -> SubmissionId {
        let mut slot = self.inner.lock();
        let submission = slot.supersede();
        slot.outcome = TranslationOutcome::Validating;

        let request = match self
            .inner
            .options
            .rules
            .validate(raw_text, raw_source, raw_target)
        {
            Ok(request) => request,
            Err(e) => {
                tracing::info!(%submission, "Input rejected: {e}");
                slot.publish(
                    submission,
                    TranslationOutcome::Failed {
                        kind: e.kind(),
                        message: e.to_string(),
                    },
                );
                return submission;
            }
        };

        tracing::info!(
            %submission,
            chars = request.text().chars().count(),
            "Submitting {} -> {}",
            request.source_language(),
            request.target_language()
        );

        let cancel = CancellationToken::new();
        slot.active = Some(cancel.clone());
        slot.publish(
            submission,
            TranslationOutcome::InFlight {
                submission,
                request: request.clone(),
            },
        );
        drop(slot);

        tokio::spawn(Arc::clone(&self.inner).run(submission, request, cancel));

        submission
    }

    /// Submit whatever the form currently holds
    pub fn submit_form(&self) -> SubmissionId {
        let form = self.form();
        self.submit(&form.text, &form.source_language, &form.target_language)
    }

    /// Abort any in-flight request, empty the text and return to `Idle`
    pub fn clear(&self) {
        let mut slot = self.inner.lock();
        let submission = slot.supersede();
        slot.form.text.clear();
        slot.publish(submission, TranslationOutcome::Idle);
    }

    pub fn current_outcome(&self) -> TranslationOutcome {
        self.inner.lock().outcome.clone()
    }

    pub fn is_in_progress(&self) -> bool {
        self.inner.lock().outcome.is_in_flight()
    }

    pub fn form(&self) -> TranslationForm {
        self.inner.lock().form.clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.inner.lock().form.text = text.into();
    }

    pub fn set_source_language(&self, code: impl Into<String>) {
        self.inner.lock().form.source_language = code.into();
    }

    pub fn set_target_language(&self, code: impl Into<String>) {
        self.inner.lock().form.target_language = code.into();
    }

    pub fn swap_languages(&self) {
        self.inner.lock().form.swap_languages();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let slot = self.inner.lock();
        SessionSnapshot {
            form: slot.form.clone(),
            outcome: slot.outcome.clone(),
            in_progress: slot.outcome.is_in_flight(),
        }
    }

    #[cfg(test)]
    pub(crate) fn settle(&self, submission: SubmissionId, outcome: TranslationOutcome) -> bool {
        self.inner.settle(submission, outcome)
    }
}
